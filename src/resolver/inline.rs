//! Inline requirement declarations.
//!
//! The escape hatch for dependencies that static import analysis cannot
//! see (for example, modules imported by name string at runtime): a
//! comment whose text starts with a fixed marker declares requirement
//! tokens directly in first-party source.
//!
//! ```python
//! # requirements: pyyaml>=6 redis
//! ```

use crate::resolver::scan::SourceScanner;

/// Marker prefix recognized at the start of a comment.
pub const REQUIREMENTS_MARKER: &str = "# requirements:";

/// Collect inline requirement tokens from the comments of `source`.
///
/// Everything after the marker is split on whitespace and emitted
/// verbatim, with no validation or normalization of the tokens.
pub fn scan_inline_requirements(source: &str) -> Vec<String> {
    let mut scanner = SourceScanner::new();
    let mut requirements = Vec::new();

    for line in source.lines() {
        let (_code, comment) = scanner.split_line(line);
        if let Some(comment) = comment {
            if let Some(tokens) = comment.strip_prefix(REQUIREMENTS_MARKER) {
                requirements.extend(tokens.split_whitespace().map(str::to_string));
            }
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_tokens_after_marker() {
        let source = "# requirements: pyyaml redis\nimport yaml\n";
        assert_eq!(scan_inline_requirements(source), vec!["pyyaml", "redis"]);
    }

    #[test]
    fn multiple_comments_all_contribute() {
        let source = "# requirements: one\nx = 1\n# requirements: two\n";
        assert_eq!(scan_inline_requirements(source), vec!["one", "two"]);
    }

    #[test]
    fn tokens_are_passed_through_verbatim() {
        let source = "# requirements: package>=1.2,<2 weird==token!!\n";
        assert_eq!(
            scan_inline_requirements(source),
            vec!["package>=1.2,<2", "weird==token!!"]
        );
    }

    #[test]
    fn trailing_comment_on_code_line_counts() {
        let source = "import importlib  # requirements: plugin-pkg\n";
        assert_eq!(scan_inline_requirements(source), vec!["plugin-pkg"]);
    }

    #[test]
    fn marker_inside_string_is_ignored() {
        let source = "x = '# requirements: fake'\n";
        assert!(scan_inline_requirements(source).is_empty());
    }

    #[test]
    fn marker_inside_docstring_is_ignored() {
        let source = "\"\"\"\n# requirements: fake\n\"\"\"\n";
        assert!(scan_inline_requirements(source).is_empty());
    }

    #[test]
    fn unrelated_comments_are_ignored() {
        let source = "# just a note\n# requirementsish: nope\n";
        assert!(scan_inline_requirements(source).is_empty());
    }

    #[test]
    fn empty_marker_line_contributes_nothing() {
        assert!(scan_inline_requirements("# requirements:\n").is_empty());
    }
}
