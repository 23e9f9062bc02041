//! Dotted module name helpers.

/// Expand a dotted name into all of its non-empty prefixes, in order.
///
/// Importing a nested module implies importing every ancestor package
/// first, so each prefix must be resolved and classified independently.
///
/// ```
/// use pyreqs::resolver::expand_prefixes;
///
/// assert_eq!(expand_prefixes("a.b.c"), vec!["a", "a.b", "a.b.c"]);
/// ```
pub fn expand_prefixes(name: &str) -> Vec<String> {
    let parts: Vec<&str> = name.split('.').collect();
    (0..parts.len())
        .map(|i| parts[..=i].join("."))
        .collect()
}

/// The top-level segment of a dotted name (everything before the first dot).
pub fn top_level(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Whether a string is a valid dotted module name: one or more Python
/// identifiers joined by single dots.
pub fn is_valid_dotted_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_single_segment() {
        assert_eq!(expand_prefixes("os"), vec!["os"]);
    }

    #[test]
    fn expands_nested_name_to_all_prefixes() {
        assert_eq!(
            expand_prefixes("a.b.c"),
            vec!["a".to_string(), "a.b".to_string(), "a.b.c".to_string()]
        );
    }

    #[test]
    fn top_level_of_nested_name() {
        assert_eq!(top_level("pkg.sub.mod"), "pkg");
    }

    #[test]
    fn top_level_of_plain_name_is_itself() {
        assert_eq!(top_level("os"), "os");
    }

    #[test]
    fn valid_dotted_names() {
        assert!(is_valid_dotted_name("os"));
        assert!(is_valid_dotted_name("os.path"));
        assert!(is_valid_dotted_name("_private.mod2"));
    }

    #[test]
    fn invalid_dotted_names() {
        assert!(!is_valid_dotted_name(""));
        assert!(!is_valid_dotted_name(".leading"));
        assert!(!is_valid_dotted_name("trailing."));
        assert!(!is_valid_dotted_name("a..b"));
        assert!(!is_valid_dotted_name("1bad"));
        assert!(!is_valid_dotted_name("spaced name"));
    }
}
