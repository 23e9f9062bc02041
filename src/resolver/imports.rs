//! Static import reference extraction.
//!
//! Scans Python source text for `import` and `from … import` statements
//! without executing anything, and emits absolute dotted references.
//! Relative imports are resolved against the analyzed module's own dotted
//! name before emission, so every reference leaving this module is
//! absolute.
//!
//! The scan is lexical: logical lines are assembled from backslash
//! continuations and parenthesized import lists, and string literals and
//! comments are stripped first, so imports mentioned inside docstrings do
//! not count.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PyreqsError, Result};
use crate::resolver::name::is_valid_dotted_name;
use crate::resolver::scan::SourceScanner;

/// `import a.b as x, c`
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\b\s*(.+?)\s*$").unwrap());

/// `from ..pkg.sub import a, b as c` / `from . import x` / `from p import *`
static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\b\s*(\.*)\s*((?:[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)?)\s*\bimport\b\s*(.+?)\s*$")
        .unwrap()
});

/// Detects a line that starts an import statement at all, used to report
/// statements the stricter patterns above reject.
static IMPORT_STMT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:import|from)\b").unwrap());

/// Extract all import references from `source`, in declaration order.
///
/// `module_name` is the analyzed module's own dotted name; it anchors
/// relative imports and identifies the module in error messages.
pub fn extract_imports(source: &str, module_name: &str) -> Result<Vec<String>> {
    let mut references = Vec::new();

    for line in LogicalLines::new(source) {
        let line = match line {
            Ok(line) => line,
            Err(PyreqsError::ParseError { message, .. }) => {
                return Err(parse_error(module_name, &message));
            }
            Err(e) => return Err(e),
        };
        // String contents are already blanked, so any remaining
        // semicolon is a real statement separator.
        for statement in line.split(';') {
            if !IMPORT_STMT_RE.is_match(statement) {
                continue;
            }
            if let Some(caps) = FROM_RE.captures(statement) {
                let level = caps.get(1).map_or(0, |m| m.as_str().len());
                let module = caps.get(2).map_or("", |m| m.as_str());
                let names = caps.get(3).map_or("", |m| m.as_str());
                let parent = resolve_parent(level, module, module_name)?;
                parse_from_names(names, &parent, module_name, &mut references)?;
            } else if let Some(caps) = IMPORT_RE.captures(statement) {
                parse_import_names(&caps[1], module_name, &mut references)?;
            } else {
                return Err(parse_error(
                    module_name,
                    &format!("malformed import statement: {}", statement.trim()),
                ));
            }
        }
    }

    Ok(references)
}

/// Resolve the `from` target to an absolute dotted parent name.
///
/// For a relative import of level N, N−1 trailing segments are stripped
/// from the anchoring module name before the named module part is joined.
fn resolve_parent(level: usize, module: &str, anchor: &str) -> Result<String> {
    if level == 0 {
        if module.is_empty() {
            return Err(parse_error(anchor, "'from' without a module target"));
        }
        return Ok(module.to_string());
    }

    let segments: Vec<&str> = anchor.split('.').collect();
    if level > segments.len() {
        return Err(parse_error(
            anchor,
            "relative import escapes the top-level package",
        ));
    }
    let base = segments[..segments.len() - (level - 1)].join(".");
    if module.is_empty() {
        Ok(base)
    } else {
        Ok(format!("{base}.{module}"))
    }
}

/// Parse the name list of a `from P import …` statement.
///
/// `from P import *` contributes `P` itself: the wildcard cannot be
/// resolved to individual names statically, so the package is the
/// dependency.
fn parse_from_names(
    names: &str,
    parent: &str,
    module_name: &str,
    out: &mut Vec<String>,
) -> Result<()> {
    let names = strip_parens(names);
    let mut emitted = false;

    for item in names.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if item == "*" {
            out.push(parent.to_string());
            emitted = true;
            continue;
        }
        let name = strip_alias(item);
        if !is_valid_dotted_name(name) || name.contains('.') {
            return Err(parse_error(
                module_name,
                &format!("invalid imported name: {item}"),
            ));
        }
        out.push(format!("{parent}.{name}"));
        emitted = true;
    }

    if !emitted {
        return Err(parse_error(module_name, "empty import list"));
    }
    Ok(())
}

/// Parse the name list of a plain `import …` statement.
fn parse_import_names(names: &str, module_name: &str, out: &mut Vec<String>) -> Result<()> {
    let mut emitted = false;

    for item in names.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let name = strip_alias(item);
        if !is_valid_dotted_name(name) {
            return Err(parse_error(
                module_name,
                &format!("invalid module name: {item}"),
            ));
        }
        out.push(name.to_string());
        emitted = true;
    }

    if !emitted {
        return Err(parse_error(module_name, "empty import list"));
    }
    Ok(())
}

/// Drop an `as alias` suffix from an import item.
fn strip_alias(item: &str) -> &str {
    let tokens: Vec<&str> = item.split_whitespace().collect();
    match tokens.as_slice() {
        &[name] => name,
        &[name, "as", _alias] => name,
        _ => item,
    }
}

fn strip_parens(names: &str) -> &str {
    let names = names.trim();
    if let Some(inner) = names.strip_prefix('(') {
        inner.strip_suffix(')').unwrap_or(inner).trim()
    } else {
        names
    }
}

fn parse_error(module: &str, message: &str) -> PyreqsError {
    PyreqsError::ParseError {
        module: module.to_string(),
        message: message.to_string(),
    }
}

/// Iterator over logical lines of code.
///
/// Joins backslash continuations and lines held open by an unbalanced
/// bracket, with comments and string contents already stripped by
/// [`SourceScanner`].
struct LogicalLines<'a> {
    lines: std::str::Lines<'a>,
    scanner: SourceScanner,
}

impl<'a> LogicalLines<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            scanner: SourceScanner::new(),
        }
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut logical = String::new();
        let mut depth: i32 = 0;

        loop {
            let line = match self.lines.next() {
                Some(line) => line,
                None if logical.trim().is_empty() => return None,
                // Source ended while a bracket or continuation was open.
                None => return Some(Err(unterminated(&logical))),
            };

            let (code, _comment) = self.scanner.split_line(line);
            let mut code = code.trim_end().to_string();

            let continued = code.ends_with('\\');
            if continued {
                code.pop();
            }

            depth += bracket_delta(&code);
            logical.push_str(&code);

            if continued || depth > 0 || self.scanner.in_string() {
                logical.push(' ');
                continue;
            }
            return Some(Ok(logical));
        }
    }
}

fn unterminated(logical: &str) -> PyreqsError {
    PyreqsError::ParseError {
        module: String::new(),
        message: format!("unterminated statement: {}", logical.trim()),
    }
}

fn bracket_delta(code: &str) -> i32 {
    let mut delta = 0;
    for c in code.chars() {
        match c {
            '(' | '[' | '{' => delta += 1,
            ')' | ']' | '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}
