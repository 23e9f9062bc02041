//! Requirement output writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

/// Write the newline-joined requirement list to stdout or to `output`.
///
/// Called only after resolution has fully succeeded, so a failed run
/// never leaves a partial output file behind.
pub fn write_requirements(requirements: &[String], output: Option<&Path>) -> Result<()> {
    let mut content = requirements.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    match output {
        Some(path) => fs::write(path, content)?,
        None => io::stdout().write_all(content.as_bytes())?,
    }
    Ok(())
}
