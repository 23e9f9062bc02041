//! Installed distribution metadata.
//!
//! Reads the `*.dist-info` directory an installer leaves next to a
//! third-party package: the `METADATA` headers for name and version, the
//! PEP 610 `direct_url.json` for install provenance, and the `RECORD`
//! file listing every installed file belonging to the distribution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::error::Result;

/// Metadata record of one installed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: String,
    /// PEP 610 provenance, present for direct (e.g. VCS) installs.
    pub direct_url: Option<DirectUrl>,
}

/// PEP 610 `direct_url.json` record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectUrl {
    pub url: String,
    #[serde(default)]
    pub vcs_info: Option<VcsInfo>,
    #[serde(default)]
    pub subdirectory: Option<String>,
}

/// The `vcs_info` object of a PEP 610 record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VcsInfo {
    pub vcs: String,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub requested_revision: Option<String>,
}

/// Parse one `*.dist-info` directory.
///
/// Returns the distribution record plus the installed-file paths from its
/// RECORD, relative to the enclosing site-packages directory.
pub fn read_dist_info(dist_info: &Path) -> Result<(Distribution, Vec<PathBuf>)> {
    let metadata = fs::read_to_string(dist_info.join("METADATA"))
        .with_context(|| format!("no METADATA in {}", dist_info.display()))?;
    let name = metadata_header(&metadata, "Name")
        .ok_or_else(|| anyhow!("METADATA in {} has no Name", dist_info.display()))?;
    let version = metadata_header(&metadata, "Version")
        .ok_or_else(|| anyhow!("METADATA in {} has no Version", dist_info.display()))?;

    let direct_url = match fs::read_to_string(dist_info.join("direct_url.json")) {
        Ok(text) => Some(
            serde_json::from_str(&text)
                .with_context(|| format!("bad direct_url.json in {}", dist_info.display()))?,
        ),
        Err(_) => None,
    };

    let record = fs::read_to_string(dist_info.join("RECORD"))
        .with_context(|| format!("no RECORD in {}", dist_info.display()))?;
    let files = record
        .lines()
        .filter_map(record_path)
        .map(PathBuf::from)
        .collect();

    Ok((
        Distribution {
            name,
            version,
            direct_url,
        },
        files,
    ))
}

/// Look up an RFC 822 style header in the METADATA preamble.
///
/// Headers end at the first blank line; everything after that is the
/// distribution's long description.
fn metadata_header(metadata: &str, key: &str) -> Option<String> {
    for line in metadata.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            if k.trim().eq_ignore_ascii_case(key) {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Extract the path field (the first CSV column) of one RECORD line.
///
/// Paths containing commas or quotes are quoted with doubled-quote
/// escaping per the CSV convention RECORD files use.
fn record_path(line: &str) -> Option<String> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix('"') {
        let mut path = String::new();
        let mut chars = rest.chars();
        while let Some(c) = chars.next() {
            if c == '"' {
                match chars.next() {
                    Some('"') => path.push('"'),
                    _ => break,
                }
            } else {
                path.push(c);
            }
        }
        Some(path)
    } else {
        line.split(',').next().map(str::to_string)
    }
}
