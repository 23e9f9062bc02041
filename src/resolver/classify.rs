//! Module classification.
//!
//! Assigns every resolved module to exactly one bucket based on where its
//! origin file lives. The walker recurses only into `Local` modules;
//! `Standard` and `ThirdParty` are terminal leaves.

use std::path::{Path, PathBuf};

/// Where a resolved module belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Part of the standard distribution.
    Standard,
    /// Part of an installed third-party distribution.
    ThirdParty,
    /// First-party code under analysis.
    Local,
}

/// Classifies modules by their origin path.
///
/// Rules are evaluated in order: under the standard-distribution root →
/// `Standard`; under any third-party install root → `ThirdParty`; else
/// `Local`. The assignment is deterministic and never revisited.
pub struct Classifier {
    stdlib_dir: Option<PathBuf>,
    site_packages: Vec<PathBuf>,
}

impl Classifier {
    pub fn new(stdlib_dir: Option<PathBuf>, site_packages: Vec<PathBuf>) -> Self {
        Self {
            stdlib_dir: stdlib_dir.map(|p| canonical(&p)),
            site_packages: site_packages.iter().map(|p| canonical(p)).collect(),
        }
    }

    /// Classify a module by the location of its origin file.
    pub fn classify(&self, origin: &Path) -> Classification {
        let origin = canonical(origin);

        if let Some(stdlib) = &self.stdlib_dir {
            if origin.starts_with(stdlib) {
                return Classification::Standard;
            }
        }

        if self
            .site_packages
            .iter()
            .any(|site| origin.starts_with(site))
        {
            return Classification::ThirdParty;
        }

        Classification::Local
    }
}

/// Canonicalize when possible so symlinked install roots still match.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
