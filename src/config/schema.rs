//! Configuration schema.
//!
//! pyreqs is configured from the `[tool.pyreqs]` table of the project's
//! `pyproject.toml`. Every key is optional; anything unset falls back to
//! environment-derived discovery.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The `[tool.pyreqs]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Standard-library root used by the classifier.
    #[serde(default)]
    pub stdlib_dir: Option<PathBuf>,

    /// Third-party install roots (site-packages directories).
    #[serde(default)]
    pub site_packages: Vec<PathBuf>,

    /// Extra module search paths, tried after the project root.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Virtual environment to derive defaults from.
    #[serde(default)]
    pub virtualenv: Option<PathBuf>,
}

impl Config {
    /// Resolve relative paths against the project root so the config
    /// means the same thing no matter where the tool is invoked from.
    pub(crate) fn anchor(&mut self, project_root: &Path) {
        fn rebase(path: &mut PathBuf, root: &Path) {
            if path.is_relative() {
                *path = root.join(path.as_path());
            }
        }

        if let Some(path) = &mut self.stdlib_dir {
            rebase(path, project_root);
        }
        for path in &mut self.site_packages {
            rebase(path, project_root);
        }
        for path in &mut self.search_paths {
            rebase(path, project_root);
        }
        if let Some(path) = &mut self.virtualenv {
            rebase(path, project_root);
        }
    }
}
