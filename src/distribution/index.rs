//! Reverse index from installed files to their owning distribution.
//!
//! Built once at process start by scanning every site-packages root for
//! `*.dist-info` directories, then shared by reference for the lifetime
//! of the process. The index is never mutated after construction, so
//! sharing it across resolution sessions is safe; it assumes the
//! installed-package set is stable while the process runs.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::distribution::metadata::{read_dist_info, Distribution};

/// File → owning distribution lookup.
pub struct DistributionIndex {
    by_file: HashMap<PathBuf, Arc<Distribution>>,
}

impl DistributionIndex {
    /// Scan `site_packages` roots and build the reverse map.
    ///
    /// The scan is best-effort: unreadable roots and malformed dist-info
    /// directories are skipped with a warning rather than aborting, since
    /// one broken installation record should not block analyzing the
    /// rest.
    pub fn build(site_packages: &[PathBuf]) -> Self {
        let mut by_file = HashMap::new();

        for site in site_packages {
            let Ok(entries) = fs::read_dir(site) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension() != Some(OsStr::new("dist-info")) || !path.is_dir() {
                    continue;
                }
                match read_dist_info(&path) {
                    Ok((dist, files)) => {
                        let dist = Arc::new(dist);
                        for file in files {
                            // RECORD paths are relative to the site dir;
                            // entries that no longer exist cannot be a
                            // module origin and are dropped.
                            if let Ok(resolved) = site.join(&file).canonicalize() {
                                by_file.insert(resolved, Arc::clone(&dist));
                            }
                        }
                    }
                    Err(e) => warn!("Skipping {}: {e}", path.display()),
                }
            }
        }

        debug!("Indexed {} installed files", by_file.len());
        Self { by_file }
    }

    /// Look up the distribution owning `file`.
    pub fn find(&self, file: &Path) -> Option<&Distribution> {
        let resolved = file
            .canonicalize()
            .unwrap_or_else(|_| file.to_path_buf());
        self.by_file.get(&resolved).map(Arc::as_ref)
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_package(site: &Path, name: &str, version: &str, files: &[&str]) {
        let dist_info = site.join(format!("{name}-{version}.dist-info"));
        fs::create_dir_all(&dist_info).unwrap();
        fs::write(
            dist_info.join("METADATA"),
            format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n"),
        )
        .unwrap();
        let record: String = files
            .iter()
            .map(|f| format!("{f},sha256=x,1\n"))
            .collect();
        fs::write(dist_info.join("RECORD"), record).unwrap();
        for file in files {
            let path = site.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
    }

    #[test]
    fn maps_installed_files_to_their_distribution() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().to_path_buf();
        install_package(&site, "requests", "2.32.3", &["requests/__init__.py"]);

        let index = DistributionIndex::build(&[site.clone()]);
        let dist = index.find(&site.join("requests/__init__.py")).unwrap();
        assert_eq!(dist.name, "requests");
        assert_eq!(dist.version, "2.32.3");
    }

    #[test]
    fn unknown_file_is_none() {
        let temp = TempDir::new().unwrap();
        let index = DistributionIndex::build(&[temp.path().to_path_buf()]);
        assert!(index.find(&temp.path().join("nope.py")).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn broken_dist_info_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().to_path_buf();
        fs::create_dir_all(site.join("broken-1.0.dist-info")).unwrap();
        install_package(&site, "good", "1.0", &["good/__init__.py"]);

        let index = DistributionIndex::build(&[site.clone()]);
        assert!(index.find(&site.join("good/__init__.py")).is_some());
    }

    #[test]
    fn record_entries_for_missing_files_are_dropped() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().to_path_buf();
        let dist_info = site.join("ghost-1.0.dist-info");
        fs::create_dir_all(&dist_info).unwrap();
        fs::write(
            dist_info.join("METADATA"),
            "Metadata-Version: 2.1\nName: ghost\nVersion: 1.0\n",
        )
        .unwrap();
        fs::write(dist_info.join("RECORD"), "ghost/gone.py,,\n").unwrap();

        let index = DistributionIndex::build(&[site]);
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn multiple_site_dirs_are_all_indexed() {
        let temp = TempDir::new().unwrap();
        let site_a = temp.path().join("a");
        let site_b = temp.path().join("b");
        fs::create_dir_all(&site_a).unwrap();
        fs::create_dir_all(&site_b).unwrap();
        install_package(&site_a, "first", "1.0", &["first.py"]);
        install_package(&site_b, "second", "2.0", &["second.py"]);

        let index = DistributionIndex::build(&[site_a.clone(), site_b.clone()]);
        assert_eq!(index.find(&site_a.join("first.py")).unwrap().name, "first");
        assert_eq!(index.find(&site_b.join("second.py")).unwrap().name, "second");
    }
}
