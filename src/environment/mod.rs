//! Python environment discovery.
//!
//! Supplies the classifier's roots and the module search paths, either
//! from explicit configuration or from environment-derived defaults: the
//! active virtualenv (`$VIRTUAL_ENV` or `<project>/.venv`), its
//! site-packages directories, and the standard-library root recorded in
//! the venv's `pyvenv.cfg`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;

/// The resolved layout of the interpreter environment under analysis.
#[derive(Debug, Clone)]
pub struct PythonEnvironment {
    /// Standard-library root, when one could be determined.
    pub stdlib_dir: Option<PathBuf>,

    /// Third-party install roots.
    pub site_packages: Vec<PathBuf>,

    /// Ordered module search paths: project root first, then configured
    /// extra paths, then the stdlib root, then site-packages.
    pub search_paths: Vec<PathBuf>,
}

impl PythonEnvironment {
    /// Discover the environment for `project_root`, preferring explicit
    /// configuration over derived defaults.
    pub fn discover(project_root: &Path, config: &Config) -> Self {
        let venv = config
            .virtualenv
            .clone()
            .or_else(|| env::var_os("VIRTUAL_ENV").map(PathBuf::from))
            .or_else(|| {
                let candidate = project_root.join(".venv");
                candidate.is_dir().then_some(candidate)
            });

        let site_packages = if config.site_packages.is_empty() {
            venv.as_deref().map(site_packages_of).unwrap_or_default()
        } else {
            config.site_packages.clone()
        };

        let stdlib_dir = config
            .stdlib_dir
            .clone()
            .or_else(|| venv.as_deref().and_then(stdlib_from_pyvenv_cfg));
        if stdlib_dir.is_none() {
            warn!("No standard-library root found; nothing will be classified as stdlib");
        }

        let mut search_paths = vec![project_root.to_path_buf()];
        search_paths.extend(config.search_paths.iter().cloned());
        search_paths.extend(stdlib_dir.iter().cloned());
        search_paths.extend(site_packages.iter().cloned());

        debug!(
            "Environment: stdlib={:?}, {} site dir(s), {} search path(s)",
            stdlib_dir,
            site_packages.len(),
            search_paths.len()
        );

        Self {
            stdlib_dir,
            site_packages,
            search_paths,
        }
    }
}

/// Site-packages directories of a virtualenv:
/// `<venv>/lib/python*/site-packages`, or `<venv>/Lib/site-packages` for
/// Windows-style layouts.
fn site_packages_of(venv: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    if let Ok(entries) = fs::read_dir(venv.join("lib")) {
        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            if entry.file_name().to_string_lossy().starts_with("python") {
                let site = entry.path().join("site-packages");
                if site.is_dir() {
                    found.push(site);
                }
            }
        }
    }

    if found.is_empty() {
        let windows = venv.join("Lib").join("site-packages");
        if windows.is_dir() {
            found.push(windows);
        }
    }

    found
}

/// Derive the standard-library root from a venv's `pyvenv.cfg`.
///
/// The `home` key points at the base interpreter's bin directory and
/// `version` (or `version_info`) carries its version, which locates the
/// stdlib at `<home>/../lib/python<major.minor>`.
fn stdlib_from_pyvenv_cfg(venv: &Path) -> Option<PathBuf> {
    let text = fs::read_to_string(venv.join("pyvenv.cfg")).ok()?;

    let mut home = None;
    let mut version = None;
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "home" => home = Some(value.trim().to_string()),
            "version" | "version_info" => version = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let home = PathBuf::from(home?);
    let version = version?;
    let mut parts = version.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;

    let stdlib = home
        .parent()?
        .join("lib")
        .join(format!("python{major}.{minor}"));
    stdlib.is_dir().then_some(stdlib)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_venv(root: &Path, python: &str) -> PathBuf {
        let venv = root.join(".venv");
        fs::create_dir_all(venv.join(format!("lib/{python}/site-packages"))).unwrap();
        venv
    }

    #[test]
    fn explicit_config_wins_over_discovery() {
        let temp = TempDir::new().unwrap();
        make_venv(temp.path(), "python3.12");
        let config = Config {
            stdlib_dir: Some(temp.path().join("custom-stdlib")),
            site_packages: vec![temp.path().join("custom-site")],
            ..Config::default()
        };

        let env = PythonEnvironment::discover(temp.path(), &config);
        assert_eq!(env.stdlib_dir, Some(temp.path().join("custom-stdlib")));
        assert_eq!(env.site_packages, vec![temp.path().join("custom-site")]);
    }

    #[test]
    fn discovers_site_packages_in_configured_venv() {
        let temp = TempDir::new().unwrap();
        let venv = make_venv(temp.path(), "python3.12");
        let config = Config {
            virtualenv: Some(venv.clone()),
            ..Config::default()
        };

        let env = PythonEnvironment::discover(temp.path(), &config);
        assert_eq!(
            env.site_packages,
            vec![venv.join("lib/python3.12/site-packages")]
        );
    }

    #[test]
    fn falls_back_to_project_dot_venv() {
        // Clear the activated-venv override so the fallback is exercised.
        env::remove_var("VIRTUAL_ENV");
        let temp = TempDir::new().unwrap();
        let venv = make_venv(temp.path(), "python3.12");

        let env = PythonEnvironment::discover(temp.path(), &Config::default());
        assert_eq!(
            env.site_packages,
            vec![venv.join("lib/python3.12/site-packages")]
        );
    }

    #[test]
    fn search_paths_start_at_project_root() {
        env::remove_var("VIRTUAL_ENV");
        let temp = TempDir::new().unwrap();
        let config = Config {
            search_paths: vec![temp.path().join("src")],
            site_packages: vec![temp.path().join("site")],
            ..Config::default()
        };

        let env = PythonEnvironment::discover(temp.path(), &config);
        assert_eq!(
            env.search_paths,
            vec![
                temp.path().to_path_buf(),
                temp.path().join("src"),
                temp.path().join("site"),
            ]
        );
    }

    #[test]
    fn stdlib_derived_from_pyvenv_cfg() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base");
        let stdlib = base.join("lib/python3.12");
        fs::create_dir_all(&stdlib).unwrap();
        fs::create_dir_all(base.join("bin")).unwrap();

        let venv = make_venv(temp.path(), "python3.12");
        fs::write(
            venv.join("pyvenv.cfg"),
            format!(
                "home = {}\ninclude-system-site-packages = false\nversion = 3.12.4\n",
                base.join("bin").display()
            ),
        )
        .unwrap();

        let config = Config {
            virtualenv: Some(venv),
            ..Config::default()
        };
        let env = PythonEnvironment::discover(temp.path(), &config);
        assert_eq!(env.stdlib_dir, Some(stdlib));
    }

    #[test]
    fn missing_venv_leaves_environment_empty() {
        env::remove_var("VIRTUAL_ENV");
        let temp = TempDir::new().unwrap();
        let env = PythonEnvironment::discover(temp.path(), &Config::default());
        assert!(env.stdlib_dir.is_none());
        assert!(env.site_packages.is_empty());
        assert_eq!(env.search_paths, vec![temp.path().to_path_buf()]);
    }
}
