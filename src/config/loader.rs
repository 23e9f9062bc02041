//! Configuration loading.
//!
//! Reads the `[tool.pyreqs]` table from `<project>/pyproject.toml`.
//! Absence of the file, or of the table, is not an error: everything
//! falls back to environment-derived defaults. Only a malformed file is
//! fatal.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::schema::Config;
use crate::error::{PyreqsError, Result};

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(default)]
    pyreqs: Option<Config>,
}

/// Load configuration for the given project root.
pub fn load_config(project_root: &Path) -> Result<Config> {
    let path = project_root.join("pyproject.toml");

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No pyproject.toml at {}; using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let pyproject: PyProject =
        toml::from_str(&text).map_err(|e| PyreqsError::ConfigParse {
            path: path.clone(),
            message: e.message().to_string(),
        })?;

    let mut config = pyproject.tool.pyreqs.unwrap_or_default();
    config.anchor(project_root);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_table_yields_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[project]\nname = \"demo\"\n",
        )
        .unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_and_anchors_the_pyreqs_table() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            r#"
[tool.pyreqs]
stdlib-dir = "/usr/lib/python3.12"
site-packages = [".venv/lib/python3.12/site-packages"]
search-paths = ["src"]
"#,
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.stdlib_dir, Some(PathBuf::from("/usr/lib/python3.12")));
        assert_eq!(
            config.site_packages,
            vec![temp.path().join(".venv/lib/python3.12/site-packages")]
        );
        assert_eq!(config.search_paths, vec![temp.path().join("src")]);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyproject.toml"), "[tool.pyreqs\n").unwrap();
        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, PyreqsError::ConfigParse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[tool.pyreqs]\nunknown-key = true\n",
        )
        .unwrap();
        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, PyreqsError::ConfigParse { .. }));
    }

    #[test]
    fn other_tools_tables_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[tool.black]\nline-length = 100\n\n[tool.pyreqs]\nsearch-paths = [\"lib\"]\n",
        )
        .unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.search_paths, vec![temp.path().join("lib")]);
    }
}
