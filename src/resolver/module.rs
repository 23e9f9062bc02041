//! Module lookup over the file system.
//!
//! [`ModuleResolver`] locates a dotted name on an ordered list of search
//! paths, the way the interpreter's finder would: a directory with an
//! `__init__.py` is a package, a `<name>.py` file is a module, a plain
//! directory is a namespace package, and a fixed table of names resolves
//! to interpreter built-ins with no physical origin.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PyreqsError, Result};
use crate::resolver::name::top_level;

/// A module resolved to its place on disk.
///
/// Immutable once resolved; identity is the dotted name within one
/// resolution session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Absolute dotted name.
    pub name: String,

    /// Path of the source file. `None` for built-ins and namespace
    /// packages, which have no physical origin.
    pub origin: Option<PathBuf>,

    /// Directories searched for sub-modules. Non-empty only for packages.
    pub search_locations: Vec<PathBuf>,
}

impl ResolvedModule {
    /// Whether this module contains sub-modules.
    pub fn is_package(&self) -> bool {
        !self.search_locations.is_empty()
    }
}

/// Module names compiled into the CPython interpreter itself. They
/// resolve with no physical origin and are excluded from the walk.
const BUILTIN_MODULES: &[&str] = &[
    "_abc", "_ast", "_codecs", "_collections", "_functools", "_imp", "_io",
    "_locale", "_operator", "_signal", "_sre", "_stat", "_string",
    "_symtable", "_thread", "_tokenize", "_tracemalloc", "_typing",
    "_warnings", "_weakref", "atexit", "builtins", "errno", "faulthandler",
    "gc", "itertools", "marshal", "posix", "pwd", "sys", "time",
];

/// Locates modules on an ordered list of search paths.
pub struct ModuleResolver {
    search_paths: Vec<PathBuf>,
}

impl ModuleResolver {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Locate `name`, returning `None` when it cannot be found.
    pub fn find(&self, name: &str) -> Option<ResolvedModule> {
        if BUILTIN_MODULES.contains(&name) {
            return Some(ResolvedModule {
                name: name.to_string(),
                origin: None,
                search_locations: Vec::new(),
            });
        }

        let segments: Vec<&str> = name.split('.').collect();
        'paths: for base in &self.search_paths {
            let mut dir = base.clone();
            for (i, segment) in segments.iter().enumerate() {
                let last = i + 1 == segments.len();
                let package_dir = dir.join(segment);
                let init = package_dir.join("__init__.py");

                if init.is_file() {
                    if last {
                        return Some(ResolvedModule {
                            name: name.to_string(),
                            origin: Some(init),
                            search_locations: vec![package_dir],
                        });
                    }
                    dir = package_dir;
                    continue;
                }

                if last {
                    let file = dir.join(format!("{segment}.py"));
                    if file.is_file() {
                        return Some(ResolvedModule {
                            name: name.to_string(),
                            origin: Some(file),
                            search_locations: Vec::new(),
                        });
                    }
                }

                if package_dir.is_dir() {
                    // Namespace package: importable, but no origin file.
                    if last {
                        return Some(ResolvedModule {
                            name: name.to_string(),
                            origin: None,
                            search_locations: vec![package_dir],
                        });
                    }
                    dir = package_dir;
                    continue;
                }

                continue 'paths;
            }
        }

        None
    }

    /// Resolve a reference, tolerating partial resolution.
    ///
    /// A failed lookup is tolerable only when the top-level segment
    /// resolves on its own: the reference then points at an object
    /// re-exported under the package namespace rather than a real
    /// sub-module. When even the top-level segment is missing, the whole
    /// closure is invalid and resolution aborts.
    pub fn find_tolerant(&self, name: &str) -> Result<Option<ResolvedModule>> {
        if let Some(module) = self.find(name) {
            return Ok(Some(module));
        }

        let root = top_level(name);
        if root != name && self.find(root).is_some() {
            return Ok(None);
        }

        Err(PyreqsError::UnresolvedModule {
            name: root.to_string(),
        })
    }

    /// Expand a package root to itself plus every discoverable sub-module.
    ///
    /// Enumeration is best-effort: unreadable directories and entries that
    /// fail to resolve back by name are silently skipped, so one broken
    /// sub-module does not block reporting the rest of the package.
    pub fn enumerate_package(&self, package: &ResolvedModule) -> Vec<ResolvedModule> {
        let mut units = vec![package.clone()];
        for location in &package.search_locations {
            self.collect_submodules(location, &package.name, &mut units);
        }
        units
    }

    fn collect_submodules(&self, dir: &Path, prefix: &str, out: &mut Vec<ResolvedModule>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };

            if path.is_dir() {
                if path.join("__init__.py").is_file() {
                    let name = format!("{prefix}.{stem}");
                    if let Some(module) = self.find(&name) {
                        out.push(module);
                        self.collect_submodules(&path, &name, out);
                    }
                }
            } else if path.extension() == Some(OsStr::new("py")) && stem != "__init__" {
                let name = format!("{prefix}.{stem}");
                if let Some(module) = self.find(&name) {
                    out.push(module);
                }
            }
        }
    }
}
