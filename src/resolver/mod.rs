//! Dependency-closure resolution.
//!
//! The core of pyreqs: walks the static import graph of one or more root
//! modules, classifies every reachable module, and aggregates the
//! requirement strings implied by the third-party leaves and by inline
//! declarations in first-party source.
//!
//! - [`imports`] - Import reference extraction from source text
//! - [`name`] - Dotted-name expansion helpers
//! - [`module`] - Module lookup over the file system
//! - [`classify`] - Standard / third-party / local classification
//! - [`walker`] - Memoized depth-first walk of the reference graph
//! - [`inline`] - Inline `# requirements:` comment declarations

pub mod classify;
pub mod imports;
pub mod inline;
pub mod module;
pub mod name;
mod scan;
pub mod walker;

pub use classify::{Classification, Classifier};
pub use imports::extract_imports;
pub use inline::{scan_inline_requirements, REQUIREMENTS_MARKER};
pub use module::{ModuleResolver, ResolvedModule};
pub use name::{expand_prefixes, top_level};
pub use walker::GraphWalker;

use std::collections::BTreeSet;
use std::fs;

use tracing::debug;

use crate::distribution::{format_requirement, DistributionIndex};
use crate::environment::PythonEnvironment;
use crate::error::{PyreqsError, Result};

/// Resolves root modules to the sorted union of their requirements.
///
/// Holds only read-only collaborators; each call to [`Resolver::resolve`]
/// is an independent session with its own visited set, so separate
/// resolutions never share mutable state.
pub struct Resolver<'a> {
    modules: ModuleResolver,
    classifier: Classifier,
    index: &'a DistributionIndex,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a discovered environment.
    ///
    /// The distribution index is built once at process start and injected
    /// by reference; the resolver never mutates it.
    pub fn new(environment: &PythonEnvironment, index: &'a DistributionIndex) -> Self {
        Self {
            modules: ModuleResolver::new(environment.search_paths.clone()),
            classifier: Classifier::new(
                environment.stdlib_dir.clone(),
                environment.site_packages.clone(),
            ),
            index,
        }
    }

    /// Resolve `roots` to a sorted, deduplicated list of requirement
    /// strings.
    ///
    /// A package root is expanded to itself plus every discoverable
    /// sub-module before walking. Fails with
    /// [`PyreqsError::UnresolvedModule`] if any root, or any root
    /// dependency reachable from one, cannot be located; the first
    /// failure aborts the whole call and no partial result is returned.
    pub fn resolve(&self, roots: &[String]) -> Result<Vec<String>> {
        let mut walker = GraphWalker::new(&self.modules, &self.classifier);
        let mut requirements = BTreeSet::new();

        for root in roots {
            let module = self
                .modules
                .find(root)
                .ok_or_else(|| PyreqsError::UnresolvedModule { name: root.clone() })?;

            let units = if module.is_package() {
                self.modules.enumerate_package(&module)
            } else {
                vec![module]
            };
            debug!("Resolving root '{}' ({} unit(s))", root, units.len());

            for unit in units {
                let mut steps = Vec::new();
                walker.walk(unit, &mut steps)?;
                self.collect(&steps, &mut requirements)?;
            }
        }

        Ok(requirements.into_iter().collect())
    }

    /// Turn classified walk steps into requirement strings.
    ///
    /// Third-party leaves resolve through the distribution index; local
    /// modules contribute their inline declarations at every depth.
    fn collect(
        &self,
        steps: &[walker::WalkStep],
        requirements: &mut BTreeSet<String>,
    ) -> Result<()> {
        for (classification, module) in steps {
            let Some(origin) = &module.origin else {
                continue;
            };
            match classification {
                Classification::Standard => {}
                Classification::ThirdParty => {
                    let dist = self.index.find(origin).ok_or_else(|| {
                        PyreqsError::DistributionNotFound {
                            module: module.name.clone(),
                            path: origin.clone(),
                        }
                    })?;
                    requirements.insert(format_requirement(dist));
                }
                Classification::Local => {
                    let source = fs::read_to_string(origin)?;
                    requirements.extend(scan_inline_requirements(&source));
                }
            }
        }
        Ok(())
    }
}
