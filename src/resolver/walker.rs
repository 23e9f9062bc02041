//! Memoized walk of the import reference graph.
//!
//! The walk is expressed as an explicit worklist stack rather than
//! recursion: pop a module, classify and emit it, and push the resolved
//! references of `Local` modules in reverse so the pop order stays
//! depth-first in declaration order. The visited set guarantees each
//! module's source is analyzed at most once, which both breaks cycles and
//! bounds the walk by the number of distinct reachable modules.

use std::collections::HashSet;
use std::fs;

use tracing::debug;

use crate::error::Result;
use crate::resolver::classify::{Classification, Classifier};
use crate::resolver::imports::extract_imports;
use crate::resolver::module::{ModuleResolver, ResolvedModule};
use crate::resolver::name::expand_prefixes;

/// One emitted walk step: a module and the bucket it landed in.
pub type WalkStep = (Classification, ResolvedModule);

/// Stateful walker for one resolution session.
///
/// The visited set lives exactly as long as the walker; concurrent
/// resolutions must each use their own.
pub struct GraphWalker<'a> {
    resolver: &'a ModuleResolver,
    classifier: &'a Classifier,
    visited: HashSet<String>,
}

impl<'a> GraphWalker<'a> {
    pub fn new(resolver: &'a ModuleResolver, classifier: &'a Classifier) -> Self {
        Self {
            resolver,
            classifier,
            visited: HashSet::new(),
        }
    }

    /// Walk the reference graph from `root`, appending every classified
    /// module to `sink`.
    ///
    /// `Standard` and `ThirdParty` modules are leaves; only `Local`
    /// modules have their source analyzed and their references followed.
    /// Modules without a physical origin are already fully resolved and
    /// are not emitted at all.
    pub fn walk(&mut self, root: ResolvedModule, sink: &mut Vec<WalkStep>) -> Result<()> {
        let mut stack = vec![root];

        while let Some(unit) = stack.pop() {
            if !self.visited.insert(unit.name.clone()) {
                continue;
            }
            let Some(origin) = unit.origin.clone() else {
                continue;
            };

            let classification = self.classifier.classify(&origin);
            sink.push((classification, unit.clone()));
            if classification != Classification::Local {
                continue;
            }

            debug!("Parsing module: {}", unit.name);
            let source = fs::read_to_string(&origin)?;

            let mut discovered = Vec::new();
            for reference in extract_imports(&source, &unit.name)? {
                for prefix in expand_prefixes(&reference) {
                    if self.visited.contains(&prefix) {
                        continue;
                    }
                    if let Some(module) = self.resolver.find_tolerant(&prefix)? {
                        discovered.push(module);
                    }
                }
            }

            // Reversed so the first declared reference is popped first.
            for module in discovered.into_iter().rev() {
                stack.push(module);
            }
        }

        Ok(())
    }
}
