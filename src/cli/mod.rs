//! Command-line interface.
//!
//! Wires the collaborators together for one run: load configuration,
//! discover the Python environment, build the distribution index once,
//! resolve, and write the result.

mod args;
mod report;

pub use args::Cli;
pub use report::write_requirements;

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::config::load_config;
use crate::distribution::DistributionIndex;
use crate::environment::PythonEnvironment;
use crate::error::Result;
use crate::resolver::Resolver;

/// Execute a full resolution run for the parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let project_root = cli
        .project
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    debug!("Project root: {}", project_root.display());

    let config = load_config(&project_root)?;
    let environment = PythonEnvironment::discover(&project_root, &config);
    let index = DistributionIndex::build(&environment.site_packages);

    let resolver = Resolver::new(&environment, &index);
    let requirements = resolver.resolve(&cli.modules)?;

    write_requirements(&requirements, cli.output.as_deref())
}
