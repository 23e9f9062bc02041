//! CLI argument definitions.
//!
//! The argument surface is deliberately flat: pyreqs does one thing, so
//! there are no subcommands.

use clap::Parser;
use std::path::PathBuf;

/// pyreqs - Generate Python requirements from static import analysis.
#[derive(Debug, Parser)]
#[command(name = "pyreqs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root modules or packages to analyze
    #[arg(value_name = "MODULE", required = true)]
    pub modules: Vec<String>,

    /// Write the requirements to a file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, env = "PYREQS_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
