//! Error types for pyreqs operations.
//!
//! This module defines [`PyreqsError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PyreqsError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PyreqsError::Other`) for unexpected errors
//! - Resolution errors are fatal: nothing is retried, and no partial
//!   requirement list is ever produced

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyreqs operations.
#[derive(Debug, Error)]
pub enum PyreqsError {
    /// Source text of an analyzed module could not be parsed.
    #[error("Failed to parse module '{module}': {message}")]
    ParseError { module: String, message: String },

    /// A referenced module, or its top-level root, cannot be located.
    #[error("Module '{name}' not found")]
    UnresolvedModule { name: String },

    /// A third-party module has no traceable owning distribution.
    #[error("No installed distribution owns module '{module}' ({path})")]
    DistributionNotFound { module: String, path: PathBuf },

    /// Failed to parse the project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pyreqs operations.
pub type Result<T> = std::result::Result<T, PyreqsError>;
