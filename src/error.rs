//! Unified error type for voltest.
//!
//! Wraps the per-crate errors so callers of the facade deal with a single
//! type.

use std::path::PathBuf;
use thiserror::Error;
use voltest_core::{ConfigError, GenerationError};
use voltest_harness::HarnessError;

/// All voltest errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Descriptor generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Limits were rejected or unreadable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Harness setup failed
    #[error(transparent)]
    Harness(#[from] HarnessError),

    /// A limits file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type for voltest operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a construction failure during generation.
    pub fn is_construction(&self) -> bool {
        matches!(self, Error::Generation(e) if e.is_construction())
    }

    /// Check if this is a bad-argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::Generation(e) if e.is_invalid_argument())
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        match self {
            Error::Config(_) | Error::Io { .. } => true,
            Error::Harness(HarnessError::Config(_)) => true,
            _ => false,
        }
    }
}
