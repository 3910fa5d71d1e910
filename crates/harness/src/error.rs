//! Harness setup errors

use thiserror::Error;
use voltest_core::ConfigError;

/// Errors raised while configuring a harness run.
///
/// Probe failures are not errors at this level; they are counted and
/// reported in the [`RunReport`](crate::RunReport).
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Limits were rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An environment variable held an unusable value
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Value found
        value: String,
    },

    /// No test group matched the requested name
    #[error("unknown test group: {0}")]
    UnknownGroup(String),
}

/// Result type for harness setup.
pub type Result<T> = std::result::Result<T, HarnessError>;
