//! Harness run options
//!
//! ## Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `HDF5_VOL_CONNECTOR` | connector under test | `native` |
//! | `VOLTEST_SEED` | fixed seed for replay | clock |
//! | `VOLTEST_ITERATIONS` | descriptors per probe | 100 |

use crate::error::{HarnessError, Result};
use tracing::info;
use voltest_core::Limits;

/// Environment variable naming the connector under test
pub const CONNECTOR_ENV: &str = "HDF5_VOL_CONNECTOR";
/// Environment variable fixing the seed
pub const SEED_ENV: &str = "VOLTEST_SEED";
/// Environment variable setting the iteration count
pub const ITERATIONS_ENV: &str = "VOLTEST_ITERATIONS";

/// Connector used when none is selected
pub const DEFAULT_CONNECTOR: &str = "native";
/// Descriptors generated per probe when unset
pub const DEFAULT_ITERATIONS: usize = 100;

/// Options for a [`Harness`](crate::Harness) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessOptions {
    /// Connector under test
    pub connector: String,
    /// Seed override; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Generation limits
    pub limits: Limits,
    /// Descriptors generated per probe
    pub iterations: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            connector: DEFAULT_CONNECTOR.to_string(),
            seed: None,
            limits: Limits::default(),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl HarnessOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read options through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut opts = Self::default();

        match lookup(CONNECTOR_ENV) {
            Some(name) if !name.is_empty() => opts.connector = name,
            _ => info!("No connector selected; using {} connector", DEFAULT_CONNECTOR),
        }
        if let Some(raw) = lookup(SEED_ENV) {
            opts.seed = Some(parse_env(SEED_ENV, &raw)?);
        }
        if let Some(raw) = lookup(ITERATIONS_ENV) {
            opts.iterations = parse_env(ITERATIONS_ENV, &raw)?;
        }
        Ok(opts)
    }

    /// Set the connector name
    pub fn connector(mut self, name: impl Into<String>) -> Self {
        self.connector = name.into();
        self
    }

    /// Fix the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the iteration count
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| HarnessError::InvalidEnv {
        var,
        value: raw.to_string(),
    })
}
