//! Harness runner
//!
//! Runs registered groups in order against one connector, sums their
//! error counts, and reports the outcome.
//!
//! ## Example
//!
//! ```
//! use voltest_harness::{Harness, HarnessOptions};
//!
//! let options = HarnessOptions::new().seed(1).iterations(10);
//! let mut harness = Harness::with_default_groups(options).unwrap();
//! let report = harness.run();
//! assert!(report.passed());
//! assert_eq!(report.seed, 1);
//! ```

use crate::checks::{DatatypeSelfCheck, ShapeSelfCheck};
use crate::error::{HarnessError, Result};
use crate::group::{ProbeContext, TestGroup};
use crate::options::HarnessOptions;
use serde::Serialize;
use tracing::{error, info};
use voltest_gen::SchemaSource;

/// Outcome of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    /// Group name
    pub name: String,
    /// Failed probes
    pub errors: usize,
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Connector under test
    pub connector: String,
    /// Seed to replay the run with
    pub seed: u64,
    /// Per-group outcomes in run order
    pub groups: Vec<GroupOutcome>,
    /// Sum of all group error counts
    pub total_errors: usize,
}

impl RunReport {
    /// Whether every group passed
    pub fn passed(&self) -> bool {
        self.total_errors == 0
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        if self.passed() {
            format!("All tests passed with connector '{}'", self.connector)
        } else {
            format!(
                "{} test{} failed with connector '{}'",
                self.total_errors,
                if self.total_errors == 1 { "" } else { "s" },
                self.connector
            )
        }
    }
}

/// Runs test groups against a connector
pub struct Harness {
    ctx: ProbeContext,
    groups: Vec<Box<dyn TestGroup>>,
}

impl Harness {
    /// Create a harness with no groups
    pub fn new(options: HarnessOptions) -> Result<Self> {
        let source = SchemaSource::builder()
            .maybe_seed(options.seed)
            .limits(options.limits)
            .build()?;
        Ok(Self {
            ctx: ProbeContext::new(options.connector, source, options.iterations),
            groups: Vec::new(),
        })
    }

    /// Create a harness with the built-in self-check groups
    pub fn with_default_groups(options: HarnessOptions) -> Result<Self> {
        Ok(Self::new(options)?
            .with_group(DatatypeSelfCheck)
            .with_group(ShapeSelfCheck))
    }

    /// Register a group; groups run in registration order
    pub fn with_group(mut self, group: impl TestGroup + 'static) -> Self {
        self.groups.push(Box::new(group));
        self
    }

    /// Keep only the groups whose names are listed
    pub fn only(mut self, names: &[&str]) -> Result<Self> {
        if let Some(missing) = names
            .iter()
            .find(|n| !self.groups.iter().any(|g| g.name() == **n))
        {
            return Err(HarnessError::UnknownGroup(missing.to_string()));
        }
        self.groups.retain(|g| names.iter().any(|n| *n == g.name()));
        Ok(self)
    }

    /// Names of the registered groups
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name()).collect()
    }

    /// Connector under test
    pub fn connector(&self) -> &str {
        self.ctx.connector()
    }

    /// Run every group and report
    pub fn run(&mut self) -> RunReport {
        let connector = self.ctx.connector().to_string();
        let seed = self.ctx.seed();
        info!(connector = %connector, seed, "Running tests");

        let mut outcomes = Vec::with_capacity(self.groups.len());
        for group in self.groups.iter_mut() {
            let name = group.name().to_string();
            info!(group = %name, "Running group");
            let errors = group.run(&mut self.ctx);
            if errors > 0 {
                error!(group = %name, errors, "group failed");
            }
            outcomes.push(GroupOutcome { name, errors });
        }

        let total_errors = outcomes.iter().map(|o| o.errors).sum();
        let report = RunReport {
            connector,
            seed,
            groups: outcomes,
            total_errors,
        };
        if report.passed() {
            info!("{}", report.summary());
        } else {
            error!(seed, "{}", report.summary());
        }
        report
    }
}
