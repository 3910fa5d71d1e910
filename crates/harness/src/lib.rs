//! Test-group runner for connector conformance runs
//!
//! A run selects a connector, seeds one [`SchemaSource`](voltest_gen::SchemaSource),
//! and runs each registered [`TestGroup`] in order. Groups return an error
//! count; the run passes when the total is zero.
//!
//! ## Quick Start
//!
//! ```no_run
//! use voltest_harness::{Harness, HarnessOptions};
//!
//! let options = HarnessOptions::from_env().unwrap();
//! let report = Harness::with_default_groups(options).unwrap().run();
//! std::process::exit(if report.passed() { 0 } else { 1 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod error;
pub mod group;
pub mod options;
pub mod runner;

pub use checks::{DatatypeSelfCheck, Probe, ShapeSelfCheck};
pub use error::{HarnessError, Result};
pub use group::{ProbeContext, TestGroup};
pub use options::{HarnessOptions, CONNECTOR_ENV, DEFAULT_CONNECTOR, DEFAULT_ITERATIONS};
pub use runner::{GroupOutcome, Harness, RunReport};
