//! # voltest
//!
//! Randomized datatype and dataspace generation for connector conformance
//! testing.
//!
//! A connector is an alternate backend behind a hierarchical, typed storage
//! API. voltest stresses a connector's datatype and dataspace handling by
//! feeding it arbitrarily nested, but always legal, descriptors.
//!
//! ## Quick Start
//!
//! ```
//! use voltest::prelude::*;
//!
//! let mut source = SchemaSource::builder().seed(42).build()?;
//! let ty = source.generate_type(None)?;
//! let shape = source.generate_shape(3, None)?;
//! assert!(validate::check_type(&ty, source.limits()).is_ok());
//! assert_eq!(shape.rank(), 3);
//! # Ok::<(), voltest::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`voltest_core`]: descriptor algebra, limits, invariant checks
//! - [`voltest_gen`]: the type and shape generators
//! - [`voltest_harness`]: test-group runner

#![warn(missing_docs)]

mod config;
mod error;

pub mod prelude;

pub use config::load_limits;
pub use error::{Error, Result};

pub use voltest_core::types;
pub use voltest_core::{
    validate, Limits, MaxExtent, ShapeDescriptor, TypeCategory, TypeClass,
};
pub use voltest_gen::{SchemaSource, SchemaSourceBuilder, ShapeGenerator, TypeGenerator};
pub use voltest_harness::{Harness, HarnessOptions, RunReport, TestGroup};
