//! Convenient imports for voltest.
//!
//! ```
//! use voltest::prelude::*;
//!
//! let limits = Limits::shallow();
//! let mut source = SchemaSource::builder().limits(limits).build().unwrap();
//! let _ = source.generate_type(Some(TypeCategory::Array));
//! ```

// Entry points
pub use voltest_gen::{Draw, RngDraw, ScriptedDraw, SchemaSource, ShapeGenerator, TypeGenerator};
pub use voltest_harness::{Harness, HarnessOptions, ProbeContext, RunReport, TestGroup};

// Error handling
pub use crate::error::{Error, Result};

// Descriptors
pub use voltest_core::{
    validate, Limits, MaxExtent, ShapeDescriptor, TypeCategory, TypeClass,
};
