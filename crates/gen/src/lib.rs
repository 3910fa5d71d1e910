//! Randomized datatype and dataspace generators
//!
//! - [`TypeGenerator`]: recursive datatype generation with re-rolls
//! - [`ShapeGenerator`]: dataspace extents for a given rank
//! - [`SchemaSource`]: both generators behind one seeded draw source
//!
//! Generators take their randomness through the [`Draw`] trait and build
//! datatypes through a [`TypeBackend`], so a recorded draw sequence or an
//! instrumented backend can be swapped in.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod draw;
pub mod shape_gen;
pub mod source;
pub mod type_gen;

pub use backend::{BackendError, NativeBackend, TypeBackend};
pub use draw::{Draw, RngDraw, ScriptedDraw};
pub use shape_gen::ShapeGenerator;
pub use source::{SchemaSource, SchemaSourceBuilder};
pub use type_gen::{TypeGenerator, DEFAULT_MAX_REROLLS};
