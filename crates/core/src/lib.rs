//! Core types for voltest
//!
//! This crate defines the descriptor algebra shared by the generators and
//! the harness:
//! - [`TypeCategory`]: the closed set of datatype categories
//! - [`TypeClass`]: a fully constructed datatype descriptor
//! - [`ShapeDescriptor`]: extents of a simple dataspace
//! - [`Limits`]: every bound the generators respect
//! - [`validate`]: invariant checks over generated descriptors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod error;
pub mod limits;
pub mod shape;
pub mod types;
pub mod validate;

pub use category::TypeCategory;
pub use error::{ConfigError, GenerationError, Result, Violation};
pub use limits::Limits;
pub use shape::{MaxExtent, ShapeDescriptor, MAX_RANK};
pub use types::{
    ArrayType, ByteOrder, CharacterSet, CompoundMember, CompoundType, EnumMember, EnumType,
    FloatType, IntegerType, ReferenceType, StringLength, StringPadding, StringType, TypeClass,
};
