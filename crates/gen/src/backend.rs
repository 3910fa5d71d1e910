//! Datatype construction backends
//!
//! The type generator decides *what* to build; a [`TypeBackend`] does the
//! building. Every constructor can fail, and a failure is a construction
//! error that aborts the whole generation call.
//!
//! ## Ownership
//!
//! A handle owns every child inserted into it. When generation fails
//! part-way, the partial handle and any children already built are dropped
//! on the way out, so nothing built during the failed call survives it.

use smallvec::SmallVec;
use thiserror::Error;
use voltest_core::{
    ArrayType, CompoundType, EnumType, FloatType, IntegerType, ReferenceType, StringType,
    TypeClass,
};

/// A failed construction step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: {reason}")]
pub struct BackendError {
    /// The constructor that failed
    pub operation: &'static str,
    /// Why it failed
    pub reason: String,
}

impl BackendError {
    /// Create a new backend error
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// Builds owned datatype handles
pub trait TypeBackend {
    /// Owned datatype handle; dropping it releases the datatype
    type Handle;

    /// Copy a predefined integer encoding
    fn integer(&mut self, ty: IntegerType) -> Result<Self::Handle, BackendError>;

    /// Copy a predefined floating-point encoding
    fn float(&mut self, ty: FloatType) -> Result<Self::Handle, BackendError>;

    /// Create a string datatype
    fn string(&mut self, ty: StringType) -> Result<Self::Handle, BackendError>;

    /// Copy a predefined reference datatype
    fn reference(&mut self, kind: ReferenceType) -> Result<Self::Handle, BackendError>;

    /// Create an enum with no members over `base`
    fn enumeration(&mut self, base: IntegerType) -> Result<Self::Handle, BackendError>;

    /// Add a named constant to an enum handle
    fn enum_insert(
        &mut self,
        ty: &mut Self::Handle,
        name: &str,
        value: i32,
    ) -> Result<(), BackendError>;

    /// Create an empty compound
    fn compound(&mut self) -> Result<Self::Handle, BackendError>;

    /// Move `member` into a compound at `offset`, growing the compound to cover it
    fn compound_insert(
        &mut self,
        ty: &mut Self::Handle,
        name: &str,
        offset: usize,
        member: Self::Handle,
    ) -> Result<(), BackendError>;

    /// Create an array of `element` with the given extents
    fn array(&mut self, element: Self::Handle, dims: &[u64]) -> Result<Self::Handle, BackendError>;

    /// Storage size of a handle in bytes
    ///
    /// Constructors reject datatypes whose size would not fit in `usize`,
    /// so every handle has an exact size.
    fn size_of(&self, ty: &Self::Handle) -> usize;
}

/// Builds plain [`TypeClass`] values; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl TypeBackend for NativeBackend {
    type Handle = TypeClass;

    fn integer(&mut self, ty: IntegerType) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::Integer(ty))
    }

    fn float(&mut self, ty: FloatType) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::Float(ty))
    }

    fn string(&mut self, ty: StringType) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::String(ty))
    }

    fn reference(&mut self, kind: ReferenceType) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::Reference(kind))
    }

    fn enumeration(&mut self, base: IntegerType) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::Enum(EnumType::new(base)))
    }

    fn enum_insert(
        &mut self,
        ty: &mut TypeClass,
        name: &str,
        value: i32,
    ) -> Result<(), BackendError> {
        match ty {
            TypeClass::Enum(e) => {
                e.insert(name, value);
                Ok(())
            }
            other => Err(BackendError::new(
                "enum_insert",
                format!("not an enum: {}", other.category()),
            )),
        }
    }

    fn compound(&mut self) -> Result<TypeClass, BackendError> {
        Ok(TypeClass::Compound(CompoundType::new()))
    }

    fn compound_insert(
        &mut self,
        ty: &mut TypeClass,
        name: &str,
        offset: usize,
        member: TypeClass,
    ) -> Result<(), BackendError> {
        match ty {
            TypeClass::Compound(c) => {
                if CompoundType::member_end(offset, &member).is_none() {
                    return Err(BackendError::new(
                        "compound_insert",
                        format!("member `{}` at offset {} overflows usize", name, offset),
                    ));
                }
                c.insert(name, offset, member);
                Ok(())
            }
            other => Err(BackendError::new(
                "compound_insert",
                format!("not a compound: {}", other.category()),
            )),
        }
    }

    fn array(&mut self, element: TypeClass, dims: &[u64]) -> Result<TypeClass, BackendError> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(BackendError::new(
                "array",
                format!("invalid extents {:?}", dims),
            ));
        }
        let array = ArrayType {
            element: Box::new(element),
            dims: SmallVec::from_slice(dims),
        };
        if array.checked_size().is_none() {
            return Err(BackendError::new(
                "array",
                format!("size of extents {:?} overflows usize", dims),
            ));
        }
        Ok(TypeClass::Array(array))
    }

    fn size_of(&self, ty: &TypeClass) -> usize {
        ty.size()
    }
}
