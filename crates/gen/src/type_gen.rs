//! Randomized datatype generator
//!
//! Builds arbitrarily nested, legal datatypes for stress-testing a
//! connector's datatype handling.
//!
//! ## Algorithm
//!
//! 1. Draw a category uniformly from all eleven, including the ones that
//!    can never be built.
//! 2. Dispatch on it. Leaf categories pick a predefined encoding or a
//!    string form. Compound and array recurse with `depth + 1`.
//! 3. A category that cannot be built here (unsupported, forbidden inside
//!    an array, or too deep) rejects the draw; go back to 1.
//!
//! Inside an array only integer, float and string elements are legal.
//! Once `depth` exceeds `recursion_max_depth` only leaves are legal.
//!
//! Rejected draws are ordinary control flow and are bounded by
//! `max_rerolls`. Construction failures from the backend abort the call
//! immediately; everything built during the call is dropped first.

use crate::backend::{BackendError, NativeBackend, TypeBackend};
use crate::draw::Draw;
use smallvec::SmallVec;
use voltest_core::{
    ConfigError, FloatType, GenerationError, IntegerType, Limits, ReferenceType, Result,
    StringType, TypeCategory,
};

/// Rejected category draws tolerated per call level
pub const DEFAULT_MAX_REROLLS: usize = 10_000;

impl From<BackendError> for GenerationError {
    fn from(e: BackendError) -> Self {
        GenerationError::Construction {
            operation: e.operation,
            reason: e.reason,
        }
    }
}

/// Generates random datatypes through a [`TypeBackend`]
///
/// The recursion depth is passed down explicitly, so a generator holds no
/// per-call state and one instance per thread needs no locking.
///
/// # Example
///
/// ```
/// use voltest_gen::{RngDraw, TypeGenerator};
/// use voltest_core::{validate, Limits};
///
/// let (mut draw, _seed) = RngDraw::seeded(Some(7));
/// let mut gen = TypeGenerator::native(Limits::default()).unwrap();
/// let ty = gen.generate_type(&mut draw, None).unwrap();
/// assert!(validate::check_type(&ty, gen.limits()).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TypeGenerator<B = NativeBackend> {
    backend: B,
    limits: Limits,
    max_rerolls: usize,
}

impl TypeGenerator<NativeBackend> {
    /// Generator producing plain [`TypeClass`](voltest_core::TypeClass) values
    pub fn native(limits: Limits) -> std::result::Result<Self, ConfigError> {
        Self::new(NativeBackend, limits)
    }
}

impl<B: TypeBackend> TypeGenerator<B> {
    /// Create a generator over `backend`
    pub fn new(backend: B, limits: Limits) -> std::result::Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self {
            backend,
            limits,
            max_rerolls: DEFAULT_MAX_REROLLS,
        })
    }

    /// Override the rejected-draw ceiling
    pub fn with_max_rerolls(mut self, max_rerolls: usize) -> Self {
        self.max_rerolls = max_rerolls;
        self
    }

    /// Limits in effect
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The construction backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate one datatype
    ///
    /// `parent` is the category of the enclosing datatype; pass `None` at
    /// top level. Only `Some(TypeCategory::Array)` changes what is legal.
    /// Ownership of the returned handle passes to the caller.
    pub fn generate_type(
        &mut self,
        draw: &mut impl Draw,
        parent: Option<TypeCategory>,
    ) -> Result<B::Handle> {
        self.generate_at(draw, parent, 1)
    }

    fn generate_at(
        &mut self,
        draw: &mut impl Draw,
        parent: Option<TypeCategory>,
        depth: usize,
    ) -> Result<B::Handle> {
        let mut rejected = 0;
        loop {
            let category = TypeCategory::ALL[draw.below(TypeCategory::COUNT)];
            match self.build(draw, category, parent, depth) {
                Err(e) if e.is_retryable() => {
                    rejected += 1;
                    if rejected > self.max_rerolls {
                        return Err(GenerationError::RerollsExhausted { attempts: rejected });
                    }
                }
                other => return other,
            }
        }
    }

    fn build(
        &mut self,
        draw: &mut impl Draw,
        category: TypeCategory,
        parent: Option<TypeCategory>,
        depth: usize,
    ) -> Result<B::Handle> {
        let in_array = parent == Some(TypeCategory::Array);
        let too_deep = depth > self.limits.recursion_max_depth;

        match category {
            TypeCategory::Integer => {
                let ty = IntegerType::PREDEFINED[draw.below(IntegerType::PREDEFINED.len())];
                Ok(self.backend.integer(ty)?)
            }
            TypeCategory::Float => {
                let ty = FloatType::PREDEFINED[draw.below(FloatType::PREDEFINED.len())];
                Ok(self.backend.float(ty)?)
            }
            TypeCategory::String => {
                let ty = if draw.coin() {
                    StringType::fixed(draw.below(self.limits.string_max_size))
                } else {
                    StringType::variable()
                };
                Ok(self.backend.string(ty)?)
            }
            TypeCategory::Reference if !in_array => {
                // Region references are not supported by connectors under test
                if draw.coin() {
                    Ok(self.backend.reference(ReferenceType::Object)?)
                } else {
                    Err(GenerationError::UnsupportedCategory(category))
                }
            }
            TypeCategory::Enum if !in_array => self.build_enum(draw),
            TypeCategory::Compound if !in_array && !too_deep => self.build_compound(draw, depth),
            TypeCategory::Array if !in_array && !too_deep => self.build_array(draw, depth),
            _ => Err(GenerationError::UnsupportedCategory(category)),
        }
    }

    fn build_compound(&mut self, draw: &mut impl Draw, depth: usize) -> Result<B::Handle> {
        let mut compound = self.backend.compound()?;
        let count = draw.below(self.limits.compound_max_members) + 1;

        let mut offset: usize = 0;
        for i in 0..count {
            let name = format!("compound_member{}", i);
            // On error, `compound` and the members already moved into it drop here
            let member = self.generate_at(draw, None, depth + 1)?;
            let size = self.backend.size_of(&member);
            let end = offset
                .checked_add(size)
                .ok_or_else(|| GenerationError::Construction {
                    operation: "compound_insert",
                    reason: format!("{} at offset {} overflows usize", name, offset),
                })?;
            self.backend
                .compound_insert(&mut compound, &name, offset, member)?;
            offset = end;
        }
        Ok(compound)
    }

    fn build_enum(&mut self, draw: &mut impl Draw) -> Result<B::Handle> {
        let mut ty = self.backend.enumeration(IntegerType::native_int())?;
        let count = draw.below(self.limits.enum_max_members) + 1;

        for i in 0..count {
            let value = draw.value();
            let name = bounded_name("enum_val", i, self.limits.enum_max_member_name_length);
            self.backend.enum_insert(&mut ty, &name, value)?;
        }
        Ok(ty)
    }

    fn build_array(&mut self, draw: &mut impl Draw, depth: usize) -> Result<B::Handle> {
        let rank = draw.below(self.limits.array_max_dims) + 1;

        let mut dims: SmallVec<[u64; 4]> = SmallVec::new();
        dims.try_reserve_exact(rank)
            .map_err(|e| GenerationError::Construction {
                operation: "array",
                reason: format!("cannot reserve {} extents: {:?}", rank, e),
            })?;
        for _ in 0..rank {
            dims.push((draw.below(self.limits.max_dim_size) + 1) as u64);
        }

        let element = self.generate_at(draw, Some(TypeCategory::Array), depth + 1)?;
        Ok(self.backend.array(element, &dims)?)
    }
}

/// `prefix` + `index`, cut to fit a buffer of `capacity` bytes with terminator
fn bounded_name(prefix: &str, index: usize, capacity: usize) -> String {
    let mut name = format!("{}{}", prefix, index);
    name.truncate(capacity.saturating_sub(1));
    name
}
