//! Generator Property Test Suite
//!
//! Checks the structural guarantees of generated descriptors across many
//! seeds and limit configurations.
//!
//! ## Properties
//!
//! 1. Termination: every call returns within the re-roll ceiling
//! 2. Depth: composite nesting never exceeds `recursion_max_depth`
//! 3. Nesting: array elements are always integer, float or string
//! 4. Layout: compound members are packed back to back from offset 0
//! 5. Shapes: exactly `rank` extents, each in `1..=max_dim_size`
//! 6. Cleanup: a failed call releases everything it built
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test generator_properties
//! cargo test --test generator_properties cleanup::
//! ```

use voltest::{validate, Limits, SchemaSource, TypeCategory, TypeClass};

// Test modules
pub mod cleanup;
pub mod datatypes;
pub mod limits_file;
pub mod replay;
pub mod shapes;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Category indices in draw order, for scripted runs
pub mod idx {
    pub const INTEGER: usize = 0;
    pub const FLOAT: usize = 1;
    pub const TIME: usize = 2;
    pub const STRING: usize = 3;
    pub const COMPOUND: usize = 6;
    pub const REFERENCE: usize = 7;
    pub const ENUM: usize = 8;
    pub const ARRAY: usize = 10;
}

/// Seeded source over `limits`
pub fn source(seed: u64, limits: Limits) -> SchemaSource {
    SchemaSource::builder()
        .seed(seed)
        .limits(limits)
        .build()
        .expect("limits should be valid")
}

/// Visit `ty` and every nested datatype
pub fn walk(ty: &TypeClass, visit: &mut impl FnMut(&TypeClass)) {
    visit(ty);
    match ty {
        TypeClass::Compound(c) => {
            for m in &c.members {
                walk(&m.ty, visit);
            }
        }
        TypeClass::Array(a) => walk(&a.element, visit),
        _ => {}
    }
}

/// Assert the full invariant set on a generated datatype
pub fn assert_legal(ty: &TypeClass, limits: &Limits) {
    if let Err(v) = validate::check_type(ty, limits) {
        panic!("{} violates {}", ty, v);
    }
    walk(ty, &mut |t| {
        if let TypeClass::Array(a) = t {
            assert!(
                matches!(
                    a.element.category(),
                    TypeCategory::Integer | TypeCategory::Float | TypeCategory::String
                ),
                "illegal array element in {}",
                ty
            );
        }
    });
}
