//! Type category enumeration
//!
//! Every datatype the storage format knows about belongs to exactly one
//! category. The generator draws categories uniformly from the full set,
//! including the ones it can never produce, and re-rolls on those.
//!
//! ## The Eleven Categories
//!
//! | Index | Category | Generated | Recursive |
//! |-------|----------|-----------|-----------|
//! | 0 | Integer | yes | no |
//! | 1 | Float | yes | no |
//! | 2 | Time | no | - |
//! | 3 | String | yes | no |
//! | 4 | Bitfield | no | - |
//! | 5 | Opaque | no | - |
//! | 6 | Compound | yes | yes |
//! | 7 | Reference | yes | no |
//! | 8 | Enum | yes | no |
//! | 9 | VariableLength | no | - |
//! | 10 | Array | yes | yes |

use serde::{Deserialize, Serialize};

/// The datatype categories of the storage format
///
/// The declaration order is the dispatch index used by a uniform draw, so a
/// recorded draw sequence replays to the same categories.
///
/// ## Invariant
///
/// This enum MUST keep exactly 11 variants in this order. `ALL[i].index() == i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    /// Fixed-width integers
    Integer,
    /// IEEE floating point
    Float,
    /// Date/time (never generated)
    Time,
    /// Fixed or variable-length strings
    String,
    /// Bitfields (never generated)
    Bitfield,
    /// Opaque byte blobs (never generated)
    Opaque,
    /// Named, offset-addressed members
    Compound,
    /// Object or region references
    Reference,
    /// Named integer constants
    Enum,
    /// Variable-length sequences (never generated)
    VariableLength,
    /// Fixed-extent multi-dimensional arrays
    Array,
}

impl TypeCategory {
    /// All categories, in dispatch order
    pub const ALL: [TypeCategory; 11] = [
        TypeCategory::Integer,
        TypeCategory::Float,
        TypeCategory::Time,
        TypeCategory::String,
        TypeCategory::Bitfield,
        TypeCategory::Opaque,
        TypeCategory::Compound,
        TypeCategory::Reference,
        TypeCategory::Enum,
        TypeCategory::VariableLength,
        TypeCategory::Array,
    ];

    /// Number of categories in the draw space
    pub const COUNT: usize = Self::ALL.len();

    /// Category at a dispatch index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Dispatch index of this category
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            TypeCategory::Integer => "integer",
            TypeCategory::Float => "float",
            TypeCategory::Time => "time",
            TypeCategory::String => "string",
            TypeCategory::Bitfield => "bitfield",
            TypeCategory::Opaque => "opaque",
            TypeCategory::Compound => "compound",
            TypeCategory::Reference => "reference",
            TypeCategory::Enum => "enum",
            TypeCategory::VariableLength => "vlen",
            TypeCategory::Array => "array",
        }
    }

    /// Whether the generator can ever return a type of this category
    pub const fn is_supported(&self) -> bool {
        !matches!(
            self,
            TypeCategory::Time
                | TypeCategory::Bitfield
                | TypeCategory::Opaque
                | TypeCategory::VariableLength
        )
    }

    /// Whether building this category recurses into the generator
    pub const fn is_recursive(&self) -> bool {
        matches!(self, TypeCategory::Compound | TypeCategory::Array)
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
