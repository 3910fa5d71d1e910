//! Generation limits
//!
//! Every bound the generators respect lives in [`Limits`]. The defaults
//! keep generated datatypes small enough that any connector which stores
//! the datatype in an object header can accept them.
//!
//! ## Usage
//!
//! ```
//! use voltest_core::Limits;
//!
//! let limits = Limits::default()
//!     .with_recursion_max_depth(2)
//!     .with_max_dim_size(8);
//! assert!(limits.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::shape::MAX_RANK;
use serde::{Deserialize, Serialize};

/// Largest size a generated datatype should have
pub const GENERATED_DATATYPE_MAX_SIZE: usize = 65536;
/// Composite nesting levels before only leaf categories may be drawn
pub const TYPE_GEN_RECURSION_MAX_DEPTH: usize = 3;
/// Most members a generated compound may have
pub const COMPOUND_TYPE_MAX_MEMBERS: usize = 4;
/// Highest rank of a generated array datatype
pub const ARRAY_TYPE_MAX_DIMS: usize = 4;
/// Longest enum member name, including the terminator
pub const ENUM_TYPE_MAX_MEMBER_NAME_LENGTH: usize = 256;
/// Most members a generated enum may have
pub const ENUM_TYPE_MAX_MEMBERS: usize = 16;
/// Exclusive upper bound on fixed string length
pub const STRING_TYPE_MAX_SIZE: usize = 1024;
/// Largest extent of any generated dimension
pub const MAX_DIM_SIZE: usize = 16;

/// Bounds applied by the type and shape generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Advisory ceiling on datatype size, see `validate::exceeds_size_limit`
    pub max_datatype_size: usize,
    /// Composite nesting bound
    pub recursion_max_depth: usize,
    /// Compound member count bound
    pub compound_max_members: usize,
    /// Array datatype rank bound
    pub array_max_dims: usize,
    /// Enum member name length bound, including the terminator
    pub enum_max_member_name_length: usize,
    /// Enum member count bound
    pub enum_max_members: usize,
    /// Exclusive fixed string length bound
    pub string_max_size: usize,
    /// Extent bound for array dims and shapes
    pub max_dim_size: usize,
    /// Rank bound for generated shapes
    pub max_rank: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_datatype_size: GENERATED_DATATYPE_MAX_SIZE,
            recursion_max_depth: TYPE_GEN_RECURSION_MAX_DEPTH,
            compound_max_members: COMPOUND_TYPE_MAX_MEMBERS,
            array_max_dims: ARRAY_TYPE_MAX_DIMS,
            enum_max_member_name_length: ENUM_TYPE_MAX_MEMBER_NAME_LENGTH,
            enum_max_members: ENUM_TYPE_MAX_MEMBERS,
            string_max_size: STRING_TYPE_MAX_SIZE,
            max_dim_size: MAX_DIM_SIZE,
            max_rank: MAX_RANK,
        }
    }
}

impl Limits {
    /// Shallow, narrow trees for quick smoke runs
    pub fn shallow() -> Self {
        Limits {
            recursion_max_depth: 1,
            compound_max_members: 2,
            array_max_dims: 2,
            enum_max_members: 4,
            string_max_size: 64,
            max_dim_size: 4,
            ..Default::default()
        }
    }

    /// Deeper and wider trees for stress runs
    pub fn stress() -> Self {
        Limits {
            recursion_max_depth: 6,
            compound_max_members: 16,
            array_max_dims: 8,
            enum_max_members: 64,
            ..Default::default()
        }
    }

    /// Parse limits from JSON; absent fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let limits: Limits = serde_json::from_str(text)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Override `max_datatype_size`
    pub fn with_max_datatype_size(mut self, size: usize) -> Self {
        self.max_datatype_size = size;
        self
    }

    /// Override `recursion_max_depth`
    pub fn with_recursion_max_depth(mut self, depth: usize) -> Self {
        self.recursion_max_depth = depth;
        self
    }

    /// Override `compound_max_members`
    pub fn with_compound_max_members(mut self, members: usize) -> Self {
        self.compound_max_members = members;
        self
    }

    /// Override `array_max_dims`
    pub fn with_array_max_dims(mut self, dims: usize) -> Self {
        self.array_max_dims = dims;
        self
    }

    /// Override `enum_max_member_name_length`
    pub fn with_enum_max_member_name_length(mut self, length: usize) -> Self {
        self.enum_max_member_name_length = length;
        self
    }

    /// Override `enum_max_members`
    pub fn with_enum_max_members(mut self, members: usize) -> Self {
        self.enum_max_members = members;
        self
    }

    /// Override `string_max_size`
    pub fn with_string_max_size(mut self, size: usize) -> Self {
        self.string_max_size = size;
        self
    }

    /// Override `max_dim_size`
    pub fn with_max_dim_size(mut self, size: usize) -> Self {
        self.max_dim_size = size;
        self
    }

    /// Override `max_rank`
    pub fn with_max_rank(mut self, rank: usize) -> Self {
        self.max_rank = rank;
        self
    }

    /// Check that every bound can be drawn from
    ///
    /// Uniform draws need non-empty ranges, so every count and size must be
    /// at least 1. Enum names need room for at least one character.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_datatype_size", self.max_datatype_size),
            ("compound_max_members", self.compound_max_members),
            ("array_max_dims", self.array_max_dims),
            ("enum_max_members", self.enum_max_members),
            ("string_max_size", self.string_max_size),
            ("max_dim_size", self.max_dim_size),
            ("max_rank", self.max_rank),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidLimit {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if self.enum_max_member_name_length < 2 {
            return Err(ConfigError::InvalidLimit {
                field: "enum_max_member_name_length",
                reason: "must leave room for one character and a terminator".to_string(),
            });
        }
        if self.max_rank > MAX_RANK {
            return Err(ConfigError::InvalidLimit {
                field: "max_rank",
                reason: format!("must not exceed {}", MAX_RANK),
            });
        }
        if self.array_max_dims > self.max_rank {
            return Err(ConfigError::InvalidLimit {
                field: "array_max_dims",
                reason: format!("must not exceed max_rank ({})", self.max_rank),
            });
        }
        Ok(())
    }
}
