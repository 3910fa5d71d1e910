//! Dataspace shape descriptors
//!
//! A [`ShapeDescriptor`] is an ordered list of current extents plus an
//! optional parallel list of maximum extents. Descriptors have no identity;
//! every generated shape is a fresh value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rank a dataspace may have
pub const MAX_RANK: usize = 32;

/// Upper bound of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxExtent {
    /// The dimension can grow up to this extent
    Bounded(u64),
    /// The dimension can grow without limit
    Unlimited,
}

impl fmt::Display for MaxExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxExtent::Bounded(n) => write!(f, "{}", n),
            MaxExtent::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Extents of a simple dataspace
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    /// Current extent of each dimension
    pub extents: Vec<u64>,
    /// Maximum extent of each dimension, passed through from the caller
    pub max_extents: Option<Vec<MaxExtent>>,
}

impl ShapeDescriptor {
    /// Create a shape with no maximum extents
    pub fn new(extents: Vec<u64>) -> Self {
        Self {
            extents,
            max_extents: None,
        }
    }

    /// Attach maximum extents
    pub fn with_max_extents(mut self, max_extents: Vec<MaxExtent>) -> Self {
        self.max_extents = Some(max_extents);
        self
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Whether this is a rank-0 (scalar) shape
    pub fn is_scalar(&self) -> bool {
        self.extents.is_empty()
    }

    /// Number of elements addressed by the current extents
    ///
    /// `None` when the product overflows `u64`, which legal shapes can do:
    /// 32 extents of 16 already address 2^128 elements.
    pub fn element_count(&self) -> Option<u64> {
        self.extents
            .iter()
            .try_fold(1u64, |acc, &e| acc.checked_mul(e))
    }
}

impl fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, e) in self.extents.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str(")")?;
        if let Some(max) = &self.max_extents {
            f.write_str(" max (")?;
            for (i, m) in max.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", m)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
