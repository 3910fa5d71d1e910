//! Random dataspace shapes
//!
//! A shape of rank `r` gets `r` extents drawn uniformly from
//! `1..=max_dim_size`. Rank 0 is the scalar shape. Maximum extents are
//! supplied by the caller and copied through unchanged.

use crate::draw::Draw;
use voltest_core::{ConfigError, GenerationError, Limits, MaxExtent, Result, ShapeDescriptor};

/// Generates shapes under a set of [`Limits`]
#[derive(Debug, Clone, Default)]
pub struct ShapeGenerator {
    limits: Limits,
}

impl ShapeGenerator {
    /// Create a shape generator, rejecting limits that fail validation
    pub fn new(limits: Limits) -> std::result::Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    /// Limits in effect
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Generate a shape of exactly `rank` dimensions
    ///
    /// `max_extents`, when given, must have one entry per dimension. A bad
    /// rank or a length mismatch is reported before anything is drawn.
    pub fn generate_shape(
        &self,
        draw: &mut impl Draw,
        rank: usize,
        max_extents: Option<&[MaxExtent]>,
    ) -> Result<ShapeDescriptor> {
        if rank > self.limits.max_rank {
            return Err(GenerationError::InvalidArgument(format!(
                "rank {} exceeds maximum {}",
                rank, self.limits.max_rank
            )));
        }
        if let Some(max) = max_extents {
            if max.len() != rank {
                return Err(GenerationError::InvalidArgument(format!(
                    "{} max extents supplied for rank {}",
                    max.len(),
                    rank
                )));
            }
        }

        let extents = (0..rank)
            .map(|_| (draw.below(self.limits.max_dim_size) + 1) as u64)
            .collect();
        let shape = ShapeDescriptor::new(extents);

        Ok(match max_extents {
            Some(max) => shape.with_max_extents(max.to_vec()),
            None => shape,
        })
    }
}
