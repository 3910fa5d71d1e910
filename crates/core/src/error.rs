//! Error types for descriptor generation and configuration
//!
//! - [`GenerationError`]: what a generator call can fail with
//! - [`ConfigError`]: rejected or unreadable [`Limits`](crate::Limits)
//! - [`Violation`]: an invariant broken by a descriptor

use crate::category::TypeCategory;
use thiserror::Error;

/// Errors raised while generating a descriptor.
///
/// `UnsupportedCategory` is ordinary control flow inside the type
/// generator: it triggers a re-roll and is never returned to a caller.
/// `Construction` is fatal to the current call and is never retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A category that cannot be built in this context was drawn
    #[error("unsupported category selected: {0}")]
    UnsupportedCategory(TypeCategory),

    /// An underlying construction step failed
    #[error("construction failed in {operation}: {reason}")]
    Construction {
        /// The construction step that failed
        operation: &'static str,
        /// Why it failed
        reason: String,
    },

    /// Bad rank or malformed bounds
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Re-rolling never produced a legal category
    #[error("no legal category after {attempts} rejected draws")]
    RerollsExhausted {
        /// Rejected category draws before giving up
        attempts: usize,
    },
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenerationError>;

impl GenerationError {
    /// Check if this error is handled by drawing another category.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::UnsupportedCategory(_))
    }

    /// Check if this is a construction failure.
    pub fn is_construction(&self) -> bool {
        matches!(self, GenerationError::Construction { .. })
    }

    /// Check if this is an argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GenerationError::InvalidArgument(_))
    }
}

/// Errors raised while loading or validating limits.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A limit has an unusable value
    #[error("invalid limit `{field}`: {reason}")]
    InvalidLimit {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The limits document could not be parsed
    #[error("failed to parse limits: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An invariant broken by a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A compound member is not at the running offset
    #[error("compound member `{member}` at offset {actual}, expected {expected}")]
    CompoundOffset {
        /// Member name
        member: String,
        /// Prefix sum of earlier member sizes
        expected: usize,
        /// Stored offset
        actual: usize,
    },

    /// A compound's size is not the sum of its member sizes
    #[error("compound size {actual}, expected {expected}")]
    CompoundSize {
        /// Sum of member sizes
        expected: usize,
        /// Stored size
        actual: usize,
    },

    /// Member count outside `[1, max]`
    #[error("{category} has {count} members, allowed 1..={max}")]
    MemberCount {
        /// Compound or enum
        category: TypeCategory,
        /// Actual count
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// An array element of a category arrays cannot hold
    #[error("array element of category {element} is not allowed")]
    IllegalArrayElement {
        /// Category of the element
        element: TypeCategory,
    },

    /// Rank outside the allowed range
    #[error("rank {rank} outside 1..={max}")]
    Rank {
        /// Actual rank
        rank: usize,
        /// Configured maximum
        max: usize,
    },

    /// An extent outside `[1, max]`
    #[error("extent {extent} at dimension {dim} outside 1..={max}")]
    Extent {
        /// Dimension index
        dim: usize,
        /// Actual extent
        extent: u64,
        /// Configured maximum
        max: u64,
    },

    /// Composite nesting deeper than the recursion bound
    #[error("nesting depth {depth} exceeds {max}")]
    Depth {
        /// Actual depth
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// An enum member name longer than the configured bound
    #[error("enum member name `{name}` longer than {max}")]
    EnumName {
        /// Offending name
        name: String,
        /// Maximum length including terminator
        max: usize,
    },

    /// An enum base that is not the native integer
    #[error("enum base is not the native integer type")]
    EnumBase,

    /// A fixed string at or beyond the configured size
    #[error("fixed string length {length} not below {max}")]
    StringLength {
        /// Actual length
        length: usize,
        /// Exclusive maximum
        max: usize,
    },

    /// A datatype whose byte size does not fit in `usize`
    #[error("{category} size overflows usize")]
    SizeOverflow {
        /// Compound or array
        category: TypeCategory,
    },

    /// A region reference, which is never generated
    #[error("region references are not generated")]
    RegionReference,

    /// `max_extents` does not have one entry per dimension
    #[error("max extents has {actual} entries for rank {expected}")]
    MaxExtentsLength {
        /// Rank of the shape
        expected: usize,
        /// Entries supplied
        actual: usize,
    },
}
