//! Error types for domain partitioning and region classification.
//!
//! Two classes exist. [`PartitionError`] covers fatal configuration
//! problems: the partition cannot be built or would be mutated, and the
//! run must not continue. [`ClassifyError`] covers classification
//! invariant violations that must never be folded into another state.

use crate::geom::Axis;
use crate::id::{EntityIndex, Rank};
use std::error::Error;
use std::fmt;

/// Fatal configuration errors from building or accessing a partition.
#[derive(Clone, Debug, PartialEq)]
pub enum PartitionError {
    /// The rank count is zero.
    ZeroRanks,
    /// A rank index is not below the rank count.
    RankOutOfRange {
        /// The offending rank.
        rank: Rank,
        /// Total number of ranks.
        rank_count: u32,
    },
    /// The global box has a non-positive extent along `axis`.
    InvalidExtent {
        /// Axis with `hi <= lo`.
        axis: Axis,
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },
    /// A global bound along `axis` is NaN or infinite.
    NonFiniteBound {
        /// Axis with the non-finite bound.
        axis: Axis,
    },
    /// Ghost-layer width is negative or not finite.
    InvalidGhostWidth {
        /// The invalid value.
        value: f64,
    },
    /// The domain was already split; partitions are built exactly once.
    AlreadySplit,
    /// The domain has not been split yet.
    NotSplit,
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRanks => write!(f, "rank count must be at least 1"),
            Self::RankOutOfRange { rank, rank_count } => {
                write!(f, "rank {rank} out of range for {rank_count} ranks")
            }
            Self::InvalidExtent { axis, lo, hi } => {
                write!(
                    f,
                    "invalid domain dimensions: {axis} extent [{lo}, {hi}] is not positive"
                )
            }
            Self::NonFiniteBound { axis } => {
                write!(f, "invalid domain dimensions: {axis} bound is not finite")
            }
            Self::InvalidGhostWidth { value } => {
                write!(f, "ghost width must be finite and non-negative, got {value}")
            }
            Self::AlreadySplit => write!(f, "domain is already split"),
            Self::NotSplit => write!(f, "domain has not been split"),
        }
    }
}

impl Error for PartitionError {}

/// Errors from classifying an entity position.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassifyError {
    /// No classification interval matched the coordinate.
    ///
    /// Signals a broken invariant (NaN position, ghost width too large
    /// for the subdomain), never a normal outcome.
    Undefined {
        /// Coordinate along the split axis.
        coord: f64,
        /// Rank that attempted the classification.
        rank: Rank,
    },
    /// The entity index is not present in position storage.
    EntityNotFound {
        /// The missing index.
        index: EntityIndex,
    },
    /// Classification was requested before the domain was split.
    NotSplit,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined { coord, rank } => {
                write!(f, "rank {rank} could not classify coordinate {coord}")
            }
            Self::EntityNotFound { index } => write!(f, "entity {index} not found"),
            Self::NotSplit => write!(f, "domain has not been split"),
        }
    }
}

impl Error for ClassifyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_extent_names_axis_and_bounds() {
        let err = PartitionError::InvalidExtent {
            axis: Axis::Y,
            lo: 5.0,
            hi: 5.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid domain dimensions"));
        assert!(msg.contains('Y'));
        assert!(msg.contains("[5, 5]"));
    }

    #[test]
    fn undefined_names_rank_and_coord() {
        let err = ClassifyError::Undefined {
            coord: 2.5,
            rank: Rank(3),
        };
        assert_eq!(err.to_string(), "rank 3 could not classify coordinate 2.5");
    }
}
