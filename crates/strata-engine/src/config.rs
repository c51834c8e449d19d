//! Partitioner configuration and validation.
//!
//! [`PartitionerConfig`] carries the per-process inputs the partitioner
//! needs: which rank this is, how many ranks exist, and the ghost-layer
//! width. Every rank must be configured with the same `rank_count` and
//! `ghost_width`; nothing here checks that across processes.

use strata_core::{PartitionError, Rank, RankTopology};

/// Configuration for [`DomainPartitioner`](crate::DomainPartitioner).
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionerConfig {
    /// This process's rank.
    pub rank: Rank,
    /// Total number of ranks. Minimum: 1.
    pub rank_count: u32,
    /// Halo thickness used for boundary replication. Must be finite and
    /// non-negative, and should be below half the slab width.
    pub ghost_width: f64,
}

impl PartitionerConfig {
    /// Create a configuration for `rank` of `rank_count`.
    pub fn new(rank: u32, rank_count: u32, ghost_width: f64) -> Self {
        Self {
            rank: Rank(rank),
            rank_count,
            ghost_width,
        }
    }

    /// Take rank identity from a topology provider.
    pub fn from_topology(topology: &dyn RankTopology, ghost_width: f64) -> Self {
        Self {
            rank: topology.rank(),
            rank_count: topology.rank_count(),
            ghost_width,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), PartitionError> {
        // 1. At least one rank.
        if self.rank_count == 0 {
            return Err(PartitionError::ZeroRanks);
        }
        // 2. This rank is one of them.
        if self.rank.0 >= self.rank_count {
            return Err(PartitionError::RankOutOfRange {
                rank: self.rank,
                rank_count: self.rank_count,
            });
        }
        // 3. Ghost width finite and non-negative.
        if !self.ghost_width.is_finite() || self.ghost_width < 0.0 {
            return Err(PartitionError::InvalidGhostWidth {
                value: self.ghost_width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{SingleProcess, StaticTopology};

    #[test]
    fn valid_config_succeeds() {
        assert!(PartitionerConfig::new(2, 4, 0.5).validate().is_ok());
        assert!(PartitionerConfig::new(0, 1, 0.0).validate().is_ok());
    }

    #[test]
    fn zero_ranks_fails() {
        match PartitionerConfig::new(0, 0, 1.0).validate() {
            Err(PartitionError::ZeroRanks) => {}
            other => panic!("expected ZeroRanks, got {other:?}"),
        }
    }

    #[test]
    fn rank_past_count_fails() {
        match PartitionerConfig::new(4, 4, 1.0).validate() {
            Err(PartitionError::RankOutOfRange { rank, rank_count }) => {
                assert_eq!((rank, rank_count), (Rank(4), 4));
            }
            other => panic!("expected RankOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn bad_ghost_width_fails() {
        for g in [-0.1, f64::NAN, f64::INFINITY] {
            match PartitionerConfig::new(0, 2, g).validate() {
                Err(PartitionError::InvalidGhostWidth { .. }) => {}
                other => panic!("expected InvalidGhostWidth for {g}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_topology_copies_identity() {
        let cfg = PartitionerConfig::from_topology(&StaticTopology::new(3, 8), 0.25);
        assert_eq!(cfg, PartitionerConfig::new(3, 8, 0.25));
        let single = PartitionerConfig::from_topology(&SingleProcess, 1.0);
        assert_eq!((single.rank, single.rank_count), (Rank(0), 1));
    }
}
