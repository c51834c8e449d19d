//! Benchmark profiles and utilities for Strata.
//!
//! Provides pre-built partitioners and body sets for benchmarking:
//!
//! - [`reference_profile`]: 10 ranks over a tall 10x10x100 column
//! - [`stress_profile`]: 256 ranks over a long 1000x10x10 bar
//! - [`reference_bodies`]: deterministic body placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_core::{PartitionError, Vec3};
use strata_engine::{DomainPartitioner, PartitionerConfig};

/// Lower corner of the reference column.
pub const REFERENCE_LO: Vec3 = Vec3::new(-5.0, -5.0, 0.0);
/// Upper corner of the reference column.
pub const REFERENCE_HI: Vec3 = Vec3::new(5.0, 5.0, 100.0);

/// Build a split partitioner for `rank` of 10 over the reference column,
/// with a unit ghost layer.
pub fn reference_profile(rank: u32) -> Result<DomainPartitioner, PartitionError> {
    let mut dp = DomainPartitioner::new(PartitionerConfig::new(rank, 10, 1.0))?;
    dp.set_domain(REFERENCE_LO, REFERENCE_HI)?;
    Ok(dp)
}

/// Build a split partitioner for `rank` of 256 over a 1000-unit bar along X,
/// with a ghost layer of 0.5.
pub fn stress_profile(rank: u32) -> Result<DomainPartitioner, PartitionError> {
    let mut dp = DomainPartitioner::new(PartitionerConfig::new(rank, 256, 0.5))?;
    dp.set_sim_domain(0.0, 1000.0, 0.0, 10.0, 0.0, 10.0)?;
    Ok(dp)
}

/// `count` bodies scattered uniformly over the reference column.
pub fn reference_bodies(count: usize, seed: u64) -> Vec<Vec3> {
    strata_test_utils::scatter_positions(seed, count, REFERENCE_LO, REFERENCE_HI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Axis;

    #[test]
    fn reference_profile_splits_along_z() {
        let dp = reference_profile(4).unwrap();
        assert_eq!(dp.split_axis().unwrap(), Axis::Z);
        assert_eq!(dp.local_subdomain().unwrap().lo().z, 40.0);
    }

    #[test]
    fn stress_profile_splits_along_x() {
        let dp = stress_profile(255).unwrap();
        assert_eq!(dp.split_axis().unwrap(), Axis::X);
        assert_eq!(dp.local_subdomain().unwrap().hi().x, 1000.0);
    }

    #[test]
    fn out_of_range_rank_is_rejected() {
        assert!(reference_profile(10).is_err());
    }
}
