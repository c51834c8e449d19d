//! Strata: slab domain decomposition for distributed particle simulations.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strata sub-crates. For most users, adding `strata` as a single dependency
//! is sufficient.
//!
//! Each rank builds one [`engine::DomainPartitioner`] from identical global
//! bounds, splits the domain once into equal-width slabs along its longest
//! axis, and then classifies bodies against its own slab and a ghost layer
//! around it.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // Rank 1 of 10, unit ghost layer.
//! let mut dp = DomainPartitioner::new(PartitionerConfig::new(1, 10, 1.0)).unwrap();
//! dp.set_sim_domain(-5.0, 5.0, -5.0, 5.0, 0.0, 100.0).unwrap();
//!
//! assert_eq!(dp.split_axis().unwrap(), Axis::Z);
//! assert_eq!(dp.classify(15.0), RegionState::Owned);
//! assert_eq!(dp.classify(19.5), RegionState::SharedUp);
//! assert_eq!(dp.classify(20.5), RegionState::GhostUp);
//! assert_eq!(dp.classify(25.0), RegionState::UnownedUp);
//!
//! let body = Vec3::new(0.0, 0.0, 9.5);
//! assert_eq!(dp.classify_point(&body), RegionState::GhostDown);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Geometry, ranks, region states, errors, core traits |
//! | [`space`] | `strata-space` | Boxes, slab partitions, region classification |
//! | [`engine`] | `strata-engine` | Per-rank partitioner, config, reports, exchange plans |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`strata-core`).
///
/// Contains [`types::Vec3`], [`types::Rank`], [`types::RegionState`], the
/// error types, and the position traits ([`types::HasPosition`],
/// [`types::PositionSource`]).
pub use strata_core as types;

/// Boxes, slab partitions, and classification (`strata-space`).
///
/// [`space::Partition`] is the global split every rank agrees on;
/// [`space::RegionClassifier`] answers region queries for one rank.
pub use strata_space as space;

/// Per-rank partitioning (`strata-engine`).
///
/// [`engine::DomainPartitioner`] owns the split lifecycle;
/// [`engine::ExchangePlan`] groups entities by region state.
pub use strata_engine as engine;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strata_core::{
        Axis, EntityIndex, HasPosition, PositionSource, Rank, RankTopology, RegionState,
        SingleProcess, StaticTopology, Vec3,
    };

    // Errors
    pub use strata_core::{ClassifyError, PartitionError};

    // Space
    pub use strata_space::{Aabb, Partition, RegionClassifier};

    // Engine
    pub use strata_engine::{DomainPartitioner, DomainReport, ExchangePlan, PartitionerConfig};
}
