//! Geometry, slab partitioning, and region classification for Strata.
//!
//! This crate holds the pure, side-effect-free half of domain
//! decomposition:
//!
//! - [`Aabb`]: axis-aligned boxes for the global domain and each subdomain
//! - [`Partition`]: the one-shot slab split of a global box among ranks
//! - [`RegionClassifier`] and [`classify_coord`]: the interval rules that
//!   map a coordinate to a [`RegionState`](strata_core::RegionState)
//!
//! Nothing here allocates per query, blocks, or performs I/O. A built
//! [`Partition`] is immutable and can be shared across worker threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aabb;
pub mod classify;
pub mod partition;

pub use aabb::Aabb;
pub use classify::{classify_coord, RegionClassifier};
pub use partition::{select_split_axis, Partition};
