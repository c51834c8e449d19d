//! Core types and traits for Strata domain decomposition.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Strata workspace:
//! axes and points, rank and entity identifiers, the [`RegionState`]
//! classification, error types, and the traits through which the
//! surrounding simulation supplies process topology and entity positions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod id;
pub mod region;
pub mod traits;

pub use error::{ClassifyError, PartitionError};
pub use geom::{Axis, Vec3};
pub use id::{EntityIndex, Rank, RankList};
pub use region::{Direction, RegionState};
pub use traits::{HasPosition, PositionSource, RankTopology, SingleProcess, StaticTopology};
