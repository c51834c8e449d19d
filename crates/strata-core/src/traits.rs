//! Collaborator traits: process topology and entity position storage.

use crate::geom::Vec3;
use crate::id::{EntityIndex, Rank};

/// Supplies this process's rank identity.
///
/// Implemented by whatever process-topology runtime hosts the simulation.
/// Every rank must see the same `rank_count`.
pub trait RankTopology {
    /// This process's rank.
    fn rank(&self) -> Rank;

    /// Total number of ranks.
    fn rank_count(&self) -> u32;
}

/// A fixed rank identity, for runtimes that hand out `(rank, count)` at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticTopology {
    /// This process's rank.
    pub rank: Rank,
    /// Total number of ranks.
    pub rank_count: u32,
}

impl StaticTopology {
    /// Create a topology for `rank` of `rank_count`.
    pub fn new(rank: u32, rank_count: u32) -> Self {
        Self {
            rank: Rank(rank),
            rank_count,
        }
    }
}

impl RankTopology for StaticTopology {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn rank_count(&self) -> u32 {
        self.rank_count
    }
}

/// Topology of a non-distributed run: rank 0 of 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleProcess;

impl RankTopology for SingleProcess {
    fn rank(&self) -> Rank {
        Rank(0)
    }

    fn rank_count(&self) -> u32 {
        1
    }
}

/// Read-only position lookup by entity index.
///
/// Implemented by the simulation's body storage. Returns `None` if the
/// index is not present.
pub trait PositionSource {
    /// Position of the entity at `index`.
    fn position(&self, index: EntityIndex) -> Option<Vec3>;
}

impl PositionSource for [Vec3] {
    fn position(&self, index: EntityIndex) -> Option<Vec3> {
        self.get(index.0).copied()
    }
}

impl PositionSource for Vec<Vec3> {
    fn position(&self, index: EntityIndex) -> Option<Vec3> {
        self.as_slice().position(index)
    }
}

/// A body handle that knows its own position.
pub trait HasPosition {
    /// Current position of the body.
    fn position(&self) -> Vec3;
}

impl HasPosition for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl<T: HasPosition + ?Sized> HasPosition for &T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: HasPosition + ?Sized> HasPosition for std::sync::Arc<T> {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}
