//! Strongly-typed identifiers and the [`RankList`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Zero-based index of one process among `rank_count` peers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub u32);

impl Rank {
    /// Rank as a `usize` for table lookups.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `true` if this is rank 0 (no lower neighbour).
    pub fn is_first(self) -> bool {
        self.0 == 0
    }

    /// `true` if this is the highest rank of `rank_count` (no upper neighbour).
    pub fn is_last(self, rank_count: u32) -> bool {
        self.0 + 1 == rank_count
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Rank {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of an entity in the simulation's external body storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub usize);

impl fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for EntityIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Small list of ranks.
///
/// A coordinate is held by at most its owner plus one neighbour per side,
/// so three inline slots avoid heap allocation.
pub type RankList = SmallVec<[Rank; 3]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_rank() {
        assert!(Rank(0).is_first());
        assert!(!Rank(1).is_first());
        assert!(Rank(3).is_last(4));
        assert!(!Rank(2).is_last(4));
        assert!(Rank(0).is_last(1));
    }
}
