//! Region states describing a coordinate's relation to a rank's subdomain.

use crate::id::Rank;
use std::fmt;

/// Side of a subdomain along the split axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards higher coordinates and higher ranks.
    Up,
    /// Towards lower coordinates and lower ranks.
    Down,
}

impl Direction {
    /// Neighbouring rank on this side of `rank`, or `None` at a hard
    /// domain boundary.
    pub fn neighbour(self, rank: Rank, rank_count: u32) -> Option<Rank> {
        match self {
            Direction::Up if rank.0 + 1 < rank_count => Some(Rank(rank.0 + 1)),
            Direction::Down if rank.0 > 0 && rank.0 < rank_count => Some(Rank(rank.0 - 1)),
            _ => None,
        }
    }
}

/// Where a coordinate lies relative to the calling rank's subdomain.
///
/// This is a closed set: the exchange layer matches on it exhaustively
/// to decide what to send, receive, or drop each synchronisation step.
///
/// | State | Meaning for this rank |
/// |-------|-----------------------|
/// | `Owned` | authoritative, no neighbour needs it |
/// | `SharedUp` / `SharedDown` | authoritative, the upper/lower neighbour keeps a copy |
/// | `GhostUp` / `GhostDown` | owned by the upper/lower neighbour, replicated here |
/// | `UnownedUp` / `UnownedDown` | beyond the halo on that side |
/// | `Undefined` | no interval matched; always an invariant violation |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionState {
    /// Strictly inside the subdomain, clear of both halo strips.
    Owned,
    /// Inside the subdomain, within the ghost width of its upper face.
    SharedUp,
    /// Inside the subdomain, within the ghost width of its lower face.
    SharedDown,
    /// Inside the upper neighbour, within the ghost width of the shared face.
    GhostUp,
    /// Inside the lower neighbour, within the ghost width of the shared face.
    GhostDown,
    /// Above the upper halo (or above the global box on the last rank).
    UnownedUp,
    /// Below the lower halo (or below the global box on rank 0).
    UnownedDown,
    /// No classification rule matched.
    Undefined,
}

impl RegionState {
    /// Every state, in declaration order.
    pub const ALL: [RegionState; 8] = [
        RegionState::Owned,
        RegionState::SharedUp,
        RegionState::SharedDown,
        RegionState::GhostUp,
        RegionState::GhostDown,
        RegionState::UnownedUp,
        RegionState::UnownedDown,
        RegionState::Undefined,
    ];

    /// `true` if this rank is authoritative for the entity.
    pub fn is_local(self) -> bool {
        matches!(
            self,
            RegionState::Owned | RegionState::SharedUp | RegionState::SharedDown
        )
    }

    /// `true` for the shared boundary strips.
    pub fn is_shared(self) -> bool {
        matches!(self, RegionState::SharedUp | RegionState::SharedDown)
    }

    /// `true` if the entity is a replica of a neighbour's entity.
    pub fn is_ghost(self) -> bool {
        matches!(self, RegionState::GhostUp | RegionState::GhostDown)
    }

    /// `true` if the entity no longer concerns this rank.
    pub fn is_unowned(self) -> bool {
        matches!(self, RegionState::UnownedUp | RegionState::UnownedDown)
    }

    /// `true` only for [`RegionState::Undefined`].
    pub fn is_undefined(self) -> bool {
        self == RegionState::Undefined
    }

    /// Side of the subdomain this state refers to, if any.
    ///
    /// `Owned` and `Undefined` have no direction.
    pub fn direction(self) -> Option<Direction> {
        match self {
            RegionState::SharedUp | RegionState::GhostUp | RegionState::UnownedUp => {
                Some(Direction::Up)
            }
            RegionState::SharedDown | RegionState::GhostDown | RegionState::UnownedDown => {
                Some(Direction::Down)
            }
            RegionState::Owned | RegionState::Undefined => None,
        }
    }

    /// The neighbouring rank this state points at, if it exists.
    ///
    /// For a shared state this is the rank that must receive a copy; for a
    /// ghost state it is the owner; for an unowned state it is the next rank
    /// in that direction. Returns `None` at a hard domain boundary.
    pub fn neighbour_rank(self, rank: Rank, rank_count: u32) -> Option<Rank> {
        self.direction().and_then(|d| d.neighbour(rank, rank_count))
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionState::Owned => "OWNED",
            RegionState::SharedUp => "SHARED_UP",
            RegionState::SharedDown => "SHARED_DOWN",
            RegionState::GhostUp => "GHOST_UP",
            RegionState::GhostDown => "GHOST_DOWN",
            RegionState::UnownedUp => "UNOWNED_UP",
            RegionState::UnownedDown => "UNOWNED_DOWN",
            RegionState::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for RegionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_partition_the_states() {
        for state in RegionState::ALL {
            let hits = [
                state == RegionState::Owned,
                state.is_shared(),
                state.is_ghost(),
                state.is_unowned(),
                state.is_undefined(),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            assert_eq!(hits, 1, "{state} matched {hits} categories");
        }
    }

    #[test]
    fn local_states_are_owned_and_shared() {
        let local: Vec<_> = RegionState::ALL
            .into_iter()
            .filter(|s| s.is_local())
            .collect();
        assert_eq!(
            local,
            vec![
                RegionState::Owned,
                RegionState::SharedUp,
                RegionState::SharedDown
            ]
        );
    }

    #[test]
    fn neighbour_rank_respects_domain_boundaries() {
        assert_eq!(RegionState::SharedUp.neighbour_rank(Rank(1), 3), Some(Rank(2)));
        assert_eq!(RegionState::GhostDown.neighbour_rank(Rank(1), 3), Some(Rank(0)));
        assert_eq!(RegionState::UnownedDown.neighbour_rank(Rank(0), 3), None);
        assert_eq!(RegionState::UnownedUp.neighbour_rank(Rank(2), 3), None);
        assert_eq!(RegionState::Owned.neighbour_rank(Rank(1), 3), None);
    }

    #[test]
    fn display_uses_canonical_names() {
        assert_eq!(RegionState::GhostUp.to_string(), "GHOST_UP");
        assert_eq!(RegionState::Undefined.to_string(), "UNDEFINED");
    }
}
