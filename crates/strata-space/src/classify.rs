//! Region classification along the split axis.
//!
//! [`classify_coord`] holds the interval rules. Every other entry point
//! ([`RegionClassifier`]'s point, body, and entity-index variants) projects
//! a position onto the split axis and delegates to it.
//!
//! All intervals are half-open `[a, b)`, so a coordinate sitting exactly on
//! a boundary belongs to the interval above it: an interior rank classifies
//! its own `high` as `GhostUp`, not `SharedUp`.

use crate::partition::Partition;
use strata_core::{
    Axis, ClassifyError, EntityIndex, HasPosition, PartitionError, PositionSource, Rank,
    RegionState, Vec3,
};

/// Classify a split-axis coordinate for `rank`, whose subdomain spans
/// `[low, high)`, with halo thickness `ghost`.
///
/// Interior ranks (`0 < rank < rank_count - 1`):
///
/// | Interval | State |
/// |----------|-------|
/// | `[low+g, high-g)` | `Owned` |
/// | `[high, high+g)` | `GhostUp` |
/// | `[high-g, high)` | `SharedUp` |
/// | `[low, low+g)` | `SharedDown` |
/// | `[low-g, low)` | `GhostDown` |
/// | `>= high+g` | `UnownedUp` |
/// | `< low-g` | `UnownedDown` |
///
/// Rank 0 has a hard lower boundary: `[low, high-g)` is `Owned` and anything
/// below `low` is `UnownedDown`. The last rank has a hard upper boundary:
/// `[low+g, high)` is `Owned` and anything at or above `high` is
/// `UnownedUp`. With a single rank every coordinate is `Owned`.
///
/// Rules are tested in the order listed, which only matters when `ghost`
/// exceeds half the slab width. A coordinate matching no rule (NaN)
/// yields [`RegionState::Undefined`].
///
/// # Examples
///
/// ```
/// use strata_core::{Rank, RegionState};
/// use strata_space::classify_coord;
///
/// // Interior rank 1 of 3 owning [10, 20) with a unit halo.
/// let c = |x| classify_coord(x, Rank(1), 3, 10.0, 20.0, 1.0);
/// assert_eq!(c(15.0), RegionState::Owned);
/// assert_eq!(c(19.5), RegionState::SharedUp);
/// assert_eq!(c(20.0), RegionState::GhostUp);
/// assert_eq!(c(8.9), RegionState::UnownedDown);
/// ```
pub fn classify_coord(
    coord: f64,
    rank: Rank,
    rank_count: u32,
    low: f64,
    high: f64,
    ghost: f64,
) -> RegionState {
    if rank_count == 1 {
        return RegionState::Owned;
    }
    let pos = coord;
    let first = rank.is_first();
    let last = rank.is_last(rank_count);

    if !first && !last {
        if pos >= low + ghost && pos < high - ghost {
            RegionState::Owned
        } else if pos >= high && pos < high + ghost {
            RegionState::GhostUp
        } else if pos >= high - ghost && pos < high {
            RegionState::SharedUp
        } else if pos >= low && pos < low + ghost {
            RegionState::SharedDown
        } else if pos >= low - ghost && pos < low {
            RegionState::GhostDown
        } else if pos >= high + ghost {
            RegionState::UnownedUp
        } else if pos < low - ghost {
            RegionState::UnownedDown
        } else {
            RegionState::Undefined
        }
    } else if first {
        if pos >= low && pos < high - ghost {
            RegionState::Owned
        } else if pos >= high && pos < high + ghost {
            RegionState::GhostUp
        } else if pos >= high - ghost && pos < high {
            RegionState::SharedUp
        } else if pos >= high + ghost {
            RegionState::UnownedUp
        } else if pos < low {
            RegionState::UnownedDown
        } else {
            RegionState::Undefined
        }
    } else if pos >= low + ghost && pos < high {
        RegionState::Owned
    } else if pos >= low && pos < low + ghost {
        RegionState::SharedDown
    } else if pos >= low - ghost && pos < low {
        RegionState::GhostDown
    } else if pos >= high {
        RegionState::UnownedUp
    } else if pos < low - ghost {
        RegionState::UnownedDown
    } else {
        RegionState::Undefined
    }
}

/// Immutable snapshot of everything one rank needs to classify positions.
///
/// `Copy`, `Send`, and `Sync`: worker threads can classify concurrently
/// from a shared reference without locking.
///
/// # Examples
///
/// ```
/// use strata_core::{Rank, RegionState, Vec3};
/// use strata_space::{Aabb, Partition, RegionClassifier};
///
/// let global = Aabb::from_bounds(0.0, 100.0, 0.0, 10.0, 0.0, 10.0).unwrap();
/// let partition = Partition::build(global, 10).unwrap();
/// let last = RegionClassifier::new(&partition, Rank(9), 1.0).unwrap();
///
/// assert_eq!(last.classify_point(&Vec3::new(99.5, 0.0, 0.0)), RegionState::Owned);
/// assert_eq!(last.classify_point(&Vec3::new(100.0, 0.0, 0.0)), RegionState::UnownedUp);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionClassifier {
    rank: Rank,
    rank_count: u32,
    axis: Axis,
    low: f64,
    high: f64,
    ghost: f64,
}

impl RegionClassifier {
    /// Build a classifier for `rank` from a partition.
    ///
    /// Returns `Err(PartitionError::RankOutOfRange)` if `rank` is not part
    /// of the partition, or `Err(PartitionError::InvalidGhostWidth)` if
    /// `ghost` is negative or not finite.
    pub fn new(partition: &Partition, rank: Rank, ghost: f64) -> Result<Self, PartitionError> {
        if !ghost.is_finite() || ghost < 0.0 {
            return Err(PartitionError::InvalidGhostWidth { value: ghost });
        }
        let axis = partition.split_axis();
        let sub = partition.subdomain(rank)?;
        Ok(Self {
            rank,
            rank_count: partition.rank_count(),
            axis,
            low: sub.lo()[axis],
            high: sub.hi()[axis],
            ghost,
        })
    }

    /// Rank this classifier answers for.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total rank count.
    pub fn rank_count(&self) -> u32 {
        self.rank_count
    }

    /// Axis positions are projected onto.
    pub fn split_axis(&self) -> Axis {
        self.axis
    }

    /// The rank's `[low, high)` interval along the split axis.
    pub fn interval(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Ghost-layer width.
    pub fn ghost_width(&self) -> f64 {
        self.ghost
    }

    /// Classify a split-axis coordinate.
    ///
    /// An [`Undefined`](RegionState::Undefined) result is logged at error
    /// level before being returned; use
    /// [`try_classify_coord`](Self::try_classify_coord) to receive it as an
    /// error instead.
    pub fn classify_coord(&self, coord: f64) -> RegionState {
        let state = classify_coord(
            coord,
            self.rank,
            self.rank_count,
            self.low,
            self.high,
            self.ghost,
        );
        if state.is_undefined() {
            tracing::error!(
                rank = self.rank.0,
                coord,
                low = self.low,
                high = self.high,
                ghost = self.ghost,
                "error classifying body"
            );
        }
        state
    }

    /// Classify a split-axis coordinate, mapping `Undefined` to an error.
    pub fn try_classify_coord(&self, coord: f64) -> Result<RegionState, ClassifyError> {
        match self.classify_coord(coord) {
            RegionState::Undefined => Err(ClassifyError::Undefined {
                coord,
                rank: self.rank,
            }),
            state => Ok(state),
        }
    }

    /// Classify a 3-D point by its split-axis component.
    pub fn classify_point(&self, point: &Vec3) -> RegionState {
        self.classify_coord(point[self.axis])
    }

    /// Like [`classify_point`](Self::classify_point), mapping `Undefined`
    /// to an error.
    pub fn try_classify_point(&self, point: &Vec3) -> Result<RegionState, ClassifyError> {
        self.try_classify_coord(point[self.axis])
    }

    /// Classify a body handle by its current position.
    pub fn classify_body<B: HasPosition + ?Sized>(&self, body: &B) -> RegionState {
        self.classify_point(&body.position())
    }

    /// Like [`classify_body`](Self::classify_body), mapping `Undefined` to
    /// an error.
    pub fn try_classify_body<B: HasPosition + ?Sized>(
        &self,
        body: &B,
    ) -> Result<RegionState, ClassifyError> {
        self.try_classify_point(&body.position())
    }

    /// Classify the entity stored at `index`.
    ///
    /// Returns `Err(ClassifyError::EntityNotFound)` if `positions` has no
    /// entry for `index`.
    pub fn classify_entity<S: PositionSource + ?Sized>(
        &self,
        positions: &S,
        index: EntityIndex,
    ) -> Result<RegionState, ClassifyError> {
        positions
            .position(index)
            .map(|p| self.classify_point(&p))
            .ok_or(ClassifyError::EntityNotFound { index })
    }

    /// Like [`classify_entity`](Self::classify_entity), also mapping
    /// `Undefined` to an error.
    pub fn try_classify_entity<S: PositionSource + ?Sized>(
        &self,
        positions: &S,
        index: EntityIndex,
    ) -> Result<RegionState, ClassifyError> {
        let p = positions
            .position(index)
            .ok_or(ClassifyError::EntityNotFound { index })?;
        self.try_classify_point(&p)
    }
}
