//! Slab partitioning of a global box along its longest axis.

use crate::aabb::Aabb;
use smallvec::smallvec;
use strata_core::{Axis, PartitionError, Rank, RankList};

/// Pick the axis with the greatest extent.
///
/// The tie-break is fixed so every rank derives the same axis: X beats Y
/// when `len_x >= len_y`, then Z replaces the current choice when its
/// extent is at least as long. A cube therefore splits along Z, and a box with
/// `len_x == len_y > len_z` splits along X.
pub fn select_split_axis(global: &Aabb) -> Axis {
    let axis = if global.extent(Axis::X) >= global.extent(Axis::Y) {
        Axis::X
    } else {
        Axis::Y
    };
    if global.extent(Axis::Z) >= global.extent(axis) {
        Axis::Z
    } else {
        axis
    }
}

/// A global box split into `rank_count` equal slabs along one axis.
///
/// Built once by [`Partition::build`] and immutable afterwards. Every rank
/// builds an identical `Partition` from identical inputs; there is no
/// runtime negotiation.
///
/// Slab `r` spans `[lo + r·W, lo + (r+1)·W)` along the split axis, with
/// `W = extent / rank_count`, and the full global extent on the other two
/// axes. Adjacent slabs share the exact same boundary value, and the last
/// slab's upper bound is pinned to the global upper bound.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Rank};
/// use strata_space::{Aabb, Partition};
///
/// let global = Aabb::from_bounds(-5.0, 5.0, -5.0, 5.0, 0.0, 100.0).unwrap();
/// let p = Partition::build(global, 4).unwrap();
/// assert_eq!(p.split_axis(), Axis::Z);
/// assert_eq!(p.slab_width(), 25.0);
///
/// let sub = p.subdomain(Rank(2)).unwrap();
/// assert_eq!(sub.lo()[Axis::Z], 50.0);
/// assert_eq!(sub.hi()[Axis::Z], 75.0);
/// assert_eq!(sub.lo()[Axis::X], -5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    global: Aabb,
    axis: Axis,
    width: f64,
    subdomains: Vec<Aabb>,
}

impl Partition {
    /// Split `global` into `rank_count` slabs.
    ///
    /// Returns `Err(PartitionError::ZeroRanks)` if `rank_count == 0`. The
    /// box itself is already validated by [`Aabb::new`].
    pub fn build(global: Aabb, rank_count: u32) -> Result<Self, PartitionError> {
        if rank_count == 0 {
            return Err(PartitionError::ZeroRanks);
        }
        let axis = select_split_axis(&global);
        let lo = global.lo()[axis];
        let width = global.extent(axis) / f64::from(rank_count);

        let subdomains = (0..rank_count)
            .map(|r| {
                let sub_lo = lo + f64::from(r) * width;
                let sub_hi = if r + 1 == rank_count {
                    global.hi()[axis]
                } else {
                    lo + f64::from(r + 1) * width
                };
                global.with_interval(axis, sub_lo, sub_hi)
            })
            .collect();

        Ok(Self {
            global,
            axis,
            width,
            subdomains,
        })
    }

    /// The global box.
    pub fn global(&self) -> &Aabb {
        &self.global
    }

    /// Axis the box was split along.
    pub fn split_axis(&self) -> Axis {
        self.axis
    }

    /// Nominal slab width `W` along the split axis.
    pub fn slab_width(&self) -> f64 {
        self.width
    }

    /// Number of ranks (slabs).
    pub fn rank_count(&self) -> u32 {
        // Built from a u32 count.
        self.subdomains.len() as u32
    }

    /// Subdomain owned by `rank`.
    pub fn subdomain(&self, rank: Rank) -> Result<&Aabb, PartitionError> {
        self.subdomains
            .get(rank.index())
            .ok_or(PartitionError::RankOutOfRange {
                rank,
                rank_count: self.rank_count(),
            })
    }

    /// All subdomains, indexed by rank.
    pub fn subdomains(&self) -> &[Aabb] {
        &self.subdomains
    }

    /// Ranks whose slab collapsed to zero width along the split axis.
    ///
    /// Happens when the slab width is below the float spacing at the
    /// bounds' magnitude, e.g. `[1e16, 1e16 + 4]` over 8 ranks. Such a rank
    /// owns nothing.
    pub fn empty_slabs(&self) -> impl Iterator<Item = Rank> + '_ {
        self.subdomains
            .iter()
            .enumerate()
            .filter(|(_, sub)| sub.extent(self.axis) <= 0.0)
            .map(|(r, _)| Rank(r as u32))
    }

    /// Rank whose slab contains `coord` along the split axis.
    ///
    /// Slabs are half-open, matching classification: the global upper
    /// bound belongs to no rank. Returns `None` outside `[lo, hi)`.
    pub fn owner_of(&self, coord: f64) -> Option<Rank> {
        let lo = self.global.lo()[self.axis];
        let hi = self.global.hi()[self.axis];
        if coord.is_nan() || coord < lo || coord >= hi {
            return None;
        }
        // The estimate can be off by one near a boundary due to rounding;
        // correct it against the stored bounds.
        let last = self.subdomains.len() - 1;
        let mut r = (((coord - lo) / self.width) as usize).min(last);
        while r > 0 && coord < self.subdomains[r].lo()[self.axis] {
            r -= 1;
        }
        while r < last && coord >= self.subdomains[r].hi()[self.axis] {
            r += 1;
        }
        Some(Rank(r as u32))
    }

    /// Every rank that holds `coord` as owned, shared, or ghost with a halo
    /// of thickness `ghost`, in ascending rank order.
    ///
    /// The owner always appears; a neighbour appears when `coord` lies in
    /// its ghost strip. Empty wherever [`owner_of`](Self::owner_of) is `None`.
    pub fn holders(&self, coord: f64, ghost: f64) -> RankList {
        let Some(owner) = self.owner_of(coord) else {
            return smallvec![];
        };
        let mut out: RankList = smallvec![];
        if owner.0 > 0 {
            let below = &self.subdomains[owner.index() - 1];
            let high = below.hi()[self.axis];
            if coord >= high && coord < high + ghost {
                out.push(Rank(owner.0 - 1));
            }
        }
        out.push(owner);
        if owner.index() + 1 < self.subdomains.len() {
            let above = &self.subdomains[owner.index() + 1];
            let low = above.lo()[self.axis];
            if coord >= low - ghost && coord < low {
                out.push(Rank(owner.0 + 1));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strata_core::Vec3;

    fn boxed(x: f64, y: f64, z: f64) -> Aabb {
        Aabb::new(Vec3::default(), Vec3::new(x, y, z)).unwrap()
    }

    #[test]
    fn longest_axis_wins() {
        assert_eq!(select_split_axis(&boxed(10.0, 1.0, 1.0)), Axis::X);
        assert_eq!(select_split_axis(&boxed(1.0, 10.0, 1.0)), Axis::Y);
        assert_eq!(select_split_axis(&boxed(1.0, 1.0, 10.0)), Axis::Z);
    }

    #[test]
    fn tie_break_order() {
        // Z replaces any tie it is part of.
        assert_eq!(select_split_axis(&boxed(5.0, 5.0, 5.0)), Axis::Z);
        assert_eq!(select_split_axis(&boxed(5.0, 1.0, 5.0)), Axis::Z);
        assert_eq!(select_split_axis(&boxed(1.0, 5.0, 5.0)), Axis::Z);
        // X beats Y on a tie when Z is shorter.
        assert_eq!(select_split_axis(&boxed(5.0, 5.0, 1.0)), Axis::X);
    }

    #[test]
    fn zero_ranks_rejected() {
        assert_eq!(
            Partition::build(boxed(1.0, 1.0, 1.0), 0),
            Err(PartitionError::ZeroRanks)
        );
    }

    #[test]
    fn single_rank_covers_global() {
        let g = boxed(3.0, 2.0, 1.0);
        let p = Partition::build(g, 1).unwrap();
        assert_eq!(p.subdomain(Rank(0)).unwrap(), &g);
    }

    #[test]
    fn off_axis_bounds_are_global() {
        let g = Aabb::from_bounds(-1.0, 1.0, 0.0, 100.0, 3.0, 4.0).unwrap();
        let p = Partition::build(g, 10).unwrap();
        assert_eq!(p.split_axis(), Axis::Y);
        for sub in p.subdomains() {
            assert_eq!((sub.lo().x, sub.hi().x), (-1.0, 1.0));
            assert_eq!((sub.lo().z, sub.hi().z), (3.0, 4.0));
        }
        let s3 = p.subdomain(Rank(3)).unwrap();
        assert_eq!((s3.lo().y, s3.hi().y), (30.0, 40.0));
    }

    #[test]
    fn out_of_range_rank() {
        let p = Partition::build(boxed(1.0, 1.0, 1.0), 2).unwrap();
        assert_eq!(
            p.subdomain(Rank(2)),
            Err(PartitionError::RankOutOfRange {
                rank: Rank(2),
                rank_count: 2
            })
        );
    }

    #[test]
    fn owner_of_boundaries() {
        let p = Partition::build(boxed(100.0, 1.0, 1.0), 10).unwrap();
        assert_eq!(p.owner_of(0.0), Some(Rank(0)));
        assert_eq!(p.owner_of(9.999), Some(Rank(0)));
        assert_eq!(p.owner_of(10.0), Some(Rank(1)));
        assert_eq!(p.owner_of(99.999), Some(Rank(9)));
        assert_eq!(p.owner_of(100.0), None);
        assert_eq!(p.owner_of(-0.1), None);
        assert_eq!(p.owner_of(100.1), None);
        assert_eq!(p.owner_of(f64::NAN), None);
    }

    #[test]
    fn slabs_below_float_spacing_collapse() {
        let g = Aabb::from_bounds(1.0e16, 1.0e16 + 4.0, 0.0, 1.0, 0.0, 1.0).unwrap();
        let p = Partition::build(g, 8).unwrap();
        assert_eq!(p.split_axis(), Axis::X);
        let empty: Vec<_> = p.empty_slabs().collect();
        assert!(empty.contains(&Rank(0)), "{empty:?}");
        assert!(empty.len() < 8);
        // Tiling still holds; collapsed slabs just own nothing.
        for pair in p.subdomains().windows(2) {
            assert_eq!(pair[0].hi().x, pair[1].lo().x);
        }
        let owner = p.owner_of(1.0e16).unwrap();
        assert!(!empty.contains(&owner));
    }

    #[test]
    fn ordinary_partition_has_no_empty_slabs() {
        let p = Partition::build(boxed(100.0, 1.0, 1.0), 10).unwrap();
        assert_eq!(p.empty_slabs().count(), 0);
    }

    #[test]
    fn holders_include_ghost_neighbours() {
        let p = Partition::build(boxed(30.0, 1.0, 1.0), 3).unwrap();
        assert_eq!(p.holders(15.0, 1.0).as_slice(), &[Rank(1)]);
        assert_eq!(p.holders(19.5, 1.0).as_slice(), &[Rank(1), Rank(2)]);
        assert_eq!(p.holders(20.0, 1.0).as_slice(), &[Rank(1), Rank(2)]);
        assert_eq!(p.holders(10.5, 1.0).as_slice(), &[Rank(0), Rank(1)]);
        assert_eq!(p.holders(0.5, 1.0).as_slice(), &[Rank(0)]);
        assert!(p.holders(31.0, 1.0).is_empty());
    }

    proptest! {
        #[test]
        fn slabs_tile_global_extent(
            lo in -1.0e3f64..1.0e3,
            len in 1.0e-2f64..1.0e4,
            rank_count in 1u32..64,
        ) {
            let g = Aabb::from_bounds(lo, lo + len, 0.0, 1.0e-4, 0.0, 1.0e-4).unwrap();
            let p = Partition::build(g, rank_count).unwrap();
            prop_assert_eq!(p.split_axis(), Axis::X);
            let subs = p.subdomains();
            prop_assert_eq!(subs.len(), rank_count as usize);
            prop_assert_eq!(subs[0].lo().x, g.lo().x);
            prop_assert_eq!(subs[subs.len() - 1].hi().x, g.hi().x);
            for pair in subs.windows(2) {
                prop_assert_eq!(pair[0].hi().x, pair[1].lo().x);
            }
            for sub in subs {
                prop_assert!(sub.hi().x > sub.lo().x);
            }
        }

        #[test]
        fn owner_slab_contains_coord(
            frac in 0.0f64..1.0,
            rank_count in 1u32..32,
        ) {
            let g = boxed(1.0, 1.0, 73.0);
            let p = Partition::build(g, rank_count).unwrap();
            let z = frac * 73.0;
            let owner = p.owner_of(z).unwrap();
            let sub = p.subdomain(owner).unwrap();
            prop_assert!(z >= sub.lo().z && z < sub.hi().z);
        }
    }
}
