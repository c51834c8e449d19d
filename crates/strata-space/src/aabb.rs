//! Axis-aligned bounding boxes.

use std::fmt;
use strata_core::{Axis, PartitionError, Vec3};

/// An axis-aligned box `[lo, hi)` in simulation space.
///
/// Used both for the global domain and for each rank's subdomain.
/// [`Aabb::new`] enforces `hi > lo` on every axis with finite bounds.
/// Subdomains produced by [`Partition`](crate::Partition) satisfy
/// `hi >= lo` only: a slab narrower than the float spacing at its bounds
/// collapses to zero width (see
/// [`Partition::empty_slabs`](crate::Partition::empty_slabs)).
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Vec3};
/// use strata_space::Aabb;
///
/// let b = Aabb::new(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(5.0, 5.0, 100.0)).unwrap();
/// assert_eq!(b.extent(Axis::Z), 100.0);
/// assert!(b.contains(Vec3::new(0.0, 0.0, 50.0)));
///
/// // Degenerate extents are rejected.
/// assert!(Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    lo: Vec3,
    hi: Vec3,
}

impl Aabb {
    /// Create a box, validating every axis.
    ///
    /// Returns `Err(PartitionError::NonFiniteBound)` if a bound is NaN or
    /// infinite, or `Err(PartitionError::InvalidExtent)` for the first axis
    /// (in X, Y, Z order) with `hi <= lo`.
    pub fn new(lo: Vec3, hi: Vec3) -> Result<Self, PartitionError> {
        for axis in Axis::ALL {
            if !lo[axis].is_finite() || !hi[axis].is_finite() {
                return Err(PartitionError::NonFiniteBound { axis });
            }
            if hi[axis] <= lo[axis] {
                return Err(PartitionError::InvalidExtent {
                    axis,
                    lo: lo[axis],
                    hi: hi[axis],
                });
            }
        }
        Ok(Self { lo, hi })
    }

    /// Create a box from per-axis `(lo, hi)` pairs in X, Y, Z order.
    pub fn from_bounds(
        xlo: f64,
        xhi: f64,
        ylo: f64,
        yhi: f64,
        zlo: f64,
        zhi: f64,
    ) -> Result<Self, PartitionError> {
        Self::new(Vec3::new(xlo, ylo, zlo), Vec3::new(xhi, yhi, zhi))
    }

    /// Lower corner.
    pub fn lo(&self) -> Vec3 {
        self.lo
    }

    /// Upper corner.
    pub fn hi(&self) -> Vec3 {
        self.hi
    }

    /// `hi - lo` along `axis`. Positive for boxes from [`Aabb::new`]; may be
    /// zero on the split axis of a collapsed subdomain.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.hi[axis] - self.lo[axis]
    }

    /// Half-open containment test on every axis.
    pub fn contains(&self, p: Vec3) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| p[a] >= self.lo[a] && p[a] < self.hi[a])
    }

    /// Copy of `self` with the `[lo, hi)` interval along `axis` replaced.
    ///
    /// Crate-internal: the partition builder only guarantees `hi >= lo`.
    pub(crate) fn with_interval(mut self, axis: Axis, lo: f64, hi: f64) -> Self {
        self.lo[axis] = lo;
        self.hi[axis] = hi;
        self
    }
}

impl fmt::Display for Aabb {
    /// One line per axis: `\t<A>: <lo> to <hi>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in Axis::ALL {
            writeln!(f, "\t{axis}: {} to {}", self.lo[axis], self.hi[axis])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_each_degenerate_axis() {
        let lo = Vec3::new(0.0, 0.0, 0.0);
        for axis in Axis::ALL {
            let hi = Vec3::new(1.0, 1.0, 1.0).with(axis, 0.0);
            match Aabb::new(lo, hi) {
                Err(PartitionError::InvalidExtent { axis: a, .. }) => assert_eq!(a, axis),
                other => panic!("expected InvalidExtent on {axis}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_inverted_axis() {
        match Aabb::from_bounds(0.0, 1.0, 0.0, 1.0, 3.0, 2.0) {
            Err(PartitionError::InvalidExtent { axis: Axis::Z, lo, hi }) => {
                assert_eq!((lo, hi), (3.0, 2.0));
            }
            other => panic!("expected InvalidExtent on Z, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_bounds() {
        match Aabb::from_bounds(0.0, f64::INFINITY, 0.0, 1.0, 0.0, 1.0) {
            Err(PartitionError::NonFiniteBound { axis: Axis::X }) => {}
            other => panic!("expected NonFiniteBound on X, got {other:?}"),
        }
        match Aabb::from_bounds(0.0, 1.0, f64::NAN, 1.0, 0.0, 1.0) {
            Err(PartitionError::NonFiniteBound { axis: Axis::Y }) => {}
            other => panic!("expected NonFiniteBound on Y, got {other:?}"),
        }
    }

    #[test]
    fn contains_is_half_open() {
        let b = Aabb::from_bounds(0.0, 1.0, 0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(b.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert!(!b.contains(Vec3::new(1.0, 0.5, 0.5)));
        assert!(!b.contains(Vec3::new(0.5, -0.1, 0.5)));
    }

    #[test]
    fn display_lists_axes() {
        let b = Aabb::from_bounds(-5.0, 5.0, -5.0, 5.0, 0.0, 100.0).unwrap();
        assert_eq!(
            b.to_string(),
            "\tX: -5 to 5\n\tY: -5 to 5\n\tZ: 0 to 100\n"
        );
    }
}
