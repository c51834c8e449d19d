//! Spatial axes and three-component points.

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the three spatial axes.
///
/// The discriminant is the component index used by [`Vec3`] indexing,
/// so `Axis::X as usize == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First component.
    X = 0,
    /// Second component.
    Y = 1,
    /// Third component.
    Z = 2,
}

impl Axis {
    /// All axes in evaluation order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (`0`, `1`, or `2`).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index). Returns `None` for indices above 2.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// A point (or extent) in 3-D simulation space.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Vec3};
///
/// let p = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(p[Axis::Y], 2.0);
/// assert_eq!(p.get(Axis::Z), 3.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a point from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component along `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        self[axis]
    }

    /// Copy of `self` with the component along `axis` replaced.
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self[axis] = value;
        self
    }

    /// `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Index<Axis> for Vec3 {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for Vec3 {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}
