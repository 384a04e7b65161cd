//! `CubeIndex`: a non-negative 3-D coordinate with bound-clamping arithmetic
//!
//! A `CubeIndex` is used both as a position inside a cube and as the extent
//! of a cube (`nx`, `ny`, `nz`). Linear addressing is always x-fastest:
//! `x + nx * (y + ny * z)`. That layout is shared by [`Block`](super::block::Block),
//! [`Cube`](super::grid::Cube) and every execution policy, so iteration order
//! agrees everywhere.
//!
//! # Ordering
//! `CubeIndex` is only *partially* ordered: `a < b` holds iff every component
//! of `a` is less than the matching component of `b`. Two indices where some
//! components are smaller and others larger are incomparable. This is what
//! the bounds checks rely on (`idx < extent`), and it is deliberately not
//! lexicographic.

use std::cmp::Ordering;
use std::fmt;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// A 3-component coordinate or extent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CubeIndex([usize; 3]);

impl CubeIndex {
    /// The origin `(0, 0, 0)`.
    pub const ZERO: CubeIndex = CubeIndex([0, 0, 0]);

    /// Builds an index from its three components.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        CubeIndex([x, y, z])
    }

    #[inline]
    pub const fn x(self) -> usize {
        self.0[0]
    }

    #[inline]
    pub const fn y(self) -> usize {
        self.0[1]
    }

    #[inline]
    pub const fn z(self) -> usize {
        self.0[2]
    }

    /// Component selected by a compile-time axis (`0`, `1` or `2`).
    ///
    /// ```rust
    /// # use skelgrid::cube::index::CubeIndex;
    /// let i = CubeIndex::new(3, 4, 2);
    /// assert_eq!(i.get::<1>(), 4);
    /// ```
    #[inline]
    pub const fn get<const AXIS: usize>(self) -> usize {
        const { assert!(AXIS < 3, "CubeIndex axis must be 0, 1 or 2") };
        self.0[AXIS]
    }

    #[inline]
    pub const fn as_tuple(self) -> (usize, usize, usize) {
        (self.0[0], self.0[1], self.0[2])
    }

    /// Number of cells in a cube of this extent.
    #[inline]
    pub const fn volume(self) -> usize {
        self.0[0] * self.0[1] * self.0[2]
    }

    /// Largest valid coordinate inside a cube of this extent.
    ///
    /// Saturates at zero on empty axes.
    #[inline]
    pub const fn last(self) -> Self {
        CubeIndex([
            self.0[0].saturating_sub(1),
            self.0[1].saturating_sub(1),
            self.0[2].saturating_sub(1),
        ])
    }

    /// Clamps a signed candidate into `[0, self)` on each axis.
    ///
    /// Negative components become `0`; components at or past the bound become
    /// `bound - 1`.
    pub fn clamp_box(self, candidate: (isize, isize, isize)) -> Self {
        let (i, j, k) = candidate;
        let clamp = |c: isize, bound: usize| -> usize {
            let c = usize::try_from(c).unwrap_or(0);
            if c >= bound { bound.saturating_sub(1) } else { c }
        };
        CubeIndex([
            clamp(i, self.0[0]),
            clamp(j, self.0[1]),
            clamp(k, self.0[2]),
        ])
    }

    /// Lower corner of a neighbourhood: `c - 1` per axis, or `b` when `c <= b`.
    pub fn bound_lower(self, b: CubeIndex) -> Self {
        CubeIndex([
            bound_lower(self.0[0], b.0[0]),
            bound_lower(self.0[1], b.0[1]),
            bound_lower(self.0[2], b.0[2]),
        ])
    }

    /// Upper corner of a neighbourhood: `c + 1` per axis, or `b` when `c >= b`.
    pub fn bound_upper(self, b: CubeIndex) -> Self {
        CubeIndex([
            bound_upper(self.0[0], b.0[0]),
            bound_upper(self.0[1], b.0[1]),
            bound_upper(self.0[2], b.0[2]),
        ])
    }

    /// Like [`bound_upper`](Self::bound_upper) on x and y, but z never grows:
    /// it is `min(c, b)`. This half-box is what lets the unique neighbour
    /// scan emit every adjacent pair exactly once.
    pub fn bound_upper_unique(self, b: CubeIndex) -> Self {
        CubeIndex([
            bound_upper(self.0[0], b.0[0]),
            bound_upper(self.0[1], b.0[1]),
            self.0[2].min(b.0[2]),
        ])
    }

    /// `true` iff every component is strictly less than `other`'s.
    #[inline]
    pub fn all_lt(self, other: CubeIndex) -> bool {
        self.0[0] < other.0[0] && self.0[1] < other.0[1] && self.0[2] < other.0[2]
    }

    /// Flat position of `self` inside a cube of `extent` (x fastest).
    #[inline]
    pub const fn linear(self, extent: CubeIndex) -> usize {
        self.0[0] + extent.0[0] * (self.0[1] + extent.0[1] * self.0[2])
    }

    /// Inverse of [`linear`](Self::linear).
    #[inline]
    pub fn from_linear(n: usize, extent: CubeIndex) -> Self {
        debug_assert!(n < extent.volume(), "linear index {n} outside extent {extent}");
        let (nx, ny) = (extent.0[0], extent.0[1]);
        CubeIndex([n % nx, (n / nx) % ny, n / (nx * ny)])
    }

    /// Every coordinate of a cube of `extent`, in linear (x-fastest) order.
    pub fn iter_within(extent: CubeIndex) -> impl Iterator<Item = CubeIndex> + Clone {
        iproduct!(0..extent.z(), 0..extent.y(), 0..extent.x())
            .map(|(z, y, x)| CubeIndex::new(x, y, z))
    }
}

#[inline]
fn bound_lower(c: usize, b: usize) -> usize {
    if c <= b { b } else { c - 1 }
}

#[inline]
fn bound_upper(c: usize, b: usize) -> usize {
    if c >= b { b } else { c + 1 }
}

impl PartialOrd for CubeIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.all_lt(*other) {
            Some(Ordering::Less)
        } else if other.all_lt(*self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions
// -----------------------------------------------------------------------------

impl From<(usize, usize, usize)> for CubeIndex {
    #[inline]
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        CubeIndex([x, y, z])
    }
}

impl From<[usize; 3]> for CubeIndex {
    #[inline]
    fn from(a: [usize; 3]) -> Self {
        CubeIndex(a)
    }
}

impl From<CubeIndex> for (usize, usize, usize) {
    #[inline]
    fn from(i: CubeIndex) -> Self {
        i.as_tuple()
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for CubeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CubeIndex")
            .field(&self.0[0])
            .field(&self.0[1])
            .field(&self.0[2])
            .finish()
    }
}

impl fmt::Display for CubeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {} , {} , {} )", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_size, assert_impl_all};

    assert_eq_size!(CubeIndex, [usize; 3]);
    assert_impl_all!(CubeIndex: Copy, Send, Sync, std::hash::Hash);
}
