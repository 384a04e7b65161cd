//! `Cube`: a dense 3-D grid over a single flat [`Block`].
//!
//! The cube owns exactly `nx * ny * nz` elements laid out x-fastest. Bulk work
//! goes through *views* ([`all`](Cube::all), [`all_ordered`](Cube::all_ordered),
//! [`plane`](Cube::plane), [`view`](Cube::view)) which borrow the storage for
//! the duration of one traversal; the borrow checker ties every view to the
//! cube it came from.
//!
//! Element access through `cube[(i, j, k)]` or `cube[idx]` is bounds-checked
//! per axis only under `debug_assertions`. In release builds a coordinate that
//! is outside the cube but still maps inside the buffer silently aliases
//! another cell; use [`Cube::try_get`] when the coordinate is untrusted.

use core::fmt::{self, Debug};
use core::ops::{Index, IndexMut};

use super::block::Block;
use super::index::CubeIndex;
use super::mapping::{
    ConstFullMapping, ConstOrderedMapping, FullMapping, OrderedMapping, PlaneMapping,
};
use crate::debug_invariants::DebugInvariants;
use crate::exec::{DefaultPolicy, ExecutionPolicy};
use crate::skel_error::SkelError;

/// Dense 3-D grid of `T` scheduled by policy `P`.
pub struct Cube<T, P = DefaultPolicy> {
    pub(super) sizes: CubeIndex,
    pub(super) grid: Block<T, P>,
}

impl<T, P> Debug for Cube<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("sizes", &self.sizes)
            .field("grid", &self.grid)
            .finish()
    }
}

impl<T: Default, P> Cube<T, P> {
    /// A cube of `nx * ny * nz` default elements.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self::from_extent(CubeIndex::new(nx, ny, nz))
    }

    /// A cube whose extent is given as an index.
    pub fn from_extent(sizes: CubeIndex) -> Self {
        log::trace!("building cube with extent {sizes}");
        let cube = Cube {
            sizes,
            grid: Block::new(sizes.volume()),
        };
        crate::debug_invariants!(cube.validate_invariants(), "Cube::from_extent");
        cube
    }
}

impl<T, P> Cube<T, P> {
    /// Exchange extents and storage with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.sizes, &mut other.sizes);
        self.grid.swap(&mut other.grid);
    }

    #[inline]
    pub fn size_x(&self) -> usize {
        self.sizes.x()
    }

    #[inline]
    pub fn size_y(&self) -> usize {
        self.sizes.y()
    }

    #[inline]
    pub fn size_z(&self) -> usize {
        self.sizes.z()
    }

    /// Extent along a compile-time axis.
    #[inline]
    pub fn size_along<const AXIS: usize>(&self) -> usize {
        self.sizes.get::<AXIS>()
    }

    /// Extent of the cube as an index.
    #[inline]
    pub fn size(&self) -> CubeIndex {
        self.sizes
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.volume()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(super) fn offset(&self, idx: CubeIndex) -> usize {
        idx.linear(self.sizes)
    }

    /// Checked shared access.
    pub fn get(&self, idx: impl Into<CubeIndex>) -> Option<&T> {
        let idx = idx.into();
        if idx < self.sizes {
            Some(&self.grid[self.offset(idx)])
        } else {
            None
        }
    }

    /// Checked exclusive access.
    pub fn get_mut(&mut self, idx: impl Into<CubeIndex>) -> Option<&mut T> {
        let idx = idx.into();
        if idx < self.sizes {
            let n = self.offset(idx);
            Some(&mut self.grid[n])
        } else {
            None
        }
    }

    /// Like [`get`](Self::get) but reports the failing coordinate.
    pub fn try_get(&self, idx: impl Into<CubeIndex>) -> Result<&T, SkelError> {
        let idx = idx.into();
        self.get(idx).ok_or(SkelError::IndexOutOfBounds {
            index: idx,
            extent: self.sizes,
        })
    }

    /// Like [`get_mut`](Self::get_mut) but reports the failing coordinate.
    pub fn try_get_mut(&mut self, idx: impl Into<CubeIndex>) -> Result<&mut T, SkelError> {
        let idx = idx.into();
        let extent = self.sizes;
        self.get_mut(idx)
            .ok_or(SkelError::IndexOutOfBounds { index: idx, extent })
    }

    /// Sequential view over the plane `coord[AXIS] == p`.
    pub fn plane<const AXIS: usize>(&mut self, p: usize) -> PlaneMapping<'_, T, P, AXIS> {
        debug_assert!(
            p < self.sizes.get::<AXIS>(),
            "plane {p} on axis {AXIS} outside extent {}",
            self.sizes
        );
        PlaneMapping::new(&mut self.grid, p, self.sizes)
    }
}

impl<T, P: ExecutionPolicy> Cube<T, P> {
    /// Unordered view over every cell.
    pub fn all(&mut self) -> FullMapping<'_, T, P> {
        FullMapping::new(&mut self.grid, self.sizes)
    }

    /// Strictly ordered, single-threaded view over every cell.
    pub fn all_ordered(&mut self) -> OrderedMapping<'_, T, P> {
        OrderedMapping::new(&mut self.grid, self.sizes)
    }

    /// Unordered read-only view.
    pub fn view(&self) -> ConstFullMapping<'_, T, P> {
        ConstFullMapping::new(&self.grid, self.sizes)
    }

    /// Ordered read-only view.
    pub fn view_ordered(&self) -> ConstOrderedMapping<'_, T, P> {
        ConstOrderedMapping::new(&self.grid, self.sizes)
    }
}

impl<T, P> Index<CubeIndex> for Cube<T, P> {
    type Output = T;

    #[inline]
    fn index(&self, idx: CubeIndex) -> &T {
        debug_assert!(idx < self.sizes, "index {idx} outside cube {}", self.sizes);
        &self.grid[self.offset(idx)]
    }
}

impl<T, P> IndexMut<CubeIndex> for Cube<T, P> {
    #[inline]
    fn index_mut(&mut self, idx: CubeIndex) -> &mut T {
        debug_assert!(idx < self.sizes, "index {idx} outside cube {}", self.sizes);
        let n = self.offset(idx);
        &mut self.grid[n]
    }
}

impl<T, P> Index<(usize, usize, usize)> for Cube<T, P> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        &self[CubeIndex::new(i, j, k)]
    }
}

impl<T, P> IndexMut<(usize, usize, usize)> for Cube<T, P> {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        &mut self[CubeIndex::new(i, j, k)]
    }
}

/// One line per cell, `(x,y,z)= value`, z outermost.
impl<T: fmt::Display, P> fmt::Display for Cube<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in CubeIndex::iter_within(self.sizes) {
            writeln!(
                f,
                "({},{},{})= {}",
                idx.x(),
                idx.y(),
                idx.z(),
                self.grid[self.offset(idx)]
            )?;
        }
        Ok(())
    }
}

impl<T, P> DebugInvariants for Cube<T, P> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Cube invalid");
    }

    fn validate_invariants(&self) -> Result<(), SkelError> {
        if self.grid.len() != self.sizes.volume() {
            return Err(SkelError::InvariantViolation(format!(
                "cube extent {} needs {} cells but storage holds {}",
                self.sizes,
                self.sizes.volume(),
                self.grid.len()
            )));
        }
        Ok(())
    }
}
