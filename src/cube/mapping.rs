//! Views over a cube's storage.
//!
//! A view borrows the [`Block`] of a [`Cube`](super::grid::Cube) together with
//! the traversal parameters (extent, plane axis and offset) and re-exposes only
//! `apply` / `apply_indexed`. Views never own storage and cannot outlive the
//! cube they were taken from.

use core::fmt::{self, Debug};

use super::block::Block;
use super::index::CubeIndex;
use crate::exec::ExecutionPolicy;
use crate::mapping::{IndexedMapping, IndexedSequentialMapping, Mapping, SequentialMapping};

/// Unordered view over every cell; callbacks may run concurrently.
pub struct FullMapping<'a, T, P> {
    storage: &'a mut Block<T, P>,
    extent: CubeIndex,
}

impl<'a, T, P: ExecutionPolicy> FullMapping<'a, T, P> {
    pub(crate) fn new(storage: &'a mut Block<T, P>, extent: CubeIndex) -> Self {
        FullMapping { storage, extent }
    }

    pub fn extent(&self) -> CubeIndex {
        self.extent
    }

    /// Apply `f` to every cell, in no particular order.
    pub fn apply<F>(&mut self, f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        self.storage.apply(f, self.extent.volume());
    }

    /// Apply `f` to every cell with its coordinate, in no particular order.
    pub fn apply_indexed<F>(&mut self, f: F)
    where
        T: Send,
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        self.storage.apply_indexed(f, self.extent);
    }
}

/// Ordered view: callbacks run one at a time in ascending linear order.
pub struct OrderedMapping<'a, T, P> {
    storage: &'a mut Block<T, P>,
    extent: CubeIndex,
}

impl<'a, T, P: ExecutionPolicy> OrderedMapping<'a, T, P> {
    pub(crate) fn new(storage: &'a mut Block<T, P>, extent: CubeIndex) -> Self {
        OrderedMapping { storage, extent }
    }

    pub fn extent(&self) -> CubeIndex {
        self.extent
    }

    pub fn apply<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.storage.apply_ordered(f, self.extent.volume());
    }

    pub fn apply_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        self.storage.apply_ordered_indexed(f, self.extent);
    }
}

/// Read-only unordered view.
pub struct ConstFullMapping<'a, T, P> {
    storage: &'a Block<T, P>,
    extent: CubeIndex,
}

impl<'a, T, P: ExecutionPolicy> ConstFullMapping<'a, T, P> {
    pub(crate) fn new(storage: &'a Block<T, P>, extent: CubeIndex) -> Self {
        ConstFullMapping { storage, extent }
    }

    pub fn apply<F>(&self, f: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        self.storage.apply_ref(f, self.extent.volume());
    }

    pub fn apply_indexed<F>(&self, f: F)
    where
        T: Sync,
        F: Fn(&T, CubeIndex) + Sync + Send,
    {
        self.storage.apply_ref_indexed(f, self.extent);
    }
}

/// Read-only ordered view.
pub struct ConstOrderedMapping<'a, T, P> {
    storage: &'a Block<T, P>,
    extent: CubeIndex,
}

impl<'a, T, P: ExecutionPolicy> ConstOrderedMapping<'a, T, P> {
    pub(crate) fn new(storage: &'a Block<T, P>, extent: CubeIndex) -> Self {
        ConstOrderedMapping { storage, extent }
    }

    pub fn apply<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.storage.apply_ref_ordered(f, self.extent.volume());
    }

    pub fn apply_indexed<F>(&self, f: F)
    where
        F: FnMut(&T, CubeIndex),
    {
        self.storage.apply_ref_ordered_indexed(f, self.extent);
    }
}

/// View over the plane `coord[AXIS] == index`. Always sequential.
pub struct PlaneMapping<'a, T, P, const AXIS: usize> {
    storage: &'a mut Block<T, P>,
    index: usize,
    extent: CubeIndex,
}

impl<'a, T, P, const AXIS: usize> PlaneMapping<'a, T, P, AXIS> {
    pub(crate) fn new(storage: &'a mut Block<T, P>, index: usize, extent: CubeIndex) -> Self {
        PlaneMapping {
            storage,
            index,
            extent,
        }
    }

    /// Fixed coordinate of the plane along `AXIS`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells in the plane.
    pub fn len(&self) -> usize {
        match AXIS {
            0 => self.extent.y() * self.extent.z(),
            1 => self.extent.x() * self.extent.z(),
            _ => self.extent.x() * self.extent.y(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn apply<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.storage
            .apply_plane::<AXIS, F>(f, self.index, self.extent);
    }

    pub fn apply_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        self.storage
            .apply_plane_indexed::<AXIS, F>(f, self.index, self.extent);
    }
}

macro_rules! impl_view_debug {
    ($($view:ident),*) => {
        $(
            impl<T, P> Debug for $view<'_, T, P> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($view))
                        .field("extent", &self.extent)
                        .finish_non_exhaustive()
                }
            }
        )*
    };
}

impl_view_debug!(FullMapping, OrderedMapping, ConstFullMapping, ConstOrderedMapping);

impl<T, P, const AXIS: usize> Debug for PlaneMapping<'_, T, P, AXIS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaneMapping")
            .field("axis", &AXIS)
            .field("index", &self.index)
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Mapping contract
// -----------------------------------------------------------------------------

impl<T: Send, P: ExecutionPolicy> Mapping for FullMapping<'_, T, P> {
    type Element = T;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        FullMapping::apply(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> IndexedMapping for FullMapping<'_, T, P> {
    fn apply_indexed<F>(&mut self, f: F)
    where
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        FullMapping::apply_indexed(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> Mapping for OrderedMapping<'_, T, P> {
    type Element = T;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        OrderedMapping::apply(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> IndexedMapping for OrderedMapping<'_, T, P> {
    fn apply_indexed<F>(&mut self, f: F)
    where
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        OrderedMapping::apply_indexed(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> SequentialMapping for OrderedMapping<'_, T, P> {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        OrderedMapping::apply(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> IndexedSequentialMapping for OrderedMapping<'_, T, P> {
    fn apply_ordered_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        OrderedMapping::apply_indexed(self, f);
    }
}

impl<T: Send, P, const AXIS: usize> Mapping for PlaneMapping<'_, T, P, AXIS> {
    type Element = T;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        PlaneMapping::apply(self, f);
    }
}

impl<T: Send, P, const AXIS: usize> IndexedMapping for PlaneMapping<'_, T, P, AXIS> {
    fn apply_indexed<F>(&mut self, f: F)
    where
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        PlaneMapping::apply_indexed(self, f);
    }
}

impl<T: Send, P, const AXIS: usize> SequentialMapping for PlaneMapping<'_, T, P, AXIS> {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        PlaneMapping::apply(self, f);
    }
}

impl<T: Send, P, const AXIS: usize> IndexedSequentialMapping for PlaneMapping<'_, T, P, AXIS> {
    fn apply_ordered_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        PlaneMapping::apply_indexed(self, f);
    }
}
