//! Flat, fixed-size element buffer backing a [`Cube`](super::grid::Cube).
//!
//! `Block` owns its elements contiguously and forwards bulk operations to the
//! execution policy `P`. It knows nothing about 3-D shape except where a caller
//! hands it an extent: the indexed and plane operations use the x-fastest
//! layout of [`CubeIndex::linear`].
//!
//! `Block` has no internal synchronisation. Unordered application is safe only
//! because the policy hands disjoint elements to its workers.

use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use super::index::CubeIndex;
use crate::exec::ExecutionPolicy;

/// Contiguous storage for `T` scheduled by policy `P`. Move-only.
pub struct Block<T, P> {
    mem: Box<[T]>,
    _policy: PhantomData<fn() -> P>,
}

impl<T, P> Debug for Block<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block").field("len", &self.mem.len()).finish()
    }
}

impl<T: Default, P> Block<T, P> {
    /// Allocate `n` default-initialised elements.
    pub fn new(n: usize) -> Self {
        log::trace!("allocating block of {n} elements");
        Block {
            mem: (0..n).map(|_| T::default()).collect(),
            _policy: PhantomData,
        }
    }
}

impl<T, P> Block<T, P> {
    #[inline]
    pub fn len(&self) -> usize {
        self.mem.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.mem
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.mem
    }

    /// Exchange buffers in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.mem, &mut other.mem);
    }

    /// Visit the plane `coord[AXIS] == p` of a cube of `extent`, passing each
    /// element's coordinate.
    ///
    /// Addressing follows the flat layout:
    /// - `AXIS == 0`: start at `p`, stride `nx` through the whole volume;
    /// - `AXIS == 1`: one run of `nx` elements per z-layer, at `nx * (z * ny + p)`;
    /// - `AXIS == 2`: a single contiguous run of `nx * ny` elements at `p * nx * ny`.
    pub fn apply_plane_indexed<const AXIS: usize, F>(&mut self, mut f: F, p: usize, extent: CubeIndex)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        const { assert!(AXIS < 3, "plane axis must be 0, 1 or 2") };
        let (nx, ny, nz) = extent.as_tuple();
        let volume = extent.volume();
        debug_assert!(volume <= self.mem.len(), "extent {extent} exceeds block");
        if volume == 0 {
            return;
        }
        match AXIS {
            0 => {
                debug_assert!(p < nx, "x-plane {p} outside extent {extent}");
                for (m, e) in self.mem[p..volume].iter_mut().step_by(nx).enumerate() {
                    f(e, CubeIndex::new(p, m % ny, m / ny));
                }
            }
            1 => {
                debug_assert!(p < ny, "y-plane {p} outside extent {extent}");
                for z in 0..nz {
                    let begin = nx * (z * ny + p);
                    for (x, e) in self.mem[begin..begin + nx].iter_mut().enumerate() {
                        f(e, CubeIndex::new(x, p, z));
                    }
                }
            }
            _ => {
                debug_assert!(p < nz, "z-plane {p} outside extent {extent}");
                let begin = p * nx * ny;
                for (m, e) in self.mem[begin..begin + nx * ny].iter_mut().enumerate() {
                    f(e, CubeIndex::new(m % nx, m / nx, p));
                }
            }
        }
    }

    /// [`apply_plane_indexed`](Self::apply_plane_indexed) without coordinates.
    #[inline]
    pub fn apply_plane<const AXIS: usize, F>(&mut self, mut f: F, p: usize, extent: CubeIndex)
    where
        F: FnMut(&mut T),
    {
        self.apply_plane_indexed::<AXIS, _>(|e, _| f(e), p, extent);
    }
}

impl<T, P: ExecutionPolicy> Block<T, P> {
    /// Apply `f` to the first `n` elements, unordered.
    #[inline]
    pub fn apply<F>(&mut self, f: F, n: usize)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        P::apply(f, &mut self.mem[..n]);
    }

    /// Apply `f` to the first `n` elements in ascending order.
    #[inline]
    pub fn apply_ordered<F>(&mut self, f: F, n: usize)
    where
        F: FnMut(&mut T),
    {
        P::apply_ordered(f, &mut self.mem[..n]);
    }

    /// Apply `f` to every cell of `extent` with its coordinate, unordered.
    #[inline]
    pub fn apply_indexed<F>(&mut self, f: F, extent: CubeIndex)
    where
        T: Send,
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        P::apply_indexed(f, &mut self.mem[..extent.volume()], extent);
    }

    /// Apply `f` to every cell of `extent` with its coordinate, in linear order.
    #[inline]
    pub fn apply_ordered_indexed<F>(&mut self, f: F, extent: CubeIndex)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        P::apply_ordered_indexed(f, &mut self.mem[..extent.volume()], extent);
    }

    #[inline]
    pub fn apply_ref<F>(&self, f: F, n: usize)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        P::apply_ref(f, &self.mem[..n]);
    }

    #[inline]
    pub fn apply_ref_ordered<F>(&self, f: F, n: usize)
    where
        F: FnMut(&T),
    {
        P::apply_ref_ordered(f, &self.mem[..n]);
    }

    #[inline]
    pub fn apply_ref_indexed<F>(&self, f: F, extent: CubeIndex)
    where
        T: Sync,
        F: Fn(&T, CubeIndex) + Sync + Send,
    {
        P::apply_ref_indexed(f, &self.mem[..extent.volume()], extent);
    }

    #[inline]
    pub fn apply_ref_ordered_indexed<F>(&self, f: F, extent: CubeIndex)
    where
        F: FnMut(&T, CubeIndex),
    {
        P::apply_ref_ordered_indexed(f, &self.mem[..extent.volume()], extent);
    }
}

impl<T, P> Index<usize> for Block<T, P> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.mem[i]
    }
}

impl<T, P> IndexMut<usize> for Block<T, P> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.mem[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Sequential;

    type B = Block<i32, Sequential>;

    fn plane_hits<const AXIS: usize>(extent: CubeIndex, p: usize) -> Vec<CubeIndex> {
        let mut b = B::new(extent.volume());
        let mut hits = Vec::new();
        b.apply_plane_indexed::<AXIS, _>(|e, idx| {
            *e = 1;
            hits.push(idx);
        }, p, extent);
        // the reported coordinate must be the cell actually written
        for idx in &hits {
            assert_eq!(b[idx.linear(extent)], 1);
        }
        assert_eq!(b.as_slice().iter().filter(|&&e| e == 1).count(), hits.len());
        hits
    }

    #[test]
    fn new_is_default_initialised() {
        let b = B::new(8);
        assert_eq!(b.len(), 8);
        assert!(b.as_slice().iter().all(|&e| e == 0));
    }

    #[test]
    fn apply_limits_to_prefix() {
        let mut b = B::new(6);
        b.apply(|e| *e = 7, 4);
        assert_eq!(b.as_slice(), &[7, 7, 7, 7, 0, 0]);
    }

    #[test]
    fn planes_cover_exactly_their_slice() {
        let extent = CubeIndex::new(3, 2, 4);
        for p in 0..3 {
            let hits = plane_hits::<0>(extent, p);
            assert_eq!(hits.len(), 2 * 4);
            assert!(hits.iter().all(|i| i.x() == p));
        }
        for p in 0..2 {
            let hits = plane_hits::<1>(extent, p);
            assert_eq!(hits.len(), 3 * 4);
            assert!(hits.iter().all(|i| i.y() == p));
        }
        for p in 0..4 {
            let hits = plane_hits::<2>(extent, p);
            assert_eq!(hits.len(), 3 * 2);
            assert!(hits.iter().all(|i| i.z() == p));
        }
    }

    #[test]
    fn swap_exchanges_buffers() {
        let mut a = B::new(2);
        let mut b = B::new(5);
        a.apply_ordered(|e| *e = 1, 2);
        a.swap(&mut b);
        assert_eq!(a.len(), 5);
        assert_eq!(b.as_slice(), &[1, 1]);
    }
}
