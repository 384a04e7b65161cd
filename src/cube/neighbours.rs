//! Neighbour enumeration on a [`Cube`].
//!
//! The *full* neighbourhood of a cell is the clamped `3 x 3 x 3` box around it
//! minus the cell itself (26 cells in the interior). It is scanned z outermost,
//! x innermost.
//!
//! The *unique* neighbourhood is a half-box of at most
//! [`MAX_UNIQUE_NEIGHBOURS`] cells, scanned x outermost, z innermost:
//! - the whole `3 x 3` layer at `z - 1`;
//! - in the centre layer, the row `y - 1` and the cell `(x - 1, y)`.
//!
//! Running the unique scan from every cell of a cube visits every adjacent
//! pair of cells exactly once, which is what pairwise interaction kernels
//! need.

use arrayvec::ArrayVec;
use itertools::iproduct;

use super::grid::Cube;
use super::index::CubeIndex;
use crate::skel_error::SkelError;

/// Size of the unique neighbourhood of an interior cell.
pub const MAX_UNIQUE_NEIGHBOURS: usize = 13;

impl<T, P> Cube<T, P> {
    fn full_box(&self, centre: CubeIndex) -> impl Iterator<Item = CubeIndex> + use<T, P> {
        debug_assert!(centre < self.sizes, "centre {centre} outside cube {}", self.sizes);
        let lo = centre.bound_lower(CubeIndex::ZERO);
        let hi = centre.bound_upper(self.sizes.last());
        iproduct!(lo.z()..=hi.z(), lo.y()..=hi.y(), lo.x()..=hi.x())
            .map(|(z, y, x)| CubeIndex::new(x, y, z))
            .filter(move |&idx| idx != centre)
    }

    fn unique_box(&self, centre: CubeIndex) -> impl Iterator<Item = CubeIndex> + use<T, P> {
        debug_assert!(centre < self.sizes, "centre {centre} outside cube {}", self.sizes);
        let lo = centre.bound_lower(CubeIndex::ZERO);
        let hi = centre.bound_upper_unique(self.sizes.last());
        let (cx, cy, cz) = centre.as_tuple();
        iproduct!(lo.x()..=hi.x(), lo.y()..=hi.y(), lo.z()..=hi.z())
            .filter(move |&(x, y, z)| {
                let forward_row = y == cy + 1 && z == cz;
                let forward_cell = x == cx + 1 && y == cy && z == cz;
                let itself = (x, y, z) == (cx, cy, cz);
                !(forward_row || forward_cell || itself)
            })
            .map(|(x, y, z)| CubeIndex::new(x, y, z))
    }

    /// Apply `f` to every cell of the full neighbourhood of `centre`.
    pub fn for_all_neighbours<F>(&mut self, centre: impl Into<CubeIndex>, mut f: F)
    where
        F: FnMut(&mut T),
    {
        self.for_all_neighbours_indexed(centre, |e, _| f(e));
    }

    /// Like [`for_all_neighbours`](Self::for_all_neighbours), also passing
    /// each neighbour's coordinate.
    pub fn for_all_neighbours_indexed<F>(&mut self, centre: impl Into<CubeIndex>, mut f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        for idx in self.full_box(centre.into()) {
            let n = self.offset(idx);
            f(&mut self.grid[n], idx);
        }
    }

    /// Apply `f` to every cell of the unique neighbourhood of `centre`.
    pub fn for_all_neighbours_unique<F>(&mut self, centre: impl Into<CubeIndex>, mut f: F)
    where
        F: FnMut(&mut T),
    {
        self.for_all_neighbours_unique_indexed(centre, |e, _| f(e));
    }

    pub fn for_all_neighbours_unique_indexed<F>(&mut self, centre: impl Into<CubeIndex>, mut f: F)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        for idx in self.unique_box(centre.into()) {
            let n = self.offset(idx);
            f(&mut self.grid[n], idx);
        }
    }

    /// Push a reference to every unique neighbour of `centre` onto `out`, in
    /// scan order, and return how many were pushed.
    ///
    /// Fails without pushing further once `out` is full.
    pub fn fill_neighbours_unique<'a, const CAP: usize>(
        &'a self,
        centre: impl Into<CubeIndex>,
        out: &mut ArrayVec<&'a T, CAP>,
    ) -> Result<usize, SkelError> {
        let mut pushed = 0;
        for idx in self.unique_box(centre.into()) {
            out.try_push(&self.grid[self.offset(idx)])
                .map_err(|_| SkelError::NeighbourBufferFull { capacity: CAP })?;
            pushed += 1;
        }
        Ok(pushed)
    }

    /// The unique neighbours of `centre`, in scan order.
    pub fn neighbours_unique(
        &self,
        centre: impl Into<CubeIndex>,
    ) -> ArrayVec<&T, MAX_UNIQUE_NEIGHBOURS> {
        let mut out = ArrayVec::new();
        for idx in self.unique_box(centre.into()) {
            out.push(&self.grid[self.offset(idx)]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Sequential;
    use std::collections::HashSet;

    type C = Cube<i32, Sequential>;

    fn unique_from(c: &mut C, centre: CubeIndex) -> Vec<CubeIndex> {
        let mut seen = Vec::new();
        c.for_all_neighbours_unique_indexed(centre, |_, idx| seen.push(idx));
        seen
    }

    #[test]
    fn full_neighbourhood_of_interior_cell() {
        let mut c = C::new(5, 7, 9);
        c.for_all_neighbours((1, 2, 3), |e| *e += 1);
        let mut marked = 0;
        c.view_ordered().apply_indexed(|e, idx| {
            let near = idx.x().abs_diff(1) <= 1 && idx.y().abs_diff(2) <= 1 && idx.z().abs_diff(3) <= 1;
            let expected = if near && idx != CubeIndex::new(1, 2, 3) { 1 } else { 0 };
            assert_eq!(*e, expected, "at {idx}");
            marked += *e;
        });
        assert_eq!(marked, 26);
    }

    #[test]
    fn full_neighbourhood_clamps_at_corners() {
        let mut c = C::new(5, 7, 9);
        let mut n = 0;
        c.for_all_neighbours((0, 0, 0), |_| n += 1);
        assert_eq!(n, 7);
        n = 0;
        c.for_all_neighbours((4, 6, 8), |_| n += 1);
        assert_eq!(n, 7);
        n = 0;
        c.for_all_neighbours((4, 3, 4), |_| n += 1);
        assert_eq!(n, 17);
    }

    #[test]
    fn unique_neighbourhood_of_interior_cell() {
        let mut c = C::new(5, 7, 9);
        c.for_all_neighbours_unique(CubeIndex::new(1, 2, 3), |e| *e += 1);
        let visited: [(usize, usize, usize); 13] = [
            (0, 1, 2), (0, 1, 3), (0, 2, 2), (0, 2, 3), (0, 3, 2),
            (1, 1, 2), (1, 1, 3), (1, 2, 2), (1, 3, 2),
            (2, 1, 2), (2, 1, 3), (2, 2, 2), (2, 3, 2),
        ];
        for on in visited {
            assert_eq!(c[on], 1, "expected {on:?} visited");
        }
        let skipped: [(usize, usize, usize); 7] =
            [(0, 1, 4), (0, 3, 3), (1, 2, 3), (1, 2, 4), (1, 3, 3), (2, 2, 3), (2, 3, 3)];
        for off in skipped {
            assert_eq!(c[off], 0, "expected {off:?} skipped");
        }
        let mut total = 0;
        c.view_ordered().apply(|e| total += *e);
        assert_eq!(total, MAX_UNIQUE_NEIGHBOURS as i32);
    }

    #[test]
    fn unique_scan_order_is_x_outer_z_inner() {
        let mut c = C::new(3, 3, 3);
        let seen = unique_from(&mut c, CubeIndex::new(1, 1, 1));
        assert_eq!(seen.len(), 13);
        assert_eq!(&seen[..3], &[
            CubeIndex::new(0, 0, 0),
            CubeIndex::new(0, 0, 1),
            CubeIndex::new(0, 1, 0),
        ]);
        assert_eq!(seen.last(), Some(&CubeIndex::new(2, 2, 0)));
    }

    #[test]
    fn unique_scans_cover_each_adjacent_pair_once() {
        let mut c = C::new(4, 3, 5);
        let extent = c.size();
        let mut pairs = HashSet::new();
        let mut unique_total = 0;
        let mut full_total = 0;
        for centre in CubeIndex::iter_within(extent) {
            for other in unique_from(&mut c, centre) {
                let key = if centre.linear(extent) < other.linear(extent) {
                    (centre, other)
                } else {
                    (other, centre)
                };
                assert!(pairs.insert(key), "pair {key:?} emitted twice");
                unique_total += 1;
            }
            c.for_all_neighbours(centre, |_| full_total += 1);
        }
        assert_eq!(unique_total * 2, full_total);
    }

    #[test]
    fn fill_matches_callback_order() {
        let mut c = C::new(5, 7, 9);
        c.all_ordered().apply_indexed(|e, idx| *e = idx.linear(CubeIndex::new(5, 7, 9)) as i32);
        let centre = CubeIndex::new(2, 3, 4);
        let mut via_callback = Vec::new();
        c.for_all_neighbours_unique(centre, |e| via_callback.push(*e));

        let mut buf: ArrayVec<&i32, 32> = ArrayVec::new();
        assert_eq!(c.fill_neighbours_unique(centre, &mut buf), Ok(13));
        let via_fill: Vec<i32> = buf.iter().map(|&&e| e).collect();
        assert_eq!(via_fill, via_callback);

        let via_array: Vec<i32> = c.neighbours_unique(centre).into_iter().copied().collect();
        assert_eq!(via_array, via_callback);
    }

    #[test]
    fn fill_reports_full_buffer() {
        let c = C::new(3, 3, 3);
        let mut buf: ArrayVec<&i32, 4> = ArrayVec::new();
        assert_eq!(
            c.fill_neighbours_unique((1, 1, 1), &mut buf),
            Err(SkelError::NeighbourBufferFull { capacity: 4 })
        );
        assert_eq!(buf.len(), 4);
    }
}
