//! Free-standing skeletons over any [`Mapping`].
//!
//! Each skeleton consumes a view built on demand (`cube.all()`,
//! `cube.plane::<2>(0)`, `list.all()`, or `&mut chunked_list`) and forwards
//! to it, so one kernel can be written against the traits and run on any
//! backing store.

use crate::cube::index::CubeIndex;
use crate::mapping::{
    IndexedMapping, IndexedSequentialMapping, Mapping, PairMapping, SequentialMapping,
};

/// Apply `f` to every element of `m`.
pub fn apply<M, F>(mut m: M, f: F)
where
    M: Mapping,
    F: Fn(&mut M::Element) + Sync + Send,
{
    m.apply(f);
}

/// Apply `f` to every element of `m` together with its coordinate.
pub fn apply_indexed<M, F>(mut m: M, f: F)
where
    M: IndexedMapping,
    F: Fn(&mut M::Element, CubeIndex) + Sync + Send,
{
    m.apply_indexed(f);
}

/// Apply `f` to every element of `m` one at a time, in the view's order.
///
/// Unlike [`apply`], `f` may capture mutable state.
pub fn apply_ordered<M, F>(mut m: M, f: F)
where
    M: SequentialMapping,
    F: FnMut(&mut M::Element),
{
    m.apply_ordered(f);
}

pub fn apply_ordered_indexed<M, F>(mut m: M, f: F)
where
    M: IndexedSequentialMapping,
    F: FnMut(&mut M::Element, CubeIndex),
{
    m.apply_ordered_indexed(f);
}

/// Pair every element of `m` with each earlier element of `m`, then with the
/// collections `mf(x)` for every `x` of `other`.
///
/// See [`ListStorage::apply_cartesian_unique`](crate::list::ListStorage::apply_cartesian_unique)
/// for the locking order.
pub fn apply_cartesian_unique<M, B, O, MF>(mut m: M, bf: B, mut other: O, mf: MF)
where
    M: PairMapping,
    B: Fn(&mut M::Element, &mut M::Element) + Sync + Send,
    O: Mapping,
    MF: for<'x> Fn(&'x mut O::Element) -> crate::list::ListMapping<'x, M::Element, M::Policy>
        + Sync
        + Send,
{
    m.apply_cartesian_unique(bf, &mut other, mf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::grid::Cube;
    use crate::exec::Sequential;
    use crate::list::{ChunkedList, List};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn apply_works_on_cube_views_and_lists() {
        let mut c = Cube::<u32, Sequential>::new(3, 2, 2);
        apply(c.all(), |e| *e += 2);
        apply(c.plane::<0>(1), |e| *e += 1);
        let mut sum = 0;
        c.view_ordered().apply(|e| sum += *e);
        assert_eq!(sum, 12 * 2 + 4);

        let mut list: ChunkedList<u32> = (0..20).collect();
        apply(&mut list, |e| *e *= 2);
        assert_eq!(list[19], 38);

        let l: List<u32, Sequential> = (0..5).collect();
        apply(l.all(), |e| *e += 1);
        assert_eq!(*l.at(0).unwrap(), 1);
    }

    #[test]
    fn apply_indexed_fills_coordinate_sum() {
        let mut c = Cube::<usize, Sequential>::new(3, 2, 2);
        apply_indexed(c.all(), |e, i| *e = i.x() + i.y() + i.z());
        assert_eq!(c[(2, 1, 1)], 4);
        assert_eq!(c[(0, 0, 0)], 0);
    }

    #[test]
    fn apply_ordered_threads_state_through_any_sequential_view() {
        let mut c = Cube::<u32, Sequential>::new(3, 2, 2);
        let mut n = 0;
        apply_ordered(c.all_ordered(), |e| {
            *e = n;
            n += 1;
        });
        assert_eq!(n, 12);
        assert_eq!(c[(2, 1, 1)], 11);

        let mut acc = 0;
        apply_ordered(c.plane::<2>(1), |e| acc += *e);
        assert_eq!(acc, (6..12).sum::<u32>());

        let mut list: ChunkedList<u32, 4> = (0..9).collect();
        let mut seen = Vec::new();
        apply_ordered(&mut list, |e| seen.push(*e));
        assert_eq!(seen, (0..9).collect::<Vec<_>>());

        let l: List<u32, Sequential> = (1..=4).collect();
        let mut product = 1;
        apply_ordered(l.all(), |e| product *= *e);
        assert_eq!(product, 24);
    }

    #[test]
    fn apply_ordered_indexed_walks_ascending_linear_order() {
        let extent = CubeIndex::new(2, 3, 2);
        let mut c = Cube::<usize, Sequential>::new(2, 3, 2);
        let mut order = Vec::new();
        apply_ordered_indexed(c.all_ordered(), |e, i| {
            *e = order.len();
            order.push(i.linear(extent));
        });
        assert_eq!(order, (0..12).collect::<Vec<_>>());

        let mut rows = Vec::new();
        apply_ordered_indexed(c.plane::<0>(1), |e, i| {
            assert_eq!(i.x(), 1);
            rows.push(*e);
        });
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn cartesian_unique_over_cells() {
        let mut cells = Cube::<List<u32, Sequential>, Sequential>::new(2, 1, 1);
        cells[(0, 0, 0)].extend_from([10, 11]);
        cells[(1, 0, 0)].add(20);
        let sample: List<u32, Sequential> = (0..3).collect();
        let calls = AtomicUsize::new(0);
        apply_cartesian_unique(
            sample.all(),
            |_, _| {
                calls.fetch_add(1, Ordering::Relaxed);
            },
            cells.all(),
            |cell| cell.all(),
        );
        // 3 self pairs plus 3 elements against 3 neighbours each
        assert_eq!(calls.into_inner(), 3 + 9);
    }
}
