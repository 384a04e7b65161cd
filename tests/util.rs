#![allow(dead_code)]
use skelgrid::cube::{Cube, CubeIndex};
use skelgrid::exec::ExecutionPolicy;

/// Cube whose cells hold their own linear position.
pub fn numbered_cube<P: ExecutionPolicy>(nx: usize, ny: usize, nz: usize) -> Cube<usize, P> {
    let mut c = Cube::<usize, P>::new(nx, ny, nz);
    let extent = c.size();
    c.all_ordered().apply_indexed(|e, i| *e = i.linear(extent));
    c
}

/// Every cell value in linear order.
pub fn snapshot<T: Clone, P: ExecutionPolicy>(c: &Cube<T, P>) -> Vec<T> {
    let mut out = Vec::with_capacity(c.len());
    c.view_ordered().apply(|e| out.push(e.clone()));
    out
}

/// Chebyshev distance of at most one on every axis.
pub fn adjacent(a: CubeIndex, b: CubeIndex) -> bool {
    a != b && a.x().abs_diff(b.x()) <= 1 && a.y().abs_diff(b.y()) <= 1 && a.z().abs_diff(b.z()) <= 1
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
