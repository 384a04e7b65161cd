//! Rayon-backed policy: unordered entry points fan out over the global pool.

use ::rayon::prelude::*;

use super::ExecutionPolicy;
use super::spin::SpinRawMutex;
use crate::cube::index::CubeIndex;

/// Work-stealing policy.
///
/// `MIN_LEN` is the smallest run of consecutive elements rayon will hand to a
/// single task; tune it up for cheap callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rayon<const MIN_LEN: usize = 256>;

impl<const MIN_LEN: usize> ExecutionPolicy for Rayon<MIN_LEN> {
    type RawMutex = SpinRawMutex;

    fn apply<T, F>(f: F, buf: &mut [T])
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        buf.par_iter_mut().with_min_len(MIN_LEN.max(1)).for_each(f);
    }

    fn apply_indexed<T, F>(f: F, buf: &mut [T], extent: CubeIndex)
    where
        T: Send,
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        debug_assert_eq!(buf.len(), extent.volume());
        buf.par_iter_mut()
            .enumerate()
            .with_min_len(MIN_LEN.max(1))
            .for_each(|(n, e)| f(e, CubeIndex::from_linear(n, extent)));
    }

    fn apply_ref<T, F>(f: F, buf: &[T])
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        buf.par_iter().with_min_len(MIN_LEN.max(1)).for_each(f);
    }

    fn apply_ref_indexed<T, F>(f: F, buf: &[T], extent: CubeIndex)
    where
        T: Sync,
        F: Fn(&T, CubeIndex) + Sync + Send,
    {
        debug_assert_eq!(buf.len(), extent.volume());
        buf.par_iter()
            .enumerate()
            .with_min_len(MIN_LEN.max(1))
            .for_each(|(n, e)| f(e, CubeIndex::from_linear(n, extent)));
    }
}
