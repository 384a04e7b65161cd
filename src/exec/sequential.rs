//! Single-threaded policy: unordered entry points simply run in order.

use super::ExecutionPolicy;
use crate::cube::index::CubeIndex;

/// Runs every bulk operation on the calling thread in ascending order.
///
/// Useful for debugging and for deterministic tests; it satisfies the
/// unordered contract trivially.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sequential;

impl ExecutionPolicy for Sequential {
    type RawMutex = parking_lot::RawMutex;

    fn apply<T, F>(f: F, buf: &mut [T])
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        Self::apply_ordered(f, buf);
    }

    fn apply_indexed<T, F>(f: F, buf: &mut [T], extent: CubeIndex)
    where
        T: Send,
        F: Fn(&mut T, CubeIndex) + Sync + Send,
    {
        Self::apply_ordered_indexed(f, buf, extent);
    }

    fn apply_ref<T, F>(f: F, buf: &[T])
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        Self::apply_ref_ordered(f, buf);
    }

    fn apply_ref_indexed<T, F>(f: F, buf: &[T], extent: CubeIndex)
    where
        T: Sync,
        F: Fn(&T, CubeIndex) + Sync + Send,
    {
        Self::apply_ref_ordered_indexed(f, buf, extent);
    }
}
