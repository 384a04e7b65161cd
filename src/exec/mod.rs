//! Execution policies: how a bulk `apply` over a flat buffer is scheduled.
//!
//! Containers take the policy as a type parameter (`Cube<T, P>`,
//! `ListStorage<T, P>`), so the choice is made at compile time. A policy is a
//! zero-sized marker implementing [`ExecutionPolicy`].
//!
//! Two families of entry points exist:
//! - *unordered* (`apply`, `apply_indexed`, `apply_ref`, `apply_ref_indexed`):
//!   no ordering guarantee, and callbacks may run concurrently on distinct
//!   elements. The callback must therefore be `Fn + Sync + Send`.
//! - *ordered* (`apply_ordered*`, `apply_ref_ordered*`): strictly ascending
//!   linear order on the calling thread. These are provided methods and every
//!   shipped policy uses the defaults; callers rely on index-ordered side
//!   effects, so implementors must not fan them out.
//!
//! Every entry point returns only once all callbacks have returned.

pub mod sequential;
pub mod spin;

#[cfg(feature = "rayon")]
pub mod rayon;

use parking_lot::lock_api::RawMutex;

use crate::cube::index::CubeIndex;

pub use sequential::Sequential;
pub use spin::{SpinMutex, SpinRawMutex};

#[cfg(feature = "rayon")]
pub use self::rayon::Rayon;

/// Policy used when a container does not name one.
#[cfg(feature = "rayon")]
pub type DefaultPolicy = Rayon;

/// Policy used when a container does not name one.
#[cfg(not(feature = "rayon"))]
pub type DefaultPolicy = Sequential;

/// Mutex guarding data with the raw lock chosen by policy `P`.
pub type PolicyMutex<P, T> = parking_lot::lock_api::Mutex<<P as ExecutionPolicy>::RawMutex, T>;

/// Scheduling strategy for bulk application over a contiguous buffer.
///
/// Indexed variants pass each element's 3-D coordinate, derived from its flat
/// position with [`CubeIndex::from_linear`]; `buf.len()` must equal
/// `extent.volume()`.
pub trait ExecutionPolicy: Send + Sync + 'static {
    /// Mutual-exclusion primitive used by lock-guarded containers.
    type RawMutex: RawMutex + Send + Sync;

    /// Invoke `f` on every element, in no particular order.
    fn apply<T, F>(f: F, buf: &mut [T])
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send;

    /// Invoke `f` on every element together with its coordinate, in no particular order.
    fn apply_indexed<T, F>(f: F, buf: &mut [T], extent: CubeIndex)
    where
        T: Send,
        F: Fn(&mut T, CubeIndex) + Sync + Send;

    /// Read-only counterpart of [`apply`](Self::apply).
    fn apply_ref<T, F>(f: F, buf: &[T])
    where
        T: Sync,
        F: Fn(&T) + Sync + Send;

    /// Read-only counterpart of [`apply_indexed`](Self::apply_indexed).
    fn apply_ref_indexed<T, F>(f: F, buf: &[T], extent: CubeIndex)
    where
        T: Sync,
        F: Fn(&T, CubeIndex) + Sync + Send;

    /// Invoke `f` on every element in ascending order, single-threaded.
    fn apply_ordered<T, F>(mut f: F, buf: &mut [T])
    where
        F: FnMut(&mut T),
    {
        for e in buf.iter_mut() {
            f(e);
        }
    }

    /// Ordered, single-threaded [`apply_indexed`](Self::apply_indexed).
    fn apply_ordered_indexed<T, F>(mut f: F, buf: &mut [T], extent: CubeIndex)
    where
        F: FnMut(&mut T, CubeIndex),
    {
        debug_assert_eq!(buf.len(), extent.volume());
        for (e, idx) in buf.iter_mut().zip(CubeIndex::iter_within(extent)) {
            f(e, idx);
        }
    }

    /// Ordered, single-threaded [`apply_ref`](Self::apply_ref).
    fn apply_ref_ordered<T, F>(mut f: F, buf: &[T])
    where
        F: FnMut(&T),
    {
        for e in buf {
            f(e);
        }
    }

    /// Ordered, single-threaded [`apply_ref_indexed`](Self::apply_ref_indexed).
    fn apply_ref_ordered_indexed<T, F>(mut f: F, buf: &[T], extent: CubeIndex)
    where
        F: FnMut(&T, CubeIndex),
    {
        debug_assert_eq!(buf.len(), extent.volume());
        for (e, idx) in buf.iter().zip(CubeIndex::iter_within(extent)) {
            f(e, idx);
        }
    }
}
