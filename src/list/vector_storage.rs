//! `ListStorage`: a growable sequence guarded by the policy's mutex.
//!
//! Every operation that mutates the sequence or reads its length takes the
//! lock for its own duration only. Bulk traversal never holds the lock for the
//! whole walk:
//!
//! - [`apply`](ListStorage::apply) snapshots the length, releases the lock,
//!   then visits each index below the snapshot inside its own short critical
//!   section. Elements appended meanwhile are not visited; if the list shrinks
//!   the walk stops early.
//! - [`apply_cartesian_unique`](ListStorage::apply_cartesian_unique) holds the
//!   lock across the self-pair loop of one element, and holds this lock *and*
//!   the mapped collection's lock (always in that order) across each
//!   cross-collection loop.
//!
//! Callbacks run while a lock is held must not call back into the same list.

use core::fmt::{self, Debug};

use parking_lot::lock_api::{MappedMutexGuard, MutexGuard};

use super::mapping::ListMapping;
use crate::exec::{DefaultPolicy, ExecutionPolicy, PolicyMutex};
use crate::mapping::Mapping;
use crate::skel_error::SkelError;

/// Thread-safe growable sequence of `T`.
pub struct ListStorage<T, P: ExecutionPolicy = DefaultPolicy> {
    pub(super) elems: PolicyMutex<P, Vec<T>>,
}

impl<T, P: ExecutionPolicy> Default for ListStorage<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: ExecutionPolicy> Debug for ListStorage<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ListStorage");
        match self.elems.try_lock() {
            Some(v) => d.field("len", &v.len()),
            None => d.field("len", &format_args!("<locked>")),
        };
        d.finish()
    }
}

impl<T, P: ExecutionPolicy> ListStorage<T, P> {
    pub fn new() -> Self {
        ListStorage {
            elems: PolicyMutex::<P, Vec<T>>::new(Vec::new()),
        }
    }

    /// The lock guarding the sequence.
    #[inline]
    pub fn mutex(&self) -> &PolicyMutex<P, Vec<T>> {
        &self.elems
    }

    pub fn size(&self) -> usize {
        self.elems.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.lock().is_empty()
    }

    /// Locked access to element `i`. The lock is held until the guard drops.
    pub fn at(&self, i: usize) -> Result<MappedMutexGuard<'_, P::RawMutex, T>, SkelError> {
        let guard = self.elems.lock();
        let len = guard.len();
        MutexGuard::try_map(guard, |v| v.get_mut(i))
            .map_err(|_| SkelError::ListIndexOutOfRange { index: i, len })
    }

    /// Remove every element and release the capacity.
    pub fn clear(&self) {
        let mut v = self.elems.lock();
        log::trace!("clearing list storage of {} elements", v.len());
        v.clear();
        v.shrink_to_fit();
    }

    pub fn add(&self, x: T) {
        self.elems.lock().push(x);
    }

    /// Append every item of `items` under a single lock acquisition.
    pub fn extend_from<I: IntoIterator<Item = T>>(&self, items: I) {
        self.elems.lock().extend(items);
    }

    /// Exclusive access without locking.
    pub fn get_mut(&mut self) -> &mut Vec<T> {
        self.elems.get_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elems.into_inner()
    }

    /// Apply `f` to every element present when the call starts, in order.
    ///
    /// `f` runs with the list locked; calling back into the same list from
    /// `f` deadlocks. Other threads may add or clear between two elements.
    pub fn apply<F>(&self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let snapshot = self.elems.lock().len();
        for i in 0..snapshot {
            let mut guard = self.elems.lock();
            let Some(e) = guard.get_mut(i) else {
                break;
            };
            f(e);
        }
    }

    /// Enumerate every unique pair of elements of this list, then pair each
    /// element with the collections reached through `other`.
    ///
    /// For each element `e_i` in order:
    /// 1. under this list's lock, `bf(e_i, e_j)` for every `j < i`;
    /// 2. for every `x` visited by `other.apply`, lock this list then
    ///    `mf(x)`'s list, and call `bf(e_i, y)` for every `y` in it.
    ///
    /// An `mf(x)` that resolves to this very list is skipped, since its pairs
    /// were produced in step 1.
    pub fn apply_cartesian_unique<B, O, M>(&self, bf: B, other: &mut O, mf: M)
    where
        T: Send,
        B: Fn(&mut T, &mut T) + Sync + Send,
        O: Mapping,
        M: for<'x> Fn(&'x mut O::Element) -> ListMapping<'x, T, P> + Sync + Send,
    {
        let n = self.size();
        for i in 0..n {
            {
                let mut mine = self.elems.lock();
                if i >= mine.len() {
                    break;
                }
                let (earlier, rest) = mine.split_at_mut(i);
                let ei = &mut rest[0];
                for ej in earlier.iter_mut() {
                    bf(ei, ej);
                }
            }

            other.apply(|x: &mut O::Element| {
                let mapped = mf(x);
                let target = mapped.storage();
                if core::ptr::eq(target, self) {
                    log::debug!("cartesian pairing skipped a list mapped onto itself");
                    return;
                }
                let mut mine = self.elems.lock();
                let mut theirs = target.elems.lock();
                let Some(ei) = mine.get_mut(i) else {
                    return;
                };
                for y in theirs.iter_mut() {
                    bf(ei, y);
                }
            });
        }
    }
}
