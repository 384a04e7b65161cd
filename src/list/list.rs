//! `List`: the owning, thread-safe list container.

use core::fmt::{self, Debug};

use parking_lot::lock_api::MappedMutexGuard;

use super::mapping::ListMapping;
use super::vector_storage::ListStorage;
use crate::exec::{DefaultPolicy, ExecutionPolicy};
use crate::skel_error::SkelError;

/// Growable list that can be appended to from several threads at once.
///
/// A `List` is typically the cell type of a [`Cube`](crate::cube::grid::Cube)
/// whose cells bucket particles, so it is `Default` and not `Clone`.
pub struct List<T, P: ExecutionPolicy = DefaultPolicy> {
    storage: ListStorage<T, P>,
}

impl<T, P: ExecutionPolicy> Default for List<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: ExecutionPolicy> Debug for List<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("List").field(&self.storage).finish()
    }
}

impl<T, P: ExecutionPolicy> List<T, P> {
    pub fn new() -> Self {
        List {
            storage: ListStorage::new(),
        }
    }

    /// View over every element.
    ///
    /// Callbacks passed to the view run with this list locked and must not
    /// call back into it.
    pub fn all(&self) -> ListMapping<'_, T, P> {
        ListMapping::new(&self.storage)
    }

    pub fn size(&self) -> usize {
        self.storage.size()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn at(&self, i: usize) -> Result<MappedMutexGuard<'_, P::RawMutex, T>, SkelError> {
        self.storage.at(i)
    }

    pub fn clear(&self) {
        self.storage.clear();
    }

    pub fn add(&self, x: T) {
        self.storage.add(x);
    }

    pub fn extend_from<I: IntoIterator<Item = T>>(&self, items: I) {
        self.storage.extend_from(items);
    }

    pub fn storage(&self) -> &ListStorage<T, P> {
        &self.storage
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }
}

impl<T, P: ExecutionPolicy> FromIterator<T> for List<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let list = List::new();
        list.extend_from(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Sequential;

    #[test]
    fn concurrent_adds_are_all_kept() {
        let l: List<usize, Sequential> = List::new();
        std::thread::scope(|s| {
            for t in 0..4 {
                let l = &l;
                s.spawn(move || {
                    for k in 0..250 {
                        l.add(t * 1000 + k);
                    }
                });
            }
        });
        assert_eq!(l.size(), 1000);
        let mut v = l.into_vec();
        v.sort_unstable();
        v.dedup();
        assert_eq!(v.len(), 1000);
    }

    #[test]
    fn all_view_reads_and_writes_through() {
        let l: List<i32, Sequential> = (1..=4).collect();
        l.all().apply(|e| *e = -*e);
        assert_eq!(*l.at(3).unwrap(), -4);
        assert_eq!(l.all().size(), 4);
        l.clear();
        assert!(l.is_empty());
        assert!(l.at(0).is_err());
    }

    #[test]
    fn all_view_callback_runs_with_list_locked() {
        let l: List<i32, Sequential> = (0..3).collect();
        let mut calls = 0;
        l.all().apply(|_| {
            assert!(l.storage().mutex().try_lock().is_none());
            calls += 1;
        });
        assert_eq!(calls, 3);
        assert!(l.storage().mutex().try_lock().is_some());
    }
}
