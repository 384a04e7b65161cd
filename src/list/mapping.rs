//! `ListMapping`: a borrowed view over one [`ListStorage`].

use core::fmt::{self, Debug};

use parking_lot::lock_api::MappedMutexGuard;

use super::vector_storage::ListStorage;
use crate::exec::{DefaultPolicy, ExecutionPolicy, PolicyMutex};
use crate::mapping::{Mapping, PairMapping, SequentialMapping};
use crate::skel_error::SkelError;

/// View over every element of a [`ListStorage`].
pub struct ListMapping<'a, T, P: ExecutionPolicy = DefaultPolicy> {
    storage: &'a ListStorage<T, P>,
}

impl<T, P: ExecutionPolicy> Clone for ListMapping<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P: ExecutionPolicy> Copy for ListMapping<'_, T, P> {}

impl<T, P: ExecutionPolicy> Debug for ListMapping<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListMapping").field(self.storage).finish()
    }
}

impl<'a, T, P: ExecutionPolicy> ListMapping<'a, T, P> {
    pub fn new(storage: &'a ListStorage<T, P>) -> Self {
        ListMapping { storage }
    }

    pub(crate) fn storage(&self) -> &'a ListStorage<T, P> {
        self.storage
    }

    pub fn mutex(&self) -> &'a PolicyMutex<P, Vec<T>> {
        self.storage.mutex()
    }

    pub fn size(&self) -> usize {
        self.storage.size()
    }

    pub fn at(&self, i: usize) -> Result<MappedMutexGuard<'a, P::RawMutex, T>, SkelError> {
        self.storage.at(i)
    }

    /// Apply `f` to every element, in order; see [`ListStorage::apply`].
    ///
    /// `f` runs with the list locked and must not touch the list itself.
    pub fn apply<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.storage.apply(f);
    }

    /// See [`ListStorage::apply_cartesian_unique`].
    pub fn apply_cartesian_unique<B, O, M>(&mut self, bf: B, other: &mut O, mf: M)
    where
        T: Send,
        B: Fn(&mut T, &mut T) + Sync + Send,
        O: Mapping,
        M: for<'x> Fn(&'x mut O::Element) -> ListMapping<'x, T, P> + Sync + Send,
    {
        self.storage.apply_cartesian_unique(bf, other, mf);
    }
}

impl<T, P: ExecutionPolicy> Mapping for ListMapping<'_, T, P> {
    type Element = T;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        ListMapping::apply(self, f);
    }
}

impl<T, P: ExecutionPolicy> SequentialMapping for ListMapping<'_, T, P> {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        ListMapping::apply(self, f);
    }
}

impl<T: Send, P: ExecutionPolicy> PairMapping for ListMapping<'_, T, P> {
    type Policy = P;

    fn mutex(&self) -> &PolicyMutex<P, Vec<T>> {
        ListMapping::mutex(self)
    }

    fn apply_cartesian_unique<B, O, M>(&mut self, bf: B, other: &mut O, mf: M)
    where
        B: Fn(&mut T, &mut T) + Sync + Send,
        O: Mapping,
        M: for<'x> Fn(&'x mut O::Element) -> ListMapping<'x, T, P> + Sync + Send,
    {
        ListMapping::apply_cartesian_unique(self, bf, other, mf);
    }
}
