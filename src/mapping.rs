//! The mapping contract shared by cube views and list views.
//!
//! Generic skeletons in [`crate::algs`] are written once against these traits
//! and work for any backing store. Implementors are thin adapters holding a
//! borrow of their storage plus fixed traversal parameters.
//!
//! The trait methods take the strictest callback bound (`Fn + Sync + Send`)
//! so that one signature fits both unordered and ordered views. Ordered views
//! additionally offer inherent `FnMut` methods of the same name, and implement
//! [`SequentialMapping`] so generic code can thread state through a walk.

use crate::cube::index::CubeIndex;
use crate::exec::{ExecutionPolicy, PolicyMutex};
use crate::list::mapping::ListMapping;

/// Anything that can apply a callback to each of its elements.
pub trait Mapping {
    type Element;

    /// Apply `f` to every element. No ordering guarantee is implied by the
    /// trait; see the implementor for its schedule.
    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut Self::Element) + Sync + Send;
}

impl<M: Mapping + ?Sized> Mapping for &mut M {
    type Element = M::Element;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut Self::Element) + Sync + Send,
    {
        (**self).apply(f);
    }
}

/// A mapping whose elements have a 3-D coordinate.
pub trait IndexedMapping: Mapping {
    fn apply_indexed<F>(&mut self, f: F)
    where
        F: Fn(&mut Self::Element, CubeIndex) + Sync + Send;
}

/// A mapping that visits its elements one at a time, in a fixed order, on the
/// calling thread. Callbacks may therefore be stateful.
pub trait SequentialMapping: Mapping {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut Self::Element);
}

impl<M: SequentialMapping + ?Sized> SequentialMapping for &mut M {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut Self::Element),
    {
        (**self).apply_ordered(f);
    }
}

/// Sequential counterpart of [`IndexedMapping`].
pub trait IndexedSequentialMapping: SequentialMapping + IndexedMapping {
    fn apply_ordered_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut Self::Element, CubeIndex);
}

impl<M: IndexedMapping + ?Sized> IndexedMapping for &mut M {
    fn apply_indexed<F>(&mut self, f: F)
    where
        F: Fn(&mut Self::Element, CubeIndex) + Sync + Send,
    {
        (**self).apply_indexed(f);
    }
}

impl<M: IndexedSequentialMapping + ?Sized> IndexedSequentialMapping for &mut M {
    fn apply_ordered_indexed<F>(&mut self, f: F)
    where
        F: FnMut(&mut Self::Element, CubeIndex),
    {
        (**self).apply_ordered_indexed(f);
    }
}

/// A lock-guarded collection able to enumerate unique element pairs, both
/// within itself and against collections reached through another mapping.
pub trait PairMapping: Mapping {
    type Policy: ExecutionPolicy;

    /// The lock guarding the collection.
    fn mutex(&self) -> &PolicyMutex<Self::Policy, Vec<Self::Element>>;

    /// For each element `e_i`: call `bf(e_i, e_j)` for every earlier `e_j` of
    /// this collection, then for every element `x` of `other` call
    /// `bf(e_i, y)` for every `y` of the collection `mf(x)`.
    ///
    /// Locks are always taken self first, then the mapped collection.
    fn apply_cartesian_unique<B, O, M>(&mut self, bf: B, other: &mut O, mf: M)
    where
        B: Fn(&mut Self::Element, &mut Self::Element) + Sync + Send,
        O: Mapping,
        M: for<'x> Fn(&'x mut O::Element) -> ListMapping<'x, Self::Element, Self::Policy>
            + Sync
            + Send;
}
