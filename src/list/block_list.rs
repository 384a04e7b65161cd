//! `ChunkedList`: append-only sequence with stable element addresses.
//!
//! Elements live in fixed-capacity chunks of `CHUNK` slots. A chunk buffer is
//! allocated once with room for exactly `CHUNK` elements and is never grown,
//! so appending never moves an existing element. Element `i` lives in chunk
//! `i / CHUNK` at slot `i % CHUNK`.
//!
//! The list has no internal synchronisation; `add` takes `&mut self`.

use core::fmt::{self, Debug};
use core::ops::{Index, IndexMut};

use crate::debug_invariants::DebugInvariants;
use crate::mapping::{Mapping, SequentialMapping};
use crate::skel_error::SkelError;

/// Default number of slots per chunk.
pub const DEFAULT_CHUNK: usize = 16;

/// Append-only list of `T` in chunks of `CHUNK` elements.
pub struct ChunkedList<T, const CHUNK: usize = DEFAULT_CHUNK> {
    chunks: Vec<Vec<T>>,
    len: usize,
}

impl<T, const CHUNK: usize> Default for ChunkedList<T, CHUNK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug, const CHUNK: usize> Debug for ChunkedList<T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const CHUNK: usize> ChunkedList<T, CHUNK> {
    pub fn new() -> Self {
        const { assert!(CHUNK > 0, "chunk size must be positive") };
        ChunkedList {
            chunks: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Append `x` and return a reference to its slot.
    pub fn add(&mut self, x: T) -> &mut T {
        if self.chunks.last().is_none_or(|c| c.len() == CHUNK) {
            log::trace!(
                "allocating chunk {} of {CHUNK} slots",
                self.chunks.len()
            );
            self.chunks.push(Vec::with_capacity(CHUNK));
        }
        let c = self.chunks.len() - 1;
        self.chunks[c].push(x);
        self.len += 1;
        crate::debug_invariants!(self.validate_invariants(), "ChunkedList::add");
        let slot = self.chunks[c].len() - 1;
        &mut self.chunks[c][slot]
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.chunks.get(i / CHUNK)?.get(i % CHUNK)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.chunks.get_mut(i / CHUNK)?.get_mut(i % CHUNK)
    }

    pub fn at(&self, i: usize) -> Result<&T, SkelError> {
        let len = self.len;
        self.get(i)
            .ok_or(SkelError::ListIndexOutOfRange { index: i, len })
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T, SkelError> {
        let len = self.len;
        self.get_mut(i)
            .ok_or(SkelError::ListIndexOutOfRange { index: i, len })
    }

    /// Drop every element and release all chunks.
    pub fn clear(&mut self) {
        log::trace!("releasing {} chunks", self.chunks.len());
        self.chunks.clear();
        self.chunks.shrink_to_fit();
        self.len = 0;
        crate::debug_invariants!(self.validate_invariants(), "ChunkedList::clear");
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.chunks.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.chunks.iter_mut().flatten()
    }

    /// Apply `f` to every element in insertion order.
    pub fn apply<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        for chunk in &mut self.chunks {
            chunk.iter_mut().for_each(&mut f);
        }
    }

    pub fn apply_ref<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for chunk in &self.chunks {
            chunk.iter().for_each(&mut f);
        }
    }

    /// For each element `e_i` in insertion order, call `bf(e_i, e_j)` for
    /// every earlier `e_j`, then `pf(e_i)` once.
    ///
    /// Pairs come out as `(e1, e0), (e2, e0), (e2, e1), (e3, e0), ...`: each
    /// unordered pair exactly once, `n * (n - 1) / 2` calls of `bf` and `n`
    /// calls of `pf` in total.
    pub fn apply_cartesian_unique<B, F>(&mut self, mut bf: B, mut pf: F)
    where
        B: FnMut(&mut T, &mut T),
        F: FnMut(&mut T),
    {
        for c in 0..self.chunks.len() {
            let (full, tail) = self.chunks.split_at_mut(c);
            let current = &mut tail[0];
            for slot in 0..current.len() {
                let (before, rest) = current.split_at_mut(slot);
                let ei = &mut rest[0];
                for ej in full.iter_mut().flatten() {
                    bf(ei, ej);
                }
                for ej in before.iter_mut() {
                    bf(ei, ej);
                }
                pf(ei);
            }
        }
    }
}

impl<T, const CHUNK: usize> Index<usize> for ChunkedList<T, CHUNK> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.chunks[i / CHUNK][i % CHUNK]
    }
}

impl<T, const CHUNK: usize> IndexMut<usize> for ChunkedList<T, CHUNK> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.chunks[i / CHUNK][i % CHUNK]
    }
}

impl<T, const CHUNK: usize> Extend<T> for ChunkedList<T, CHUNK> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<T, const CHUNK: usize> FromIterator<T> for ChunkedList<T, CHUNK> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ChunkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, const CHUNK: usize> IntoIterator for &'a ChunkedList<T, CHUNK> {
    type Item = &'a T;
    type IntoIter = core::iter::Flatten<core::slice::Iter<'a, Vec<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter().flatten()
    }
}

impl<T, const CHUNK: usize> Mapping for ChunkedList<T, CHUNK> {
    type Element = T;

    fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        ChunkedList::apply(self, f);
    }
}

impl<T, const CHUNK: usize> SequentialMapping for ChunkedList<T, CHUNK> {
    fn apply_ordered<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        ChunkedList::apply(self, f);
    }
}

impl<T, const CHUNK: usize> DebugInvariants for ChunkedList<T, CHUNK> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "ChunkedList invalid");
    }

    fn validate_invariants(&self) -> Result<(), SkelError> {
        let expected = self.len.div_ceil(CHUNK);
        if self.chunks.len() != expected {
            return Err(SkelError::InvariantViolation(format!(
                "{} elements need {expected} chunks, found {}",
                self.len,
                self.chunks.len()
            )));
        }
        let stored: usize = self.chunks.iter().map(Vec::len).sum();
        if stored != self.len {
            return Err(SkelError::InvariantViolation(format!(
                "length {} disagrees with {stored} stored elements",
                self.len
            )));
        }
        if let Some((last, full)) = self.chunks.split_last() {
            if let Some(c) = full.iter().position(|c| c.len() != CHUNK) {
                return Err(SkelError::InvariantViolation(format!(
                    "chunk {c} is not full but is followed by another chunk"
                )));
            }
            if last.is_empty() || last.len() > CHUNK {
                return Err(SkelError::InvariantViolation(format!(
                    "last chunk holds {} of {CHUNK} slots",
                    last.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn at_reads_in_insertion_order_across_chunks() {
        let list: ChunkedList<usize> = (0..50).collect();
        assert_eq!(list.len(), 50);
        assert_eq!(list.chunk_count(), 4);
        for i in 0..50 {
            assert_eq!(*list.at(i).unwrap(), i);
            assert_eq!(list[i], i);
        }
        assert_eq!(
            list.at(50),
            Err(SkelError::ListIndexOutOfRange { index: 50, len: 50 })
        );
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn exactly_one_full_chunk_is_visited_completely() {
        let mut list: ChunkedList<u32> = (0..16).collect();
        assert_eq!(list.chunk_count(), 1);
        let mut visited = 0;
        list.apply(|e| {
            *e += 1;
            visited += 1;
        });
        assert_eq!(visited, 16);
        assert_eq!(list.iter().copied().sum::<u32>(), (1..=16).sum());
        list.add(99);
        assert_eq!(list.chunk_count(), 2);
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn addresses_survive_growth() {
        let mut list: ChunkedList<u64, 4> = ChunkedList::new();
        let first = list.add(7) as *const u64;
        let fifth = {
            list.extend(1..4);
            list.add(8) as *const u64
        };
        list.extend(0..100);
        assert!(core::ptr::eq(first, list.at(0).unwrap()));
        assert!(core::ptr::eq(fifth, list.at(4).unwrap()));
    }

    #[test]
    fn cartesian_unique_pairs_and_finalizes() {
        let mut list: ChunkedList<usize> = (0..50).collect();
        let pairs = RefCell::new(Vec::new());
        let mut finals = Vec::new();
        list.apply_cartesian_unique(
            |a, b| pairs.borrow_mut().push((*a, *b)),
            |e| finals.push((*e, pairs.borrow().len())),
        );
        let pairs = pairs.into_inner();
        assert_eq!(pairs.len(), 1225);
        assert_eq!(&pairs[..4], &[(1, 0), (2, 0), (2, 1), (3, 0)]);
        let expected: Vec<_> = (0..50).flat_map(|i| (0..i).map(move |j| (i, j))).collect();
        assert_eq!(pairs, expected);
        // e_i finalizes once all of its i pairs were seen
        assert_eq!(finals.len(), 50);
        for (i, &(e, seen)) in finals.iter().enumerate() {
            assert_eq!(e, i);
            assert_eq!(seen, i * (i + 1) / 2);
        }
    }

    #[test]
    fn clear_releases_chunks() {
        let mut list: ChunkedList<String, 2> = ["a", "b", "c"].map(String::from).into_iter().collect();
        assert_eq!(list.chunk_count(), 2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.chunk_count(), 0);
        assert!(list.get(0).is_none());
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn add_and_clear_keep_invariants_across_cycles() {
        // every add and clear checks the invariants itself in debug builds
        let mut list: ChunkedList<u32, 3> = ChunkedList::new();
        for round in 0..4u32 {
            for x in 0..(round * 5 + 1) {
                *list.add(x) += round;
            }
            assert_eq!(list.len(), (round * 5 + 1) as usize);
            assert_eq!(list.chunk_count(), list.len().div_ceil(3));
            list.clear();
        }
        assert!(list.validate_invariants().is_ok());
    }

    #[test]
    fn malformed_chunk_directory_is_reported() {
        let mut list: ChunkedList<u8, 2> = [1, 2, 3].into_iter().collect();
        list.chunks.push(Vec::with_capacity(2));
        assert!(matches!(
            list.validate_invariants(),
            Err(SkelError::InvariantViolation(_))
        ));

        let mut list: ChunkedList<u8, 2> = [1, 2, 3].into_iter().collect();
        list.len = 2;
        assert!(list.validate_invariants().is_err());

        let mut list: ChunkedList<u8, 2> = [1, 2, 3].into_iter().collect();
        list.chunks[0].pop();
        list.len = 2;
        assert!(list.validate_invariants().is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "[invariants] ChunkedList::add")]
    fn add_onto_corrupted_list_panics_in_debug() {
        let mut list: ChunkedList<u8, 2> = [1].into_iter().collect();
        list.len = 5;
        list.add(2);
    }

    #[test]
    fn debug_lists_elements() {
        let list: ChunkedList<i8, 2> = [1, 2, 3].into_iter().collect();
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }
}
