#![cfg_attr(docsrs, feature(doc_cfg))]
//! # skelgrid
//!
//! skelgrid is a small library of parallel iteration skeletons for particle and
//! stencil codes. It provides a dense 3-D grid with neighbour enumeration,
//! reference-stable and lock-guarded lists, and a view layer that lets one
//! kernel run over either, scheduled by a compile-time execution policy.
//!
//! ## Features
//! - [`CubeIndex`](cube::CubeIndex): 3-D coordinates with partial ordering and
//!   bound-clamping helpers
//! - [`Cube`](cube::Cube): dense grid with unordered, ordered, plane and
//!   read-only views
//! - Full and *unique* neighbour scans; the unique scan visits each adjacent
//!   pair of cells exactly once across the grid
//! - [`ChunkedList`](list::ChunkedList): append-only list whose elements never
//!   move, with unique-pair enumeration
//! - [`List`](list::List): thread-safe list pairing its elements against lists
//!   reached through another view
//! - Sequential and Rayon execution policies
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! skelgrid = "0.3"
//! # Optional features:
//! # default-features = false  # sequential-only build
//! # features = ["check-invariants"]
//! ```
//!
//! ```rust
//! use skelgrid::prelude::*;
//!
//! let mut c: Cube<u64, Sequential> = Cube::new(3, 2, 2);
//! algs::apply_indexed(c.all(), |e, i| *e = (i.x() + i.y() + i.z()) as u64);
//! assert_eq!(c[(2, 1, 1)], 4);
//!
//! let mut touched = 0;
//! c.for_all_neighbours_unique((1, 1, 1), |_| touched += 1);
//! assert_eq!(touched, 10);
//! ```
//!
//! ## Concurrency
//! `Cube` and `ChunkedList` carry no locks: unordered views rely on the policy
//! handing disjoint elements to its workers, and `ChunkedList::add` needs
//! `&mut self`. `ListStorage` guards its buffer with the policy's mutex and can
//! be appended to from many threads at once.

pub mod algs;
pub mod cube;
pub mod debug_invariants;
pub mod exec;
pub mod list;
pub mod mapping;
pub mod skel_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs;
    pub use crate::cube::{Cube, CubeIndex, MAX_UNIQUE_NEIGHBOURS};
    pub use crate::debug_invariants::DebugInvariants;
    #[cfg(feature = "rayon")]
    pub use crate::exec::Rayon;
    pub use crate::exec::{DefaultPolicy, ExecutionPolicy, PolicyMutex, Sequential};
    pub use crate::list::{ChunkedList, List, ListMapping, ListStorage};
    pub use crate::mapping::{
        IndexedMapping, IndexedSequentialMapping, Mapping, PairMapping, SequentialMapping,
    };
    pub use crate::skel_error::SkelError;
}
