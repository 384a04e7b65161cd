//! SkelError: unified error type for the checked entry points of skelgrid.
//!
//! Hot-path element access is guarded by debug assertions only. The variants
//! below are returned by the `try_*`/`at` accessors and by invariant
//! validation, where the caller asked for a recoverable answer.

use thiserror::Error;

use crate::cube::index::CubeIndex;

/// Unified error type for skelgrid operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkelError {
    /// A coordinate was not strictly inside the extent of a cube.
    #[error("index {index} is outside cube extent {extent}")]
    IndexOutOfBounds {
        /// The offending coordinate.
        index: CubeIndex,
        /// Extent of the cube that was accessed.
        extent: CubeIndex,
    },
    /// A list position at or past the current length.
    #[error("list index {index} out of range for length {len}")]
    ListIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the list at the time of the access.
        len: usize,
    },
    /// A fixed-capacity neighbour buffer had no room for the next reference.
    #[error("neighbour buffer full (capacity {capacity})")]
    NeighbourBufferFull {
        /// Capacity of the caller's buffer.
        capacity: usize,
    },
    /// A structural invariant failed validation.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
