//! Dense 3-D grids: the index type, flat storage, views and neighbour scans.

pub mod block;
pub mod grid;
pub mod index;
pub mod mapping;
pub mod neighbours;

pub use block::Block;
pub use grid::Cube;
pub use index::CubeIndex;
pub use mapping::{ConstFullMapping, ConstOrderedMapping, FullMapping, OrderedMapping, PlaneMapping};
pub use neighbours::MAX_UNIQUE_NEIGHBOURS;
