//! Lists: the reference-stable [`ChunkedList`] and the lock-guarded
//! [`ListStorage`] behind [`List`].

pub mod block_list;
#[allow(clippy::module_inception)]
pub mod list;
pub mod mapping;
pub mod vector_storage;

pub use block_list::{ChunkedList, DEFAULT_CHUNK};
pub use list::List;
pub use mapping::ListMapping;
pub use vector_storage::ListStorage;
