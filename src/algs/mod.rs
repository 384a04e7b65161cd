//! Generic skeletons written once against the mapping traits.

pub mod skeleton;

pub use skeleton::{
    apply, apply_cartesian_unique, apply_indexed, apply_ordered, apply_ordered_indexed,
};
