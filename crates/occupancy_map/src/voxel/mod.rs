//! Sparse voxel grid comparator.
//!
//! - [`key`]: `VoxelKey` - packed `floor(p / s)` coordinate
//! - [`grid`]: `VoxelGrid` - hash map of hit counts

pub mod grid;
pub mod key;

pub use grid::VoxelGrid;
pub use key::VoxelKey;
