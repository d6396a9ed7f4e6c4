//! Probabilistic occupancy octree.
//!
//! An explicit tree stored in an arena: nodes are addressed by [`NodeId`]
//! handles and a subdivided node owns a contiguous block of eight children.
//!
//! # Depth Convention
//!
//! Depth 0 = root (whole bounding cube), depth D = finest leaves.
//!
//! ```text
//! Leaf Edge = root side / 2^D
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `DAabb3` / `BoundingCube` - double-precision bounds
//! - [`node`]: `OctreeNode` - center, half-extent, log-odds, children
//! - [`config`]: `OctreeConfig` - max depth and sensor model
//! - [`tree`]: `OccupancyOctree` - insertion, subdivision, traversal

pub mod bounds;
pub mod config;
pub mod node;
pub mod tree;

// Re-exports
pub use bounds::{BoundingCube, DAabb3};
pub use config::OctreeConfig;
pub use node::{NodeId, OctreeNode};
pub use tree::{DepthFirst, OccupancyOctree};
