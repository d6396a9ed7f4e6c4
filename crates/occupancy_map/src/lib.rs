//! occupancy_map - Probabilistic occupancy octree vs sparse voxel grid
//!
//! This crate builds two representations of the same static point cloud and
//! measures them against each other:
//!
//! - **Occupancy octree**: arena-backed tree refined to a fixed depth, one
//!   clamped log-odds value per node.
//! - **Sparse voxel grid**: packed integer keys to hit counts at a fixed
//!   voxel size.
//!
//! The benchmark harness sweeps octree depth, matches the grid's voxel size
//! to the octree leaf edge and reports build time, node/voxel counts and an
//! analytic memory estimate for each step.
//!
//! # Features
//!
//! - **Deterministic subdivision**: boundary ties resolve to the high octant
//! - **Seeded datasets**: clustered sparse world and dense sphere shell
//! - **Failure isolation**: a failed sweep step is recorded and skipped
//! - **tracing** (optional): spans on build entry points
//!
//! # Example
//!
//! ```ignore
//! use occupancy_map::{BenchmarkConfig, Harness, PointSource, SphereShell};
//!
//! let harness = Harness::new(BenchmarkConfig::default())?;
//! let dense = SphereShell::new().with_count(50_000).generate()?;
//! let sparse = harness.sparse_dataset()?;
//!
//! let report = harness.run(&[dense, sparse]);
//! for row in &report.rows {
//!     println!("{} depth {}: {} nodes", row.dataset_label, row.depth,
//!         row.metrics_octree.total());
//! }
//! ```

pub mod constants;
pub mod error;
pub use error::{MapError, Result};

// Immutable configuration structs
pub mod config;
pub use config::{BenchmarkConfig, MemoryModel, SensorModel, SparseWorldConfig};

// Occupancy octree
pub mod octree;
pub use octree::{BoundingCube, DAabb3, NodeId, OccupancyOctree, OctreeConfig, OctreeNode};

// Sparse voxel grid comparator
pub mod voxel;
pub use voxel::{VoxelGrid, VoxelKey};

pub mod metrics;
pub use metrics::{OccupancyStructure, StructureKind, StructureMetrics};

// Point sources
pub mod dataset;
pub use dataset::{Dataset, PointSource, SparseWorld, SphereShell};

pub mod benchmark;
pub use benchmark::{BenchmarkReport, BenchmarkRow, BuildSummary, FailedStep, Harness};
