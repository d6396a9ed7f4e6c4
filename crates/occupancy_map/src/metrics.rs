//! Structure-agnostic metrics over a built octree or voxel grid.
//!
//! Everything here is read-only: metrics never mutate the structure they
//! inspect.
//!
//! # Memory Model
//!
//! ```text
//! estimated_memory_bytes = count_all * bytes_per_entity
//!
//!   octree node   ~200 B   (center, half-extent, log-odds, 8 child refs, overhead)
//!   voxel entry    ~50 B   (3-axis key, count, hash map overhead)
//! ```
//!
//! This is an analytic estimate from a fixed per-entity model, not a measured
//! heap footprint.

use glam::DVec3;
use serde::Serialize;

use crate::config::MemoryModel;
use crate::error::Result;
use crate::octree::{DAabb3, OccupancyOctree};
use crate::voxel::VoxelGrid;

/// Which representation a metrics snapshot describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StructureKind {
  /// Hierarchical occupancy octree.
  Octree,
  /// Flat sparse voxel grid.
  VoxelGrid,
}

/// Common read-only view over both occupancy structures.
pub trait OccupancyStructure {
  /// Representation kind.
  fn kind(&self) -> StructureKind;

  /// Every stored entity (octree: internal + leaf nodes; grid: entries).
  fn count_all(&self) -> usize;

  /// Entities believed occupied.
  fn count_occupied(&self) -> usize;

  /// Edge length of the finest cell.
  fn resolution(&self) -> f64;

  /// Bytes charged per entity by `model`.
  fn entity_bytes(&self, model: &MemoryModel) -> u64;
}

impl OccupancyStructure for OccupancyOctree {
  fn kind(&self) -> StructureKind {
    StructureKind::Octree
  }

  fn count_all(&self) -> usize {
    self.iter().count()
  }

  fn count_occupied(&self) -> usize {
    self.occupied_leaves().count()
  }

  fn resolution(&self) -> f64 {
    self.leaf_edge()
  }

  fn entity_bytes(&self, model: &MemoryModel) -> u64 {
    model.octree_node_bytes
  }
}

impl OccupancyStructure for VoxelGrid {
  fn kind(&self) -> StructureKind {
    StructureKind::VoxelGrid
  }

  fn count_all(&self) -> usize {
    self.len()
  }

  /// Every stored entry is occupied by construction.
  fn count_occupied(&self) -> usize {
    self.len()
  }

  fn resolution(&self) -> f64 {
    self.voxel_size()
  }

  fn entity_bytes(&self, model: &MemoryModel) -> u64 {
    model.voxel_entry_bytes
  }
}

/// Total entity count.
#[inline]
pub fn count_all<S: OccupancyStructure + ?Sized>(structure: &S) -> usize {
  structure.count_all()
}

/// Occupied entity count. Never exceeds [`count_all`].
#[inline]
pub fn count_occupied<S: OccupancyStructure + ?Sized>(structure: &S) -> usize {
  structure.count_occupied()
}

/// Component-wise bounding box of a point sequence.
#[inline]
pub fn bounding_box(points: &[DVec3]) -> Result<DAabb3> {
  DAabb3::from_points(points)
}

/// Analytic memory estimate: `count_all * bytes_per_entity`.
pub fn estimate_memory_bytes<S: OccupancyStructure + ?Sized>(
  structure: &S,
  model: &MemoryModel,
) -> u64 {
  (structure.count_all() as u64).saturating_mul(structure.entity_bytes(model))
}

/// Cells in a fully allocated grid over `bbox` at `voxel_size`:
/// `ceil(extent / s)` per axis, multiplied. A degenerate axis still counts
/// one cell. Saturates at `u64::MAX`; never allocated.
pub fn theoretical_dense_cells(bbox: &DAabb3, voxel_size: f64) -> u64 {
  let cells = (bbox.size() / voxel_size).ceil().max(DVec3::ONE);
  [cells.x, cells.y, cells.z]
    .iter()
    .fold(1u64, |acc, &axis| acc.saturating_mul(axis as u64))
}

/// Immutable metrics snapshot of one built structure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StructureMetrics {
  kind: StructureKind,
  total: usize,
  occupied: usize,
  bounding_box: DAabb3,
  resolution: f64,
  estimated_memory_bytes: u64,
  theoretical_dense_cells: u64,
}

impl StructureMetrics {
  /// Collect metrics. `bbox` is the bounding box of the input points; the
  /// theoretical dense grid uses the structure's own finest resolution.
  pub fn collect<S: OccupancyStructure + ?Sized>(
    structure: &S,
    bbox: &DAabb3,
    model: &MemoryModel,
  ) -> Self {
    let resolution = structure.resolution();
    Self {
      kind: structure.kind(),
      total: count_all(structure),
      occupied: count_occupied(structure),
      bounding_box: *bbox,
      resolution,
      estimated_memory_bytes: estimate_memory_bytes(structure, model),
      theoretical_dense_cells: theoretical_dense_cells(bbox, resolution),
    }
  }

  /// Representation kind.
  pub fn kind(&self) -> StructureKind {
    self.kind
  }

  /// Total nodes (octree) or voxels (grid).
  pub fn total(&self) -> usize {
    self.total
  }

  /// Occupied leaves (octree) or voxels (grid).
  pub fn occupied(&self) -> usize {
    self.occupied
  }

  /// Bounding box of the input points.
  pub fn bounding_box(&self) -> &DAabb3 {
    &self.bounding_box
  }

  /// Finest cell edge length.
  pub fn resolution(&self) -> f64 {
    self.resolution
  }

  /// Analytic memory estimate in bytes.
  pub fn estimated_memory_bytes(&self) -> u64 {
    self.estimated_memory_bytes
  }

  /// Memory estimate in MiB.
  pub fn estimated_memory_mb(&self) -> f64 {
    self.estimated_memory_bytes as f64 / 1_048_576.0
  }

  /// Cells of the equivalent fully dense grid.
  pub fn theoretical_dense_cells(&self) -> u64 {
    self.theoretical_dense_cells
  }

  /// Fraction of theoretical dense cells actually occupied.
  pub fn occupancy_fraction(&self) -> f64 {
    self.occupied as f64 / self.theoretical_dense_cells.max(1) as f64
  }

  /// How many times fewer entities this structure stores than a full grid.
  pub fn structural_compression(&self) -> f64 {
    self.theoretical_dense_cells as f64 / self.total.max(1) as f64
  }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
