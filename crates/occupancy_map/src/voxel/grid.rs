//! VoxelGrid - flat sparse hashed voxel grid.
//!
//! The baseline against which the octree is measured: one hash-map entry per
//! occupied voxel, no hierarchy, O(1) amortized insertion.

use std::collections::HashMap;

use glam::DVec3;
use log::debug;

use super::VoxelKey;
use crate::config::validate_voxel_size;
use crate::error::{MapError, Result};
use crate::octree::DAabb3;

/// Sparse voxel grid of hit counts.
///
/// A key exists iff at least one point hashed to that voxel. Entries are
/// never removed.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
  voxel_size: f64,
  voxels: HashMap<VoxelKey, u32>,
  bounds: Option<DAabb3>,
  points_inserted: usize,
}

impl VoxelGrid {
  /// Empty grid with a fixed voxel size.
  pub fn new(voxel_size: f64) -> Result<Self> {
    validate_voxel_size(voxel_size)?;
    Ok(Self {
      voxel_size,
      voxels: HashMap::new(),
      bounds: None,
      points_inserted: 0,
    })
  }

  /// Build a grid from a point sequence.
  pub fn from_points(points: &[DVec3], voxel_size: f64) -> Result<Self> {
    let mut grid = Self::new(voxel_size)?;
    grid.build(points)?;
    Ok(grid)
  }

  /// Insert every point in order. Fails with [`MapError::EmptyInput`] on an
  /// empty slice.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "voxel::build"))]
  pub fn build(&mut self, points: &[DVec3]) -> Result<()> {
    if points.is_empty() {
      return Err(MapError::EmptyInput);
    }
    self.voxels.reserve(points.len().min(1 << 20));
    for &point in points {
      self.insert(point)?;
    }
    debug!(
      "voxel build: {} points, voxel size {}, {} voxels",
      points.len(),
      self.voxel_size,
      self.voxels.len()
    );
    Ok(())
  }

  /// Count one hit in the voxel containing `point`.
  pub fn insert(&mut self, point: DVec3) -> Result<VoxelKey> {
    if !point.is_finite() {
      return Err(MapError::NonFinitePoint { point });
    }
    let key = VoxelKey::from_point(point, self.voxel_size)?;
    let hits = self.voxels.entry(key).or_insert(0);
    *hits = hits.saturating_add(1);

    match &mut self.bounds {
      Some(bounds) => bounds.extend(point),
      None => self.bounds = Some(DAabb3::new(point, point)),
    }
    self.points_inserted += 1;
    Ok(key)
  }

  /// Hits recorded in a voxel (0 if absent).
  #[inline]
  pub fn hits(&self, key: VoxelKey) -> u32 {
    self.voxels.get(&key).copied().unwrap_or(0)
  }

  /// True if at least one point landed in `key`.
  #[inline]
  pub fn contains(&self, key: VoxelKey) -> bool {
    self.voxels.contains_key(&key)
  }

  /// Number of stored voxels.
  #[inline]
  pub fn len(&self) -> usize {
    self.voxels.len()
  }

  /// True when nothing has been inserted.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.voxels.is_empty()
  }

  /// Iterate over `(key, hits)` in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (VoxelKey, u32)> + '_ {
    self.voxels.iter().map(|(&key, &hits)| (key, hits))
  }

  /// Fixed voxel edge length.
  #[inline]
  pub fn voxel_size(&self) -> f64 {
    self.voxel_size
  }

  /// Bounding box of every inserted point.
  #[inline]
  pub fn bounds(&self) -> Option<DAabb3> {
    self.bounds
  }

  /// Number of successful insertions.
  #[inline]
  pub fn points_inserted(&self) -> usize {
    self.points_inserted
  }

  /// Cells a fully allocated grid over the inserted points' bounding box
  /// would need. Never materialized.
  pub fn theoretical_dense_cells(&self) -> Result<u64> {
    let bounds = self.bounds.ok_or(MapError::EmptyInput)?;
    Ok(crate::metrics::theoretical_dense_cells(
      &bounds,
      self.voxel_size,
    ))
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
