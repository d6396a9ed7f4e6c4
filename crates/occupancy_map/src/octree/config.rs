//! OctreeConfig - resolution and sensor model of one octree build.

use crate::config::{validate_depth, SensorModel};
use crate::error::Result;

/// Configuration for a single occupancy octree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctreeConfig {
  /// Depth of terminal leaves. Every update lands at exactly this depth.
  pub max_depth: u8,

  /// Log-odds increments and clamp range.
  pub sensor: SensorModel,
}

impl OctreeConfig {
  /// Validated configuration.
  pub fn new(max_depth: u8, sensor: SensorModel) -> Result<Self> {
    let config = Self { max_depth, sensor };
    config.validate()?;
    Ok(config)
  }

  /// Check depth range and sensor constants.
  pub fn validate(&self) -> Result<()> {
    validate_depth(self.max_depth)?;
    self.sensor.validate()
  }

  /// Half-extent of a node at `depth` under a root of `root_half_extent`.
  /// half_extent = root_half_extent / 2^depth
  #[inline]
  pub fn half_extent_at(&self, root_half_extent: f64, depth: u8) -> f64 {
    root_half_extent / (1u64 << depth) as f64
  }

  /// Edge length of a terminal leaf. This is the voxel size at which a flat
  /// grid matches the octree's resolution.
  #[inline]
  pub fn leaf_edge(&self, root_half_extent: f64) -> f64 {
    2.0 * self.half_extent_at(root_half_extent, self.max_depth)
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      max_depth: 6,
      sensor: SensorModel::default(),
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
