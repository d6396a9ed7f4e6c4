//! Immutable configuration passed into structures and the harness.
//!
//! Every struct deserializes from TOML with all fields defaulted, so a config
//! file only needs the values it overrides:
//!
//! ```toml
//! max_depth = 6
//! depth_sweep = [3, 4, 5, 6, 7]
//!
//! [sparse_world]
//! cluster_count = 50
//!
//! [sensor]
//! clamp_max = 2.0
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{
  log_odds, probability, DEFAULT_DEPTH_SWEEP, LOG_ODDS_CLAMP, MAX_OCTREE_DEPTH,
  OCTREE_NODE_BYTES, P_HIT, P_MISS, VOXEL_ENTRY_BYTES,
};
use crate::error::{MapError, Result};

/// Log-odds sensor model: update increments and clamp range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorModel {
  /// Added to a cell on an "occupied" observation. Must be positive.
  pub log_odds_hit: f64,
  /// Added on a "free" observation. Unused by point insertion, which never
  /// observes free space.
  pub log_odds_miss: f64,
  /// Lower clamp bound. Must be below the neutral prior.
  pub clamp_min: f64,
  /// Upper clamp bound. Must be above the neutral prior.
  pub clamp_max: f64,
}

impl SensorModel {
  /// Build a model from hit/miss probabilities and a symmetric clamp.
  pub fn from_probabilities(p_hit: f64, p_miss: f64, clamp: f64) -> Self {
    Self {
      log_odds_hit: log_odds(p_hit),
      log_odds_miss: log_odds(p_miss),
      clamp_min: -clamp,
      clamp_max: clamp,
    }
  }

  /// Apply one observation to a stored value and clamp the result.
  #[inline]
  pub fn update(&self, current: f64, occupied: bool) -> f64 {
    let delta = if occupied {
      self.log_odds_hit
    } else {
      self.log_odds_miss
    };
    (current + delta).clamp(self.clamp_min, self.clamp_max)
  }

  /// Occupancy probability of a stored log-odds value.
  #[inline]
  pub fn probability(&self, log_odds: f64) -> f64 {
    probability(log_odds)
  }

  /// Check the constants. Rejects non-finite values, a non-positive hit
  /// increment and a clamp range that excludes the neutral prior.
  pub fn validate(&self) -> Result<()> {
    let values = [
      self.log_odds_hit,
      self.log_odds_miss,
      self.clamp_min,
      self.clamp_max,
    ];
    if values.iter().any(|v| !v.is_finite()) {
      return Err(MapError::invalid("sensor model constants must be finite"));
    }
    if self.log_odds_hit <= 0.0 {
      return Err(MapError::invalid(format!(
        "log_odds_hit must be positive, got {}",
        self.log_odds_hit
      )));
    }
    if !(self.clamp_min < 0.0 && self.clamp_max > 0.0) {
      return Err(MapError::invalid(format!(
        "clamp range [{}, {}] must contain the neutral prior",
        self.clamp_min, self.clamp_max
      )));
    }
    Ok(())
  }
}

impl Default for SensorModel {
  fn default() -> Self {
    Self::from_probabilities(P_HIT, P_MISS, LOG_ODDS_CLAMP)
  }
}

/// Per-entity byte model for the analytic memory estimate.
///
/// The estimate is `entity_count * bytes`. It is a model, not a measured heap
/// footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryModel {
  /// Bytes charged per octree node (internal or leaf).
  pub octree_node_bytes: u64,
  /// Bytes charged per stored voxel entry.
  pub voxel_entry_bytes: u64,
}

impl Default for MemoryModel {
  fn default() -> Self {
    Self {
      octree_node_bytes: OCTREE_NODE_BYTES,
      voxel_entry_bytes: VOXEL_ENTRY_BYTES,
    }
  }
}

/// Shape of the synthetic sparse clustered world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseWorldConfig {
  /// Edge length of the world cube, centered at the origin.
  pub world_extent: f64,
  /// Number of clusters scattered through the world.
  pub cluster_count: usize,
  /// Points emitted by each cluster.
  pub points_per_cluster: usize,
  /// Radius of the ball each cluster samples from.
  pub cluster_radius: f64,
  /// RNG seed. Equal seeds generate identical worlds.
  pub seed: u64,
}

impl Default for SparseWorldConfig {
  fn default() -> Self {
    Self {
      world_extent: 100.0,
      cluster_count: 200,
      points_per_cluster: 300,
      cluster_radius: 0.3,
      seed: 42,
    }
  }
}

impl SparseWorldConfig {
  /// Check the world shape.
  pub fn validate(&self) -> Result<()> {
    if !(self.world_extent.is_finite() && self.world_extent > 0.0) {
      return Err(MapError::invalid(format!(
        "sparse_world_extent must be positive, got {}",
        self.world_extent
      )));
    }
    if !(self.cluster_radius.is_finite() && self.cluster_radius >= 0.0) {
      return Err(MapError::invalid(format!(
        "cluster_radius must be non-negative, got {}",
        self.cluster_radius
      )));
    }
    if self.cluster_radius * 2.0 >= self.world_extent {
      return Err(MapError::invalid(
        "cluster diameter must be smaller than the world extent",
      ));
    }
    if self.cluster_count == 0 || self.points_per_cluster == 0 {
      return Err(MapError::invalid(
        "sparse_cluster_count and sparse_points_per_cluster must be positive",
      ));
    }
    Ok(())
  }
}

/// Top-level benchmark configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
  /// Octree depth used by single-build mode.
  pub max_depth: u8,
  /// Voxel size for single-build mode. `None` uses the size matched to
  /// `max_depth` (`root_side / 2^max_depth`).
  pub voxel_size: Option<f64>,
  /// Ordered depths visited by the sweep.
  pub depth_sweep: Vec<u8>,
  /// Synthetic sparse dataset shape.
  pub sparse_world: SparseWorldConfig,
  /// Log-odds constants.
  pub sensor: SensorModel,
  /// Memory estimate constants.
  pub memory: MemoryModel,
}

impl Default for BenchmarkConfig {
  fn default() -> Self {
    Self {
      max_depth: 6,
      voxel_size: None,
      depth_sweep: DEFAULT_DEPTH_SWEEP.to_vec(),
      sparse_world: SparseWorldConfig::default(),
      sensor: SensorModel::default(),
      memory: MemoryModel::default(),
    }
  }
}

impl BenchmarkConfig {
  /// Validate every field. Nothing is coerced.
  pub fn validate(&self) -> Result<()> {
    validate_depth(self.max_depth)?;
    if let Some(size) = self.voxel_size {
      validate_voxel_size(size)?;
    }
    if self.depth_sweep.is_empty() {
      return Err(MapError::invalid("depth_sweep must not be empty"));
    }
    for &depth in &self.depth_sweep {
      validate_depth(depth)?;
    }
    self.sparse_world.validate()?;
    self.sensor.validate()
  }
}

/// Depth must be in `1..=MAX_OCTREE_DEPTH`.
pub fn validate_depth(depth: u8) -> Result<()> {
  if depth == 0 || depth > MAX_OCTREE_DEPTH {
    return Err(MapError::invalid(format!(
      "max_depth must be in 1..={}, got {}",
      MAX_OCTREE_DEPTH, depth
    )));
  }
  Ok(())
}

/// Voxel size must be finite and positive.
pub fn validate_voxel_size(voxel_size: f64) -> Result<()> {
  if !(voxel_size.is_finite() && voxel_size > 0.0) {
    return Err(MapError::invalid(format!(
      "voxel_size must be positive, got {}",
      voxel_size
    )));
  }
  Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
