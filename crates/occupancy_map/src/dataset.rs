//! Point sources feeding the benchmark.
//!
//! Synthetic generators are deterministic for a given seed so sweeps are
//! reproducible run to run.

use glam::DVec3;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SparseWorldConfig;
use crate::error::{MapError, Result};
use crate::octree::BoundingCube;

/// Labelled point cloud, optionally with a known bounding region.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
  label: String,
  points: Vec<DVec3>,
  region: Option<BoundingCube>,
}

impl Dataset {
  pub fn new(label: impl Into<String>, points: Vec<DVec3>) -> Self {
    Self {
      label: label.into(),
      points,
      region: None,
    }
  }

  /// Use `region` as the octree root instead of deriving one from the points.
  pub fn with_region(mut self, region: BoundingCube) -> Self {
    self.region = Some(region);
    self
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn points(&self) -> &[DVec3] {
    &self.points
  }

  pub fn region(&self) -> Option<&BoundingCube> {
    self.region.as_ref()
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
}

/// Anything that can produce a [`Dataset`].
pub trait PointSource {
  fn generate(&self) -> Result<Dataset>;
}

impl PointSource for Dataset {
  fn generate(&self) -> Result<Dataset> {
    Ok(self.clone())
  }
}

/// Uniform sample inside the unit ball (rejection from the enclosing cube).
fn unit_ball(rng: &mut StdRng) -> DVec3 {
  loop {
    let p = DVec3::new(
      rng.random_range(-1.0..=1.0),
      rng.random_range(-1.0..=1.0),
      rng.random_range(-1.0..=1.0),
    );
    if p.length_squared() <= 1.0 {
      return p;
    }
  }
}

/// Uniform direction on the unit sphere.
fn unit_direction(rng: &mut StdRng) -> DVec3 {
  loop {
    let p = unit_ball(rng);
    let len = p.length();
    if len > 1e-9 {
      return p / len;
    }
  }
}

// =============================================================================
// SparseWorld
// =============================================================================

/// Mostly empty world with small dense clusters.
///
/// ```text
/// +-------------------------------+  world cube, side = world_extent
/// |   .:.                 .:.     |
/// |            .:.                |  cluster_count centers, uniform within
/// |                  .:.          |  [-half + r, half - r] per axis
/// |  .:.                          |
/// |          .:.            .:.   |  points_per_cluster samples, uniform
/// +-------------------------------+  inside a ball of radius r
/// ```
///
/// Clusters are deliberately uniform in a hard-edged ball, not Gaussian blobs
/// with scale r, so every sample stays inside the world cube.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseWorld {
  config: SparseWorldConfig,
}

impl SparseWorld {
  pub fn new(config: SparseWorldConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn config(&self) -> &SparseWorldConfig {
    &self.config
  }

  /// The world cube, centered at the origin.
  pub fn region(&self) -> Result<BoundingCube> {
    BoundingCube::new(DVec3::ZERO, self.config.world_extent * 0.5)
  }
}

impl PointSource for SparseWorld {
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "dataset::sparse_world"))]
  fn generate(&self) -> Result<Dataset> {
    let cfg = &self.config;
    cfg.validate()?;
    let region = self.region()?;
    let reach = region.half_extent - cfg.cluster_radius;

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut points = Vec::with_capacity(cfg.cluster_count * cfg.points_per_cluster);
    for _ in 0..cfg.cluster_count {
      let center = DVec3::new(
        rng.random_range(-reach..=reach),
        rng.random_range(-reach..=reach),
        rng.random_range(-reach..=reach),
      );
      for _ in 0..cfg.points_per_cluster {
        points.push(center + unit_ball(&mut rng) * cfg.cluster_radius);
      }
    }

    debug!(
      "sparse world: {} clusters x {} points in a {} cube (seed {})",
      cfg.cluster_count, cfg.points_per_cluster, cfg.world_extent, cfg.seed
    );
    Ok(Dataset::new("sparse_world", points).with_region(region))
  }
}

// =============================================================================
// SphereShell
// =============================================================================

/// Dense surface cloud: a thick spherical shell.
///
/// Stands in for a real scan (a single connected surface, densely sampled)
/// when no point file is available.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereShell {
  /// Shell center.
  pub center: DVec3,
  /// Mean shell radius.
  pub radius: f64,
  /// Radial thickness; points spread uniformly in `radius +- thickness / 2`.
  pub thickness: f64,
  /// Number of points.
  pub count: usize,
  /// RNG seed.
  pub seed: u64,
}

impl Default for SphereShell {
  fn default() -> Self {
    Self {
      center: DVec3::ZERO,
      radius: 1.0,
      thickness: 0.02,
      count: 100_000,
      seed: 7,
    }
  }
}

impl SphereShell {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_center(mut self, center: DVec3) -> Self {
    self.center = center;
    self
  }

  pub fn with_radius(mut self, radius: f64) -> Self {
    self.radius = radius;
    self
  }

  pub fn with_thickness(mut self, thickness: f64) -> Self {
    self.thickness = thickness;
    self
  }

  pub fn with_count(mut self, count: usize) -> Self {
    self.count = count;
    self
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }

  fn validate(&self) -> Result<()> {
    if !self.center.is_finite() {
      return Err(MapError::invalid("sphere shell center must be finite"));
    }
    if !(self.radius.is_finite() && self.radius > 0.0) {
      return Err(MapError::invalid(format!(
        "sphere shell radius must be positive, got {}",
        self.radius
      )));
    }
    if !(self.thickness.is_finite() && self.thickness >= 0.0 && self.thickness < self.radius * 2.0)
    {
      return Err(MapError::invalid(format!(
        "sphere shell thickness must be in [0, 2 * radius), got {}",
        self.thickness
      )));
    }
    if self.count == 0 {
      return Err(MapError::invalid("sphere shell point count must be positive"));
    }
    Ok(())
  }
}

impl PointSource for SphereShell {
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "dataset::sphere_shell"))]
  fn generate(&self) -> Result<Dataset> {
    self.validate()?;
    let mut rng = StdRng::seed_from_u64(self.seed);
    let half = self.thickness * 0.5;
    let points = (0..self.count)
      .map(|_| {
        let r = if half > 0.0 {
          self.radius + rng.random_range(-half..=half)
        } else {
          self.radius
        };
        self.center + unit_direction(&mut rng) * r
      })
      .collect();
    Ok(Dataset::new("sphere_shell", points))
  }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod dataset_test;
