//! Benchmark harness: octree vs sparse voxel grid over a depth sweep.
//!
//! ```text
//! for dataset in datasets:
//!   for depth in depth_sweep:
//!     ┌──────────────────────────────────────────────────────────────┐
//!     │ bbox   = bounding_box(points)                                │
//!     │ cube   = dataset.region or enclosing(bbox)                   │
//!     │ octree = OccupancyOctree::new(cube, depth)   voxel = side/2^d│
//!     │ grid   = VoxelGrid::new(voxel)                               │
//!     │                                                              │
//!     │ t0 ── octree.build(points) ── t1     (timed)                 │
//!     │ t2 ── grid.build(points)   ── t3     (timed)                 │
//!     │                                                              │
//!     │ metrics(octree), metrics(grid) ──► BenchmarkRow              │
//!     └──────────────────────────────────────────────────────────────┘
//!     error? ──► warn! + FailedStep, continue
//! ```
//!
//! Every step builds fresh structures; nothing is reused across steps. Only
//! the insertion loops are timed.

pub mod summary;

pub use summary::BuildSummary;

use log::{info, warn};
use serde::Serialize;
use web_time::Instant;

use crate::config::{validate_depth, validate_voxel_size, BenchmarkConfig};
use crate::dataset::{Dataset, PointSource, SparseWorld};
use crate::error::{MapError, Result};
use crate::metrics::{bounding_box, StructureMetrics};
use crate::octree::{BoundingCube, OccupancyOctree, OctreeConfig};
use crate::voxel::VoxelGrid;

/// One dataset x depth measurement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkRow {
  pub dataset_label: String,
  pub depth: u8,
  /// Voxel size used by the grid.
  pub voxel_size: f64,
  pub point_count: usize,
  /// Wall-clock octree insertion time.
  pub build_time_octree_us: u64,
  /// Wall-clock grid insertion time.
  pub build_time_dense_us: u64,
  pub metrics_octree: StructureMetrics,
  pub metrics_dense: StructureMetrics,
  /// Mean occupancy probability of the octree's occupied leaves.
  pub mean_occupied_probability: Option<f64>,
}

/// A sweep step that could not produce a row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedStep {
  pub dataset_label: String,
  pub depth: u8,
  pub error: String,
}

/// Sweep output: successful rows in sweep order plus isolated failures.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BenchmarkReport {
  pub rows: Vec<BenchmarkRow>,
  pub failures: Vec<FailedStep>,
}

impl BenchmarkReport {
  /// True when every step produced a row.
  pub fn is_complete(&self) -> bool {
    self.failures.is_empty()
  }

  /// Rows belonging to one dataset, in depth order.
  pub fn rows_for<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a BenchmarkRow> + 'a {
    self.rows.iter().filter(move |row| row.dataset_label == label)
  }
}

/// Runs builds and sweeps under one validated [`BenchmarkConfig`].
#[derive(Clone, Debug)]
pub struct Harness {
  config: BenchmarkConfig,
}

impl Harness {
  /// Validate the configuration. Invalid values are rejected, never coerced.
  pub fn new(config: BenchmarkConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn config(&self) -> &BenchmarkConfig {
    &self.config
  }

  /// Generate the configured synthetic sparse world.
  pub fn sparse_dataset(&self) -> Result<Dataset> {
    SparseWorld::new(self.config.sparse_world.clone())?.generate()
  }

  /// Sweep every dataset over `depth_sweep`.
  ///
  /// A failing step is logged and recorded in
  /// [`BenchmarkReport::failures`]; the sweep continues with the next step.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "benchmark::run"))]
  pub fn run(&self, datasets: &[Dataset]) -> BenchmarkReport {
    let mut report = BenchmarkReport::default();
    for dataset in datasets {
      for &depth in &self.config.depth_sweep {
        match self.run_step(dataset, depth) {
          Ok(row) => {
            info!(
              "{} depth {}: octree {} nodes / {} us, grid {} voxels / {} us",
              row.dataset_label,
              row.depth,
              row.metrics_octree.total(),
              row.build_time_octree_us,
              row.metrics_dense.total(),
              row.build_time_dense_us
            );
            report.rows.push(row);
          }
          Err(err) => {
            warn!("{} depth {} failed: {}", dataset.label(), depth, err);
            report.failures.push(FailedStep {
              dataset_label: dataset.label().to_owned(),
              depth,
              error: err.to_string(),
            });
          }
        }
      }
    }
    report
  }

  /// One sweep step with the grid at the matched voxel size.
  pub fn run_step(&self, dataset: &Dataset, depth: u8) -> Result<BenchmarkRow> {
    self.measure(dataset, depth, None)
  }

  /// Build both structures once and summarize.
  ///
  /// `voxel_size` of `None` matches the grid to the octree leaf edge.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "benchmark::single_build"))]
  pub fn single_build(
    &self,
    dataset: &Dataset,
    depth: u8,
    voxel_size: Option<f64>,
  ) -> Result<BuildSummary> {
    self
      .measure(dataset, depth, voxel_size)
      .map(|row| BuildSummary::new(row, &self.config.memory))
  }

  /// Single build with `max_depth` and `voxel_size` taken from the config.
  pub fn single_build_configured(&self, dataset: &Dataset) -> Result<BuildSummary> {
    self.single_build(dataset, self.config.max_depth, self.config.voxel_size)
  }

  fn measure(&self, dataset: &Dataset, depth: u8, voxel_size: Option<f64>) -> Result<BenchmarkRow> {
    validate_depth(depth)?;
    if let Some(size) = voxel_size {
      validate_voxel_size(size)?;
    }
    let points = dataset.points();
    if points.is_empty() {
      return Err(MapError::EmptyInput);
    }

    let bbox = bounding_box(points)?;
    let cube = match dataset.region() {
      Some(region) => *region,
      None => BoundingCube::enclosing(&bbox),
    };
    let mut octree = OccupancyOctree::new(cube, OctreeConfig::new(depth, self.config.sensor)?)?;
    let voxel_size = voxel_size.unwrap_or_else(|| octree.leaf_edge());
    let mut grid = VoxelGrid::new(voxel_size)?;

    let start = Instant::now();
    octree.build(points)?;
    let build_time_octree_us = start.elapsed().as_micros() as u64;

    let start = Instant::now();
    grid.build(points)?;
    let build_time_dense_us = start.elapsed().as_micros() as u64;

    let memory = &self.config.memory;
    Ok(BenchmarkRow {
      dataset_label: dataset.label().to_owned(),
      depth,
      voxel_size,
      point_count: points.len(),
      build_time_octree_us,
      build_time_dense_us,
      metrics_octree: StructureMetrics::collect(&octree, &bbox, memory),
      metrics_dense: StructureMetrics::collect(&grid, &bbox, memory),
      mean_occupied_probability: octree.mean_occupied_probability(),
    })
  }
}
