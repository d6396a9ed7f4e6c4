//! BuildSummary - comparative report of one octree/grid build pair.

use std::fmt;

use serde::Serialize;

use super::BenchmarkRow;
use crate::config::MemoryModel;

const MIB: f64 = 1024.0 * 1024.0;

/// One measured build pair plus the ratios derived from it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildSummary {
  row: BenchmarkRow,
  theoretical_dense_memory_bytes: u64,
}

impl BuildSummary {
  pub fn new(row: BenchmarkRow, memory: &MemoryModel) -> Self {
    let theoretical_dense_memory_bytes = row
      .metrics_dense
      .theoretical_dense_cells()
      .saturating_mul(memory.voxel_entry_bytes);
    Self {
      row,
      theoretical_dense_memory_bytes,
    }
  }

  /// The underlying measurement.
  pub fn row(&self) -> &BenchmarkRow {
    &self.row
  }

  /// Memory a fully allocated grid at the grid's voxel size would need.
  pub fn theoretical_dense_memory_bytes(&self) -> u64 {
    self.theoretical_dense_memory_bytes
  }

  /// Dense build time over octree build time. Above 1 means the octree was
  /// faster. Sub-microsecond timings count as 1 us.
  pub fn speedup(&self) -> f64 {
    self.row.build_time_dense_us.max(1) as f64 / self.row.build_time_octree_us.max(1) as f64
  }

  /// Dense memory estimate over octree memory estimate. Above 1 means the
  /// octree is smaller.
  pub fn memory_ratio(&self) -> f64 {
    let octree = self.row.metrics_octree.estimated_memory_bytes();
    if octree == 0 {
      return f64::INFINITY;
    }
    self.row.metrics_dense.estimated_memory_bytes() as f64 / octree as f64
  }

  /// Fraction of the theoretical full grid that holds at least one point.
  pub fn occupancy_fraction(&self) -> f64 {
    self.row.metrics_dense.occupancy_fraction()
  }

  /// Theoretical full grid cells per octree node.
  pub fn structural_compression(&self) -> f64 {
    self.row.metrics_dense.theoretical_dense_cells() as f64
      / self.row.metrics_octree.total().max(1) as f64
  }

  /// Octree build time per node (internal + leaf).
  pub fn octree_us_per_node(&self) -> f64 {
    self.row.build_time_octree_us as f64 / self.row.metrics_octree.total().max(1) as f64
  }

  /// Grid build time per stored voxel.
  pub fn dense_us_per_voxel(&self) -> f64 {
    self.row.build_time_dense_us as f64 / self.row.metrics_dense.total().max(1) as f64
  }
}

impl fmt::Display for BuildSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let row = &self.row;
    let octree = &row.metrics_octree;
    let dense = &row.metrics_dense;
    let bbox = octree.bounding_box();
    let rule = "=".repeat(60);

    writeln!(f, "{}", rule)?;
    writeln!(f, "{} ({} points)", row.dataset_label, row.point_count)?;
    writeln!(f, "{}", rule)?;
    writeln!(f, "Bounding box min:    {}", bbox.min)?;
    writeln!(f, "Bounding box max:    {}", bbox.max)?;
    writeln!(f, "Bounding box center: {}", bbox.center())?;
    writeln!(f, "Bounding box size:   {}", bbox.size())?;
    writeln!(f, "Octree depth:        {}", row.depth)?;
    writeln!(f, "Octree leaf edge:    {:.6}", octree.resolution())?;
    writeln!(f, "Voxel size:          {:.6}", row.voxel_size)?;

    writeln!(f)?;
    writeln!(f, "Runtime:")?;
    writeln!(f, "  Dense grid: {:>12} us", row.build_time_dense_us)?;
    writeln!(f, "  Octree:     {:>12} us", row.build_time_octree_us)?;
    let faster = if self.speedup() >= 1.0 { "octree faster" } else { "dense faster" };
    writeln!(f, "  Speedup:    {:>12.2}x ({})", self.speedup(), faster)?;

    writeln!(f)?;
    writeln!(f, "Estimated memory (sparse structures):")?;
    writeln!(
      f,
      "  Dense grid: {} voxels ({:.2} MiB)",
      dense.total(),
      dense.estimated_memory_mb()
    )?;
    writeln!(
      f,
      "  Octree:     {} nodes, {} occupied leaves ({:.2} MiB)",
      octree.total(),
      octree.occupied(),
      octree.estimated_memory_mb()
    )?;
    if let Some(p) = row.mean_occupied_probability {
      writeln!(f, "  Mean occupied leaf probability: {:.4}", p)?;
    }
    let smaller = if self.memory_ratio() >= 1.0 { "octree smaller" } else { "dense smaller" };
    writeln!(f, "  Ratio:      {:.2}x ({})", self.memory_ratio(), smaller)?;

    writeln!(f)?;
    writeln!(f, "Theoretical full grid at voxel size:")?;
    writeln!(f, "  Cells:                  {}", dense.theoretical_dense_cells())?;
    writeln!(
      f,
      "  Memory:                 {:.2} MiB",
      self.theoretical_dense_memory_bytes as f64 / MIB
    )?;
    writeln!(f, "  Occupancy fraction:     {:.6}%", self.occupancy_fraction() * 100.0)?;
    writeln!(
      f,
      "  Structural compression: {:.1}x fewer cells in the octree",
      self.structural_compression()
    )?;

    writeln!(f)?;
    writeln!(f, "Theoretical full grid at octree leaf edge:")?;
    writeln!(f, "  Cells:                  {}", octree.theoretical_dense_cells())?;
    writeln!(
      f,
      "  Structural compression: {:.1}x fewer cells in the octree",
      octree.theoretical_dense_cells() as f64 / octree.total().max(1) as f64
    )?;

    writeln!(f)?;
    writeln!(f, "Build time per entity:")?;
    writeln!(f, "  Dense grid: {:.3} us/voxel", self.dense_us_per_voxel())?;
    writeln!(f, "  Octree:     {:.3} us/node", self.octree_us_per_node())?;
    write!(f, "{}", rule)
  }
}

#[cfg(test)]
mod tests {
  use glam::DVec3;

  use super::*;
  use crate::metrics::StructureMetrics;
  use crate::octree::{DAabb3, OccupancyOctree, OctreeConfig};
  use crate::voxel::VoxelGrid;

  fn summary(octree_us: u64, dense_us: u64) -> BuildSummary {
    let points = [DVec3::ZERO, DVec3::new(2.0, 2.0, 2.0)];
    let bbox = DAabb3::from_points(&points).unwrap();
    let memory = MemoryModel::default();
    let tree = OccupancyOctree::from_points(&points, OctreeConfig::default()).unwrap();
    let grid = VoxelGrid::from_points(&points, 1.0).unwrap();

    let row = BenchmarkRow {
      dataset_label: "pair".into(),
      depth: tree.config().max_depth,
      voxel_size: 1.0,
      point_count: points.len(),
      build_time_octree_us: octree_us,
      build_time_dense_us: dense_us,
      metrics_octree: StructureMetrics::collect(&tree, &bbox, &memory),
      metrics_dense: StructureMetrics::collect(&grid, &bbox, &memory),
      mean_occupied_probability: tree.mean_occupied_probability(),
    };
    BuildSummary::new(row, &memory)
  }

  #[test]
  fn test_ratios() {
    let s = summary(10, 30);
    assert_eq!(s.speedup(), 3.0);

    // Opposite corners share only the root's subdivision; below that each
    // path subdivides five more levels.
    let nodes = s.row().metrics_octree.total();
    assert_eq!(nodes, 1 + 8 + 2 * 5 * 8);
    assert_eq!(s.memory_ratio(), (2 * 50) as f64 / (nodes * 200) as f64);

    // 2 x 2 x 2 grid cells, 2 voxels stored.
    assert_eq!(s.theoretical_dense_memory_bytes(), 8 * 50);
    assert_eq!(s.occupancy_fraction(), 0.25);
    assert_eq!(s.structural_compression(), 8.0 / nodes as f64);
    assert_eq!(s.dense_us_per_voxel(), 15.0);
  }

  #[test]
  fn test_zero_timings_do_not_divide_by_zero() {
    let s = summary(0, 0);
    assert_eq!(s.speedup(), 1.0);
    assert_eq!(s.octree_us_per_node(), 0.0);
  }

  #[test]
  fn test_display_sections() {
    let s = summary(5, 20);
    let text = s.to_string();
    let bbox_min = format!("Bounding box min:    {}", DVec3::ZERO);
    let bbox_max = format!("Bounding box max:    {}", DVec3::splat(2.0));
    let leaf_cells = format!(
      "  Cells:                  {}",
      s.row().metrics_octree.theoretical_dense_cells()
    );
    for needle in [
      "pair (2 points)",
      bbox_min.as_str(),
      bbox_max.as_str(),
      "Runtime:",
      "Speedup:",
      "(octree faster)",
      "Estimated memory",
      "Mean occupied leaf probability: 0.7000",
      "Theoretical full grid at voxel size:",
      "Theoretical full grid at octree leaf edge:",
      leaf_cells.as_str(),
      "Build time per entity:",
    ] {
      assert!(text.contains(needle), "missing {:?} in\n{}", needle, text);
    }
  }

  /// The octree's own theoretical grid uses the leaf edge, not the voxel size.
  #[test]
  fn test_leaf_edge_grid_is_finer() {
    let s = summary(1, 1);
    let octree = &s.row().metrics_octree;
    let dense = &s.row().metrics_dense;
    assert!(octree.resolution() < dense.resolution());
    assert!(octree.theoretical_dense_cells() > dense.theoretical_dense_cells());
  }
}
