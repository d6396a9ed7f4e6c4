//! VoxelKey - integer voxel coordinate.

use glam::{DVec3, I64Vec3};

use crate::error::{MapError, Result};

/// 2^63: first cell index past the `i64` range.
const INDEX_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Voxel coordinate, one `i64` per axis.
///
/// Ordered lexicographically (x, then y, then z).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct VoxelKey {
  x: i64,
  y: i64,
  z: i64,
}

impl VoxelKey {
  #[inline]
  pub fn new(x: i64, y: i64, z: i64) -> Self {
    Self { x, y, z }
  }

  /// Voxel containing `point` at `voxel_size`: `floor(p / s)` per axis.
  ///
  /// Flooring keeps negative coordinates consistent (`-0.1 / 1.0` maps to
  /// -1, not 0). An index outside the `i64` range fails with
  /// [`MapError::VoxelIndexOverflow`]; distinct cells never share a key.
  #[inline]
  pub fn from_point(point: DVec3, voxel_size: f64) -> Result<Self> {
    let cell = (point / voxel_size).floor();
    let in_range = |c: f64| (-INDEX_LIMIT..INDEX_LIMIT).contains(&c);
    if !(in_range(cell.x) && in_range(cell.y) && in_range(cell.z)) {
      return Err(MapError::VoxelIndexOverflow { point, voxel_size });
    }
    Ok(Self::new(cell.x as i64, cell.y as i64, cell.z as i64))
  }

  #[inline]
  pub fn x(self) -> i64 {
    self.x
  }

  #[inline]
  pub fn y(self) -> i64 {
    self.y
  }

  #[inline]
  pub fn z(self) -> i64 {
    self.z
  }

  /// Coordinates as a vector.
  #[inline]
  pub fn coords(self) -> I64Vec3 {
    I64Vec3::new(self.x, self.y, self.z)
  }

  /// World-space minimum corner of this voxel.
  #[inline]
  pub fn min_corner(self, voxel_size: f64) -> DVec3 {
    self.coords().as_dvec3() * voxel_size
  }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;
