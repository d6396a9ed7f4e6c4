//! Axis-aligned bounds with double precision.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_HALF_EXTENT, ROOT_MARGIN};
use crate::error::{MapError, Result};

/// Double-precision axis-aligned bounding box.
///
/// Used for the bounding box of a point sequence and for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DAabb3 {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl DAabb3 {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create a new AABB from center and half-extents.
	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Component-wise min/max over a point sequence.
	///
	/// Fails with [`MapError::EmptyInput`] on an empty slice and with
	/// [`MapError::NonFinitePoint`] if any coordinate is NaN or infinite.
	pub fn from_points(points: &[DVec3]) -> Result<Self> {
		let (first, rest) = points.split_first().ok_or(MapError::EmptyInput)?;
		if !first.is_finite() {
			return Err(MapError::NonFinitePoint { point: *first });
		}
		let mut aabb = Self::new(*first, *first);
		for &point in rest {
			if !point.is_finite() {
				return Err(MapError::NonFinitePoint { point });
			}
			aabb.extend(point);
		}
		Ok(aabb)
	}

	/// Grow the box to include a point.
	#[inline]
	pub fn extend(&mut self, point: DVec3) {
		self.min = self.min.min(point);
		self.max = self.max.max(point);
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}
}

/// Cube region covered by an octree root.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingCube {
	/// Center of the cube.
	pub center: DVec3,
	/// Half of the edge length. Always positive.
	pub half_extent: f64,
}

impl BoundingCube {
	/// Create a cube, rejecting a non-positive or non-finite half-extent.
	pub fn new(center: DVec3, half_extent: f64) -> Result<Self> {
		if !center.is_finite() {
			return Err(MapError::invalid("cube center must be finite"));
		}
		if !(half_extent.is_finite() && half_extent > 0.0) {
			return Err(MapError::invalid(format!(
				"cube half-extent must be positive, got {}",
				half_extent
			)));
		}
		Ok(Self {
			center,
			half_extent,
		})
	}

	/// Smallest cube centered on `aabb` covering its longest axis, grown by
	/// [`ROOT_MARGIN`] so no input point sits on the root boundary.
	pub fn enclosing(aabb: &DAabb3) -> Self {
		let half = (aabb.size().max_element() * 0.5).max(MIN_HALF_EXTENT);
		Self {
			center: aabb.center(),
			half_extent: half * (1.0 + ROOT_MARGIN),
		}
	}

	/// Edge length.
	#[inline]
	pub fn side(&self) -> f64 {
		self.half_extent * 2.0
	}

	/// Inclusive containment test.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		self.aabb().contains_point(point)
	}

	/// The cube as an AABB.
	#[inline]
	pub fn aabb(&self) -> DAabb3 {
		DAabb3::from_center_half_extents(self.center, DVec3::splat(self.half_extent))
	}
}
