//! Error type shared by every structure and the benchmark harness.

use glam::DVec3;
use thiserror::Error;

/// Errors raised by construction, insertion and metrics.
///
/// Configuration and input errors surface at the call that violates the
/// contract. Memory exhaustion is not modelled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
	/// A depth, voxel size, sweep value or model constant is out of range.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// A build or bounding-box query was given zero points.
	#[error("empty input: at least one point is required")]
	EmptyInput,

	/// A point outside the octree root cube. Such points are rejected, never
	/// clamped.
	#[error("point {point} lies outside the octree root cube")]
	OutOfBoundsPoint {
		/// The rejected point.
		point: DVec3,
	},

	/// A point with a NaN or infinite coordinate.
	#[error("point {point} has a non-finite coordinate")]
	NonFinitePoint {
		/// The rejected point.
		point: DVec3,
	},

	/// A point whose voxel index at `voxel_size` falls outside the `i64`
	/// key range.
	#[error("point {point} has a voxel index outside the key range at voxel size {voxel_size}")]
	VoxelIndexOverflow {
		/// The rejected point.
		point: DVec3,
		/// Edge length the index was computed at.
		voxel_size: f64,
	},
}

impl MapError {
	pub(crate) fn invalid(msg: impl Into<String>) -> Self {
		Self::InvalidConfiguration(msg.into())
	}
}

/// Result alias for this crate.
pub type Result<T, E = MapError> = std::result::Result<T, E>;
