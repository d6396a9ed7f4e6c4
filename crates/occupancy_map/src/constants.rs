//! Fixed model constants for occupancy mapping.
//!
//! Sensor-model values are stored as log-odds so that Bayesian fusion of
//! independent observations reduces to addition.
//!
//! ```text
//! log_odds(p) = ln(p / (1 - p))
//!
//!   p = 0.7  ->  +0.8473   (observed occupied)
//!   p = 0.5  ->   0.0      (unknown / neutral prior)
//!   p = 0.4  ->  -0.4055   (observed free)
//! ```
//!
//! These are defaults only. [`crate::config::SensorModel`] and
//! [`crate::config::MemoryModel`] carry the values actually used by a build,
//! so several configurations can coexist in one benchmark run.

/// Hit probability of the default sensor model.
pub const P_HIT: f64 = 0.7;

/// Miss probability of the default sensor model.
pub const P_MISS: f64 = 0.4;

/// Symmetric clamp bound applied to every stored log-odds value.
pub const LOG_ODDS_CLAMP: f64 = 3.5;

/// Neutral prior; also the strict threshold for "occupied".
pub const LOG_ODDS_PRIOR: f64 = 0.0;

/// Deepest octree supported. 2^21 cells per axis keeps matched voxel indices
/// far inside the `i64` key range.
pub const MAX_OCTREE_DEPTH: u8 = 21;

/// Relative margin added around a derived root cube.
pub const ROOT_MARGIN: f64 = 0.01;

/// Smallest half-extent of a derived root cube (single-point or planar input).
pub const MIN_HALF_EXTENT: f64 = 1e-6;

/// Estimated bytes per octree node.
///
/// ```text
/// center        3 x f64   24
/// half-extent       f64    8
/// log-odds          f64    8
/// children      8 x ref   64
/// overhead                96
///                        ---
///                        200
/// ```
pub const OCTREE_NODE_BYTES: u64 = 200;

/// Estimated bytes per sparse voxel entry (3-axis key, count, map overhead).
pub const VOXEL_ENTRY_BYTES: u64 = 50;

/// Default octree depth sweep.
pub const DEFAULT_DEPTH_SWEEP: [u8; 5] = [3, 4, 5, 6, 7];

/// Convert a probability to log-odds.
#[inline]
pub fn log_odds(p: f64) -> f64 {
  (p / (1.0 - p)).ln()
}

/// Convert log-odds back to a probability.
#[inline]
pub fn probability(log_odds: f64) -> f64 {
  1.0 / (1.0 + (-log_odds).exp())
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
