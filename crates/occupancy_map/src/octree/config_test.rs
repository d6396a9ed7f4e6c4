use super::*;
use crate::error::MapError;

/// Default config is depth 6 with the default sensor model.
#[test]
fn test_default_is_valid() {
  let config = OctreeConfig::default();
  assert_eq!(config.max_depth, 6);
  assert!(config.validate().is_ok());
}

/// Half-extent halves with each depth level.
#[test]
fn test_half_extent_halves_per_depth() {
  let config = OctreeConfig::default();
  assert_eq!(config.half_extent_at(8.0, 0), 8.0);
  assert_eq!(config.half_extent_at(8.0, 1), 4.0);
  assert_eq!(config.half_extent_at(8.0, 3), 1.0);
}

/// Leaf edge = root side / 2^D
#[test]
fn test_leaf_edge() {
  let config = OctreeConfig::new(5, SensorModel::default()).unwrap();
  // Root side 64 -> 64 / 32 = 2
  assert_eq!(config.leaf_edge(32.0), 2.0);
}

#[test]
fn test_new_rejects_zero_depth() {
  assert!(matches!(
    OctreeConfig::new(0, SensorModel::default()),
    Err(MapError::InvalidConfiguration(_))
  ));
}

#[test]
fn test_new_rejects_bad_sensor() {
  let sensor = SensorModel {
    log_odds_hit: -1.0,
    ..Default::default()
  };
  assert!(OctreeConfig::new(4, sensor).is_err());
}
