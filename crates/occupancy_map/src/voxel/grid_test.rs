use super::*;

#[test]
fn test_new_rejects_bad_voxel_size() {
  for size in [0.0, -0.1, f64::NAN, f64::INFINITY] {
    assert!(
      matches!(VoxelGrid::new(size), Err(MapError::InvalidConfiguration(_))),
      "voxel size {} accepted",
      size
    );
  }
}

/// Hits accumulate per voxel; new voxels start at 1.
#[test]
fn test_insert_counts_hits() {
  let mut grid = VoxelGrid::new(1.0).unwrap();
  let a = grid.insert(DVec3::new(0.2, 0.2, 0.2)).unwrap();
  let b = grid.insert(DVec3::new(0.8, 0.1, 0.9)).unwrap();
  let c = grid.insert(DVec3::new(1.2, 0.1, 0.9)).unwrap();

  assert_eq!(a, b);
  assert_ne!(a, c);
  assert_eq!(grid.hits(a), 2);
  assert_eq!(grid.hits(c), 1);
  assert_eq!(grid.len(), 2);
  assert_eq!(grid.points_inserted(), 3);
  assert_eq!(grid.hits(VoxelKey::new(9, 9, 9)), 0);
}

/// A key exists iff a point hashed to it.
#[test]
fn test_only_touched_voxels_exist() {
  let points = [
    DVec3::new(-0.5, -0.5, -0.5),
    DVec3::new(2.5, 0.5, 0.5),
    DVec3::new(2.6, 0.4, 0.3),
  ];
  let grid = VoxelGrid::from_points(&points, 1.0).unwrap();
  assert!(grid.contains(VoxelKey::new(-1, -1, -1)));
  assert!(grid.contains(VoxelKey::new(2, 0, 0)));
  assert!(!grid.contains(VoxelKey::new(0, 0, 0)));
  assert_eq!(grid.len(), 2);

  let total: u32 = grid.iter().map(|(_, hits)| hits).sum();
  assert_eq!(total as usize, points.len());
}

#[test]
fn test_empty_build_is_error() {
  let mut grid = VoxelGrid::new(0.5).unwrap();
  assert_eq!(grid.build(&[]), Err(MapError::EmptyInput));
  assert!(grid.is_empty());
  assert!(VoxelGrid::from_points(&[], 0.5).is_err());
}

#[test]
fn test_non_finite_rejected() {
  let mut grid = VoxelGrid::new(0.5).unwrap();
  assert!(matches!(
    grid.insert(DVec3::new(f64::INFINITY, 0.0, 0.0)),
    Err(MapError::NonFinitePoint { .. })
  ));
  assert!(grid.is_empty());
  assert!(grid.bounds().is_none());
}

/// Far apart cells at a tiny voxel size stay separate voxels.
#[test]
fn test_far_cells_not_merged() {
  let mut grid = VoxelGrid::new(1e-9).unwrap();
  let a = grid.insert(DVec3::new(10.0, 0.0, 0.0)).unwrap();
  let b = grid.insert(DVec3::new(20.0, 0.0, 0.0)).unwrap();

  assert_ne!(a, b);
  assert_eq!(grid.len(), 2);
  assert_eq!(grid.hits(a), 1);
  assert_eq!(grid.hits(b), 1);
}

/// An index past the key range is rejected before any mutation.
#[test]
fn test_index_overflow_rejected() {
  let mut grid = VoxelGrid::new(1e-9).unwrap();
  assert!(matches!(
    grid.insert(DVec3::new(1e30, 0.0, 0.0)),
    Err(MapError::VoxelIndexOverflow { .. })
  ));
  assert!(grid.is_empty());
  assert!(grid.bounds().is_none());
  assert_eq!(grid.points_inserted(), 0);
}

/// Running bounds track every inserted point.
#[test]
fn test_bounds_track_points() {
  let points = [
    DVec3::new(1.0, 2.0, 3.0),
    DVec3::new(-1.0, 5.0, 0.0),
    DVec3::new(0.0, -2.0, 4.0),
  ];
  let grid = VoxelGrid::from_points(&points, 0.5).unwrap();
  let bounds = grid.bounds().unwrap();
  assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, 0.0));
  assert_eq!(bounds.max, DVec3::new(1.0, 5.0, 4.0));
}

/// ceil(extent / s) per axis, multiplied.
#[test]
fn test_theoretical_dense_cells() {
  let points = [DVec3::ZERO, DVec3::new(1.0, 2.0, 0.75)];
  let grid = VoxelGrid::from_points(&points, 0.5).unwrap();
  // 2 * 4 * 2
  assert_eq!(grid.theoretical_dense_cells().unwrap(), 16);

  let empty = VoxelGrid::new(0.1).unwrap();
  assert_eq!(empty.theoretical_dense_cells(), Err(MapError::EmptyInput));
}

/// Re-hashing identical input reproduces identical voxel sets.
#[test]
fn test_rebuild_is_deterministic() {
  let points: Vec<_> = (0..200)
    .map(|i| {
      let t = i as f64 * 0.37;
      DVec3::new(t.sin() * 4.0, t.cos() * 3.0, (t * 0.5).sin() * -2.0)
    })
    .collect();
  let a = VoxelGrid::from_points(&points, 0.3).unwrap();
  let b = VoxelGrid::from_points(&points, 0.3).unwrap();

  let mut keys_a: Vec<_> = a.iter().collect();
  let mut keys_b: Vec<_> = b.iter().collect();
  keys_a.sort();
  keys_b.sort();
  assert_eq!(keys_a, keys_b);
}
