use super::*;

fn unit_root() -> OctreeNode {
  OctreeNode::new(DVec3::ZERO, 1.0, 0)
}

// =========================================================================
// Octant selection
// =========================================================================

/// Each sign combination maps to its own octant index.
#[test]
fn test_octant_bits() {
  let node = unit_root();
  for octant in 0u8..8 {
    let x = if octant & 1 != 0 { 0.5 } else { -0.5 };
    let y = if octant & 2 != 0 { 0.5 } else { -0.5 };
    let z = if octant & 4 != 0 { 0.5 } else { -0.5 };
    assert_eq!(
      node.octant_of(DVec3::new(x, y, z)),
      octant,
      "point ({}, {}, {})",
      x,
      y,
      z
    );
  }
}

/// A coordinate on the splitting plane resolves to the high half.
#[test]
fn test_boundary_tie_goes_high() {
  let node = unit_root();
  assert_eq!(node.octant_of(DVec3::ZERO), 7);
  assert_eq!(node.octant_of(DVec3::new(0.0, -0.5, -0.5)), 1);
  assert_eq!(node.octant_of(DVec3::new(-0.5, 0.0, -0.5)), 2);
  assert_eq!(node.octant_of(DVec3::new(-0.5, -0.5, 0.0)), 4);
}

/// The tie-break never flips between calls.
#[test]
fn test_octant_is_deterministic() {
  let node = OctreeNode::new(DVec3::new(0.1, 0.2, 0.3), 2.0, 0);
  let point = DVec3::new(0.1, 0.2, 0.3);
  let first = node.octant_of(point);
  for _ in 0..100 {
    assert_eq!(node.octant_of(point), first);
  }
}

// =========================================================================
// Child geometry
// =========================================================================

/// Child half-extent is half the parent's; depth increases by one.
#[test]
fn test_child_half_extent_and_depth() {
  let parent = OctreeNode::new(DVec3::new(4.0, -2.0, 1.0), 8.0, 3);
  for octant in 0u8..8 {
    let child = parent.child(octant);
    assert_eq!(child.half_extent, 4.0);
    assert_eq!(child.depth, 4);
    assert_eq!(child.log_odds, 0.0);
    assert!(child.is_leaf());
  }
}

/// Child centers sit at parent center ± child half-extent per axis.
#[test]
fn test_child_centers() {
  let parent = unit_root();
  assert_eq!(parent.child_center(0), DVec3::splat(-0.5));
  assert_eq!(parent.child_center(7), DVec3::splat(0.5));
  assert_eq!(parent.child_center(1), DVec3::new(0.5, -0.5, -0.5));
  assert_eq!(parent.child_center(6), DVec3::new(-0.5, 0.5, 0.5));
}

/// A child's own cube contains the points that select it.
#[test]
fn test_child_contains_selecting_points() {
  let parent = unit_root();
  for octant in 0u8..8 {
    let child = parent.child(octant);
    assert!(child.contains_point(child.center));
    assert_eq!(parent.octant_of(child.center), octant);
  }
}

/// Siblings touch only on faces and together rebuild the parent cube.
#[test]
fn test_octant_partition() {
  let parent = OctreeNode::new(DVec3::new(1.0, 2.0, 3.0), 3.0, 0);
  let boxes: Vec<_> = (0u8..8).map(|o| parent.child(o).aabb()).collect();

  for i in 0..8 {
    for j in (i + 1)..8 {
      let (a, b) = (boxes[i], boxes[j]);
      let separated = (0..3).any(|axis| a.max[axis] <= b.min[axis] || b.max[axis] <= a.min[axis]);
      assert!(separated, "children {} and {} overlap", i, j);
    }
  }

  let volume = |b: &DAabb3| b.size().x * b.size().y * b.size().z;
  let total: f64 = boxes.iter().map(volume).sum();
  assert!((total - volume(&parent.aabb())).abs() < 1e-9);

  let mut union = boxes[0];
  for b in &boxes[1..] {
    union.extend(b.min);
    union.extend(b.max);
  }
  assert_eq!(union, parent.aabb());
}

#[test]
fn test_node_id_offsets() {
  let first = NodeId(9);
  assert_eq!(first.offset(0), NodeId(9));
  assert_eq!(first.offset(7).index(), 16);
  assert_eq!(NodeId::ROOT.index(), 0);
}
