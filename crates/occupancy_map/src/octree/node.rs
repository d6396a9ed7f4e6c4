//! OctreeNode - one cube of the arena-backed occupancy octree.
//!
//! Depth 0 = root (coarsest), depth D = terminal leaves (finest).

use glam::DVec3;

use super::DAabb3;
use crate::constants::LOG_ODDS_PRIOR;

/// Handle of a node inside the octree arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
  /// The root is always the first node allocated.
  pub const ROOT: Self = Self(0);

  /// Raw arena index.
  #[inline]
  pub fn index(self) -> usize {
    self.0
  }

  /// Handle of sibling `octant` in a block of eight starting at `self`.
  #[inline]
  pub(crate) fn offset(self, octant: u8) -> Self {
    Self(self.0 + octant as usize)
  }
}

/// Octree node.
///
/// A node is either a leaf (`first_child == None`) or fully subdivided with
/// eight children stored contiguously in the arena.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct OctreeNode {
  /// Center of the node's cube.
  pub center: DVec3,
  /// Half of the cube's edge length.
  pub half_extent: f64,
  /// Occupancy belief in log-odds, clamped by the sensor model.
  pub log_odds: f64,
  /// Distance from the root (root = 0).
  pub depth: u8,
  first_child: Option<NodeId>,
}

impl OctreeNode {
  /// Create a leaf with the neutral prior.
  pub fn new(center: DVec3, half_extent: f64, depth: u8) -> Self {
    Self {
      center,
      half_extent,
      log_odds: LOG_ODDS_PRIOR,
      depth,
      first_child: None,
    }
  }

  /// True until the node is subdivided.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.first_child.is_none()
  }

  /// Handles of the eight children, octant order.
  pub fn children(&self) -> Option<[NodeId; 8]> {
    self
      .first_child
      .map(|first| std::array::from_fn(|octant| first.offset(octant as u8)))
  }

  pub(crate) fn first_child(&self) -> Option<NodeId> {
    self.first_child
  }

  pub(crate) fn set_first_child(&mut self, first: NodeId) {
    debug_assert!(self.first_child.is_none(), "node subdivided twice");
    self.first_child = Some(first);
  }

  /// Octant of `point` relative to this node's center.
  ///
  /// Bits represent the +X, +Y, +Z halves:
  /// - bit 0: X (`point.x >= center.x`)
  /// - bit 1: Y
  /// - bit 2: Z
  ///
  /// A coordinate equal to the center goes to the high half.
  #[inline]
  pub fn octant_of(&self, point: DVec3) -> u8 {
    (point.x >= self.center.x) as u8
      | ((point.y >= self.center.y) as u8) << 1
      | ((point.z >= self.center.z) as u8) << 2
  }

  /// Center of child `octant` (0-7).
  #[inline]
  pub fn child_center(&self, octant: u8) -> DVec3 {
    let offset = self.half_extent * 0.5;
    let sign = |bit: u8| if octant & bit != 0 { offset } else { -offset };
    self.center + DVec3::new(sign(1), sign(2), sign(4))
  }

  /// Fresh leaf for child `octant`.
  pub fn child(&self, octant: u8) -> Self {
    Self::new(
      self.child_center(octant),
      self.half_extent * 0.5,
      self.depth + 1,
    )
  }

  /// The node's cube as an AABB.
  #[inline]
  pub fn aabb(&self) -> DAabb3 {
    DAabb3::from_center_half_extents(self.center, DVec3::splat(self.half_extent))
  }

  /// Inclusive containment test.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    self.aabb().contains_point(point)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
