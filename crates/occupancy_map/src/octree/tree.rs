//! OccupancyOctree - arena-backed probabilistic occupancy octree.
//!
//! ```text
//! insert(p):
//!
//!   root (depth 0) ──octant(p)──► child (depth 1) ──► ... ──► leaf (depth D)
//!        │                           │                          │
//!        └─ leaf? subdivide all 8    └─ leaf? subdivide all 8   └─ log_odds += hit
//!                                                                  clamp
//! ```
//!
//! Nodes are never merged or pruned. A node that has not been visited past
//! its own depth stays a leaf with the neutral prior.

use glam::DVec3;
use log::debug;

use super::{BoundingCube, DAabb3, NodeId, OctreeConfig, OctreeNode};
use crate::constants::LOG_ODDS_PRIOR;
use crate::error::{MapError, Result};

/// Probabilistic occupancy octree.
#[derive(Clone, Debug)]
pub struct OccupancyOctree {
  nodes: Vec<OctreeNode>,
  cube: BoundingCube,
  config: OctreeConfig,
  points_inserted: usize,
}

impl OccupancyOctree {
  /// Create a tree holding a single root leaf that covers `cube`.
  pub fn new(cube: BoundingCube, config: OctreeConfig) -> Result<Self> {
    config.validate()?;
    // Re-validate in case the cube was built field by field.
    let cube = BoundingCube::new(cube.center, cube.half_extent)?;
    Ok(Self {
      nodes: vec![OctreeNode::new(cube.center, cube.half_extent, 0)],
      cube,
      config,
      points_inserted: 0,
    })
  }

  /// Derive the root cube from the points' bounding box (with margin) and
  /// insert every point.
  pub fn from_points(points: &[DVec3], config: OctreeConfig) -> Result<Self> {
    let aabb = DAabb3::from_points(points)?;
    let mut tree = Self::new(BoundingCube::enclosing(&aabb), config)?;
    tree.build(points)?;
    Ok(tree)
  }

  /// Insert every point in order.
  ///
  /// Fails with [`MapError::EmptyInput`] on an empty slice. Stops at the first
  /// rejected point; points before it stay inserted.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::build"))]
  pub fn build(&mut self, points: &[DVec3]) -> Result<()> {
    if points.is_empty() {
      return Err(MapError::EmptyInput);
    }
    for &point in points {
      self.insert(point)?;
    }
    debug!(
      "octree build: {} points, depth {}, {} nodes",
      points.len(),
      self.config.max_depth,
      self.nodes.len()
    );
    Ok(())
  }

  /// Insert one occupied observation and return the leaf it landed in.
  ///
  /// Points outside the root cube (inclusive) are rejected with
  /// [`MapError::OutOfBoundsPoint`] before the tree is touched.
  pub fn insert(&mut self, point: DVec3) -> Result<NodeId> {
    if !point.is_finite() {
      return Err(MapError::NonFinitePoint { point });
    }
    if !self.cube.contains_point(point) {
      return Err(MapError::OutOfBoundsPoint { point });
    }

    let mut id = NodeId::ROOT;
    for _ in 0..self.config.max_depth {
      let node = &self.nodes[id.index()];
      let octant = node.octant_of(point);
      let first = match node.first_child() {
        Some(first) => first,
        None => self.subdivide(id),
      };
      id = first.offset(octant);
    }

    let leaf = &mut self.nodes[id.index()];
    leaf.log_odds = self.config.sensor.update(leaf.log_odds, true);
    self.points_inserted += 1;
    Ok(id)
  }

  /// Allocate all eight children of a leaf as one contiguous block.
  fn subdivide(&mut self, id: NodeId) -> NodeId {
    let first = NodeId(self.nodes.len());
    let parent = self.nodes[id.index()];
    self.nodes.extend((0u8..8).map(|octant| parent.child(octant)));
    self.nodes[id.index()].set_first_child(first);
    first
  }

  /// The root node.
  #[inline]
  pub fn root(&self) -> &OctreeNode {
    &self.nodes[NodeId::ROOT.index()]
  }

  /// Node by handle.
  #[inline]
  pub fn get(&self, id: NodeId) -> Option<&OctreeNode> {
    self.nodes.get(id.index())
  }

  /// Total nodes allocated (internal + leaf).
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Number of successful insertions.
  #[inline]
  pub fn points_inserted(&self) -> usize {
    self.points_inserted
  }

  /// Root cube.
  #[inline]
  pub fn cube(&self) -> &BoundingCube {
    &self.cube
  }

  /// Build configuration.
  #[inline]
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Edge length of a terminal leaf.
  #[inline]
  pub fn leaf_edge(&self) -> f64 {
    self.config.leaf_edge(self.cube.half_extent)
  }

  /// Depth-first (pre-order) traversal of every node, octant 0 first.
  pub fn iter(&self) -> DepthFirst<'_> {
    DepthFirst {
      tree: self,
      stack: vec![NodeId::ROOT],
    }
  }

  /// Leaves at `max_depth` whose log-odds exceeds the neutral prior.
  pub fn occupied_leaves(&self) -> impl Iterator<Item = (NodeId, &OctreeNode)> + '_ {
    let max_depth = self.config.max_depth;
    self
      .iter()
      .filter(move |(_, node)| node.depth == max_depth && node.log_odds > LOG_ODDS_PRIOR)
  }

  /// Mean occupancy probability over the occupied leaves, `None` if there
  /// are none.
  pub fn mean_occupied_probability(&self) -> Option<f64> {
    let sensor = &self.config.sensor;
    let (sum, count) = self
      .occupied_leaves()
      .fold((0.0, 0usize), |(sum, count), (_, node)| {
        (sum + sensor.probability(node.log_odds), count + 1)
      });
    (count > 0).then(|| sum / count as f64)
  }

  /// Deepest existing node whose cube contains `point`, without subdividing.
  pub fn leaf_at(&self, point: DVec3) -> Option<&OctreeNode> {
    if !point.is_finite() || !self.cube.contains_point(point) {
      return None;
    }
    let mut node = self.root();
    while let Some(first) = node.first_child() {
      node = &self.nodes[first.offset(node.octant_of(point)).index()];
    }
    Some(node)
  }
}

/// Depth-first iterator over `(handle, node)` pairs.
pub struct DepthFirst<'a> {
  tree: &'a OccupancyOctree,
  stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
  type Item = (NodeId, &'a OctreeNode);

  fn next(&mut self) -> Option<Self::Item> {
    let id = self.stack.pop()?;
    let node = &self.tree.nodes[id.index()];
    if let Some(children) = node.children() {
      // Reverse so octant 0 is popped first.
      self.stack.extend(children.iter().rev());
    }
    Some((id, node))
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
