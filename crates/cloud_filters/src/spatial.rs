//! Injected nearest-neighbor capability.
//!
//! Classification filters consult a spatial index through this trait
//! instead of owning one. The host pipeline typically supplies a KD-tree
//! or similar accelerated index; [`BruteForceIndex`] is the linear-scan
//! reference implementation, good enough for small clouds and for testing
//! voting behavior without an index dependency.

use glam::DVec3;

use crate::points::{PointCloud, PointId};

/// Nearest-neighbor queries over an indexed point collection.
///
/// Distances are 3D Euclidean. An indexed point at zero distance (the
/// query point itself, when it is part of the collection) is a regular
/// candidate and is returned like any other.
pub trait NeighborIndex {
  /// The `k` points nearest to `target`, ordered by ascending distance.
  ///
  /// Returns fewer than `k` ids when the collection holds fewer points.
  fn k_nearest(&self, target: DVec3, k: usize) -> Vec<PointId>;

  /// All points within `radius` of `target`, ordered by ascending distance.
  fn within_radius(&self, target: DVec3, radius: f64) -> Vec<PointId>;
}

/// Linear-scan index over a snapshot of a cloud's positions.
///
/// Building the index snapshots positions, so a full classification pass
/// over the source cloud keeps querying pre-pass geometry even while
/// attributes are rewritten.
#[derive(Clone, Debug)]
pub struct BruteForceIndex {
  positions: Vec<DVec3>,
}

impl BruteForceIndex {
  /// Snapshot the positions of a cloud.
  pub fn build(cloud: &PointCloud) -> Self {
    Self {
      positions: cloud.ids().map(|id| cloud.position(id)).collect(),
    }
  }

  /// Number of indexed points.
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  /// True when no points are indexed.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  fn by_distance(&self, target: DVec3) -> Vec<(f64, PointId)> {
    let mut candidates: Vec<(f64, PointId)> = self
      .positions
      .iter()
      .enumerate()
      .map(|(id, p)| (p.distance_squared(target), id))
      .collect();
    // Tie-break on id so equidistant neighbors come back deterministically
    candidates.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)));
    candidates
  }
}

impl NeighborIndex for BruteForceIndex {
  fn k_nearest(&self, target: DVec3, k: usize) -> Vec<PointId> {
    let mut candidates = self.by_distance(target);
    candidates.truncate(k);
    candidates.into_iter().map(|(_, id)| id).collect()
  }

  fn within_radius(&self, target: DVec3, radius: f64) -> Vec<PointId> {
    let limit = radius * radius;
    self
      .by_distance(target)
      .into_iter()
      .take_while(|(dist_sq, _)| *dist_sq <= limit)
      .map(|(_, id)| id)
      .collect()
  }
}

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;
