//! Quadtree LOD ordering: quadrant subdivision with center-nearest picks.
//!
//! Each box contributes the candidate point nearest its center, then splits
//! into 2x2 children that inherit the remaining candidates. Concatenating
//! the picks level by level yields a coarse-to-fine ordering: level 0 is the
//! single most central point, each further level refines every occupied
//! quadrant with one more point.
//!
//! The subdivision runs as an explicit FIFO work queue instead of call-stack
//! recursion, so depth is bounded by memory rather than stack size for
//! badly skewed distributions. Breadth-first box order also emits picks
//! already grouped by ascending level, with sibling boxes visited row-major
//! within a level; no post-hoc sort is needed.

use std::collections::VecDeque;

use crate::bounds::Aabb2;
use crate::points::{PointCloud, PointId};

/// One box worth of pending work: the region, its depth, and the candidate
/// points that fell into it.
struct WorkItem {
  bounds: Aabb2,
  level: u32,
  candidates: Vec<PointId>,
}

/// Compute the quadtree LOD ordering of a cloud within a box.
///
/// Returns `(level, id)` pairs grouped by ascending level. Each id appears
/// at most once; when `bounds` contains the whole cloud (the usual case,
/// via [`PointCloud::bounds2`]) the output is an exact permutation of the
/// input ids. Points outside `bounds` are never picked and drop out of the
/// ordering, matching the containment gate on selection.
///
/// Deterministic: equidistant candidates resolve to the earliest id in
/// candidate order (strictly-less comparison only).
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "lod::quadtree", fields(points = cloud.len()))
)]
pub fn compute_order(cloud: &PointCloud, bounds: Aabb2) -> Vec<(u32, PointId)> {
  let mut ordered = Vec::with_capacity(cloud.len());
  if cloud.is_empty() {
    return ordered;
  }

  let mut queue: VecDeque<WorkItem> = VecDeque::new();
  queue.push_back(WorkItem {
    bounds,
    level: 0,
    candidates: cloud.ids().collect(),
  });

  while let Some(item) = queue.pop_front() {
    let center = item.bounds.center();

    // Pick the candidate nearest the box center, first occurrence winning
    // ties. Only points inside the box are eligible.
    let mut picked: Option<PointId> = None;
    let mut min_dist_sq = f64::MAX;
    for &id in &item.candidates {
      let p = cloud.position2(id);
      if item.bounds.contains(p) {
        let dist_sq = p.distance_squared(center);
        if dist_sq < min_dist_sq {
          min_dist_sq = dist_sq;
          picked = Some(id);
        }
      }
    }

    // A box that picks nothing terminates its whole subtree
    let Some(picked) = picked else {
      continue;
    };
    ordered.push((item.level, picked));

    // Bucket the remaining candidates into exactly one child each.
    // The picked point is excluded so it cannot be re-picked deeper down.
    let mut buckets: [Vec<PointId>; 4] = Default::default();
    for &id in &item.candidates {
      if id == picked {
        continue;
      }
      buckets[item.bounds.quadrant(cloud.position2(id))].push(id);
    }

    for (child, candidates) in item.bounds.split_quadrants().into_iter().zip(buckets) {
      if !candidates.is_empty() {
        queue.push_back(WorkItem {
          bounds: child,
          level: item.level + 1,
          candidates,
        });
      }
    }
  }

  ordered
}

/// Materialize the ordering as a new cloud.
///
/// Uses the cloud's own XY bounding box, so the result is a full
/// permutation of the input. An empty cloud comes back empty.
pub fn reorder(cloud: &PointCloud) -> PointCloud {
  match cloud.bounds2() {
    Some(bounds) => cloud.select(compute_order(cloud, bounds).into_iter().map(|(_, id)| id)),
    None => PointCloud::new(),
  }
}

#[cfg(test)]
#[path = "quadtree_test.rs"]
mod quadtree_test;
