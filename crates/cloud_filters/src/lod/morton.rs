//! Reversed-Morton LOD ordering.
//!
//! Points are snapped to a square grid over the cloud's bounding box, the
//! grid cell coordinates are interleaved into a 32-bit Z-order code, and
//! the code is bit-reversed. Ascending reversed codes order the cloud so
//! that any prefix is a coarse, well-spread subsample: the reversal turns
//! the fine (low) Morton bits into the primary sort key, so consecutive
//! output points jump between distant cells while prefixes cover the box
//! at progressively finer strides.
//!
//! # Collisions
//!
//! Two points in the same grid cell produce the same code, and the later
//! point replaces the earlier one in the code map: one of them drops out
//! of the output. This lossy behavior is kept for compatibility with the
//! established ordering; callers that need every point must deduplicate
//! cells upstream or use the quadtree ordering instead.

use std::collections::BTreeMap;

use crate::bounds::Aabb2;
use crate::points::{PointCloud, PointId};

/// Spread the low 16 bits of `x`, leaving a gap bit after each.
#[inline]
fn part1_by1(x: u32) -> u32 {
  let mut x = x & 0x0000_ffff;
  x = (x ^ (x << 8)) & 0x00ff_00ff;
  x = (x ^ (x << 4)) & 0x0f0f_0f0f;
  x = (x ^ (x << 2)) & 0x3333_3333;
  x = (x ^ (x << 1)) & 0x5555_5555;
  x
}

/// Interleave two 16-bit grid coordinates into a 32-bit Morton code.
///
/// `y` occupies the odd bits (bit 15 of `y` lands at bit 31), `x` the even
/// bits. Coordinates above 16 bits are masked off; the grid resolution
/// chosen by [`compute_order`] keeps them in range.
#[inline]
pub fn encode_morton(x: u32, y: u32) -> u32 {
  (part1_by1(y) << 1) | part1_by1(x)
}

/// Grid coordinate of a point offset along one axis.
///
/// A degenerate axis (zero or negative cell size, from a zero-extent
/// bounding box) maps every point to cell 0 instead of dividing by zero.
#[inline]
fn grid_coord(offset: f64, cell_size: f64, cell_count: u32) -> u32 {
  if cell_size <= 0.0 {
    return 0;
  }
  (offset / cell_size).floor().clamp(0.0, cell_count as f64) as u32
}

/// Compute the reversed-Morton ordering of a cloud within a box.
///
/// The grid resolution is `floor(sqrt(point_count))` cells per axis
/// (minimum 1). Returns point ids in ascending reversed-code order; the
/// output length is the input length minus the number of same-cell
/// collisions (see module docs).
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "lod::morton", fields(points = cloud.len()))
)]
pub fn compute_order(cloud: &PointCloud, bounds: Aabb2) -> Vec<PointId> {
  if cloud.is_empty() {
    return Vec::new();
  }

  let cell_count = (cloud.len() as f64).sqrt().floor().max(1.0) as u32;
  let size = bounds.size();
  let cell_width = size.x / cell_count as f64;
  let cell_height = size.y / cell_count as f64;

  // Ordered map keyed by reversed code: iteration comes back already
  // sorted, and a colliding insert replaces the earlier point.
  let mut codes: BTreeMap<u32, PointId> = BTreeMap::new();
  for id in cloud.ids() {
    let p = cloud.position2(id);
    let xpos = grid_coord(p.x - bounds.min.x, cell_width, cell_count);
    let ypos = grid_coord(p.y - bounds.min.y, cell_height, cell_count);
    codes.insert(encode_morton(xpos, ypos).reverse_bits(), id);
  }

  codes.into_values().collect()
}

/// Materialize the ordering as a new cloud, using the cloud's own bounds.
pub fn reorder(cloud: &PointCloud) -> PointCloud {
  match cloud.bounds2() {
    Some(bounds) => cloud.select(compute_order(cloud, bounds)),
    None => PointCloud::new(),
  }
}

#[cfg(test)]
#[path = "morton_test.rs"]
mod morton_test;
