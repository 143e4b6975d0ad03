//! Axis-aligned 2D bounding box over the XY footprint of a cloud.

use glam::DVec2;
use smallvec::SmallVec;

/// Grid factor for quadrant subdivision (2x2 children).
pub const SPLIT_FACTOR: usize = 2;

/// Double-precision axis-aligned 2D bounding box.
///
/// Used for the footprint of a point cloud during LOD ordering. Containment
/// is inclusive on all edges, so the bounding box of a cloud contains every
/// point of that cloud, including the extremes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
  /// Minimum corner (inclusive).
  pub min: DVec2,
  /// Maximum corner (inclusive).
  pub max: DVec2,
}

impl Aabb2 {
  /// Create a new box from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on both axes.
  pub fn new(min: DVec2, max: DVec2) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y,
      "box min must be <= max on both axes"
    );
    Self { min, max }
  }

  /// Smallest box containing every position in the iterator.
  ///
  /// Returns None for an empty iterator.
  pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Some(Self { min, max })
  }

  /// Check if this box contains a point (inclusive on all edges).
  #[inline]
  pub fn contains(&self, point: DVec2) -> bool {
    point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
  }

  /// Get the size of the box (max - min).
  #[inline]
  pub fn size(&self) -> DVec2 {
    self.max - self.min
  }

  /// Get the center of the box.
  #[inline]
  pub fn center(&self) -> DVec2 {
    (self.min + self.max) * 0.5
  }

  /// Split into a 2x2 grid of equal children, contiguous from the min
  /// corner, ordered row-major (x fastest, then y).
  ///
  /// The child at index [`Self::quadrant`]`(p)` is the one that owns point
  /// `p` under the half-open ownership rule.
  pub fn split_quadrants(&self) -> SmallVec<[Self; 4]> {
    let step = self.size() / SPLIT_FACTOR as f64;
    let mut children = SmallVec::new();
    for j in 0..SPLIT_FACTOR {
      for i in 0..SPLIT_FACTOR {
        let min = self.min + DVec2::new(i as f64 * step.x, j as f64 * step.y);
        children.push(Self {
          min,
          max: min + step,
        });
      }
    }
    children
  }

  /// Index of the child quadrant that owns a point.
  ///
  /// Ownership is half-open against the center: a coordinate belongs to the
  /// upper child iff it is >= the center coordinate. Every point maps to
  /// exactly one quadrant, so shared child edges are unambiguous even
  /// though box containment itself is inclusive.
  #[inline]
  pub fn quadrant(&self, point: DVec2) -> usize {
    let center = self.center();
    let ix = usize::from(point.x >= center.x);
    let iy = usize::from(point.y >= center.y);
    iy * SPLIT_FACTOR + ix
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new() {
    let b = Aabb2::new(DVec2::new(-1.0, -2.0), DVec2::new(1.0, 2.0));
    assert_eq!(b.min, DVec2::new(-1.0, -2.0));
    assert_eq!(b.max, DVec2::new(1.0, 2.0));
  }

  #[test]
  fn test_from_points() {
    let b = Aabb2::from_points([
      DVec2::new(1.0, 5.0),
      DVec2::new(-3.0, 2.0),
      DVec2::new(0.0, -1.0),
    ])
    .unwrap();
    assert_eq!(b.min, DVec2::new(-3.0, -1.0));
    assert_eq!(b.max, DVec2::new(1.0, 5.0));
  }

  #[test]
  fn test_from_points_empty() {
    assert!(Aabb2::from_points(Vec::new()).is_none());
  }

  #[test]
  fn test_contains_inclusive() {
    let b = Aabb2::new(DVec2::ZERO, DVec2::splat(10.0));

    // Inside
    assert!(b.contains(DVec2::splat(5.0)));

    // On boundary
    assert!(b.contains(DVec2::ZERO));
    assert!(b.contains(DVec2::splat(10.0)));

    // Outside
    assert!(!b.contains(DVec2::splat(-1.0)));
    assert!(!b.contains(DVec2::splat(11.0)));
  }

  #[test]
  fn test_split_quadrants_tile_parent() {
    let b = Aabb2::new(DVec2::ZERO, DVec2::new(8.0, 4.0));
    let children = b.split_quadrants();
    assert_eq!(children.len(), 4);

    // Row-major from the min corner
    assert_eq!(children[0].min, DVec2::new(0.0, 0.0));
    assert_eq!(children[1].min, DVec2::new(4.0, 0.0));
    assert_eq!(children[2].min, DVec2::new(0.0, 2.0));
    assert_eq!(children[3].min, DVec2::new(4.0, 2.0));
    for child in &children {
      assert_eq!(child.size(), DVec2::new(4.0, 2.0));
    }
  }

  #[test]
  fn test_quadrant_matches_split_order() {
    let b = Aabb2::new(DVec2::ZERO, DVec2::splat(10.0));
    let children = b.split_quadrants();

    let probes = [
      DVec2::new(1.0, 1.0),
      DVec2::new(9.0, 1.0),
      DVec2::new(1.0, 9.0),
      DVec2::new(9.0, 9.0),
    ];
    for (expected, probe) in probes.into_iter().enumerate() {
      assert_eq!(b.quadrant(probe), expected);
      assert!(children[expected].contains(probe));
    }
  }

  #[test]
  fn test_quadrant_center_goes_upper() {
    // A point exactly on the center belongs to the upper child on both axes
    let b = Aabb2::new(DVec2::ZERO, DVec2::splat(10.0));
    assert_eq!(b.quadrant(DVec2::splat(5.0)), 3);
  }
}
