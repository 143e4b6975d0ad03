//! PointCloud - ordered, indexable point collection with named attributes.
//!
//! Points are addressed by their [`PointId`], the position at which they
//! were appended. Besides its 3D position, a point carries one scalar value
//! per registered dimension (column storage, one `Vec<f64>` per dimension).
//!
//! Reordering filters never mutate a cloud in place; they build a new cloud
//! with [`PointCloud::select`] so the input stays valid for reuse. Bounding
//! boxes are recomputed on demand and never cached, so attribute or
//! position edits cannot leave stale bounds behind.

use glam::DVec3;

use crate::bounds::Aabb2;

/// Stable point identifier: the point's position at entry.
pub type PointId = usize;

/// Conventional name of the classification attribute.
pub const CLASSIFICATION: &str = "Classification";

/// Handle to a registered dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DimId(usize);

impl DimId {
  /// Get the raw column index.
  pub fn raw(&self) -> usize {
    self.0
  }
}

/// Ordered point collection with per-point named scalar attributes.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
  positions: Vec<DVec3>,
  dim_names: Vec<String>,
  // One column per dimension, each parallel to `positions`
  columns: Vec<Vec<f64>>,
}

impl PointCloud {
  /// Create an empty cloud with no registered dimensions.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of points.
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  /// True when the cloud holds no points.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// All point ids in entry order.
  pub fn ids(&self) -> std::ops::Range<PointId> {
    0..self.len()
  }

  /// Register a dimension, returning its handle.
  ///
  /// Registering an existing name returns the existing handle. New columns
  /// are zero-filled for points already in the cloud.
  pub fn add_dim(&mut self, name: &str) -> DimId {
    if let Some(dim) = self.find_dim(name) {
      return dim;
    }
    self.dim_names.push(name.to_owned());
    self.columns.push(vec![0.0; self.len()]);
    DimId(self.columns.len() - 1)
  }

  /// Look up a dimension by name.
  pub fn find_dim(&self, name: &str) -> Option<DimId> {
    self.dim_names.iter().position(|n| n == name).map(DimId)
  }

  /// Name of a registered dimension.
  pub fn dim_name(&self, dim: DimId) -> &str {
    &self.dim_names[dim.0]
  }

  /// Append a point, returning its id. Attribute columns extend with 0.0.
  pub fn append(&mut self, position: DVec3) -> PointId {
    let id = self.len();
    self.positions.push(position);
    for column in &mut self.columns {
      column.push(0.0);
    }
    id
  }

  /// Position of a point.
  #[inline]
  pub fn position(&self, id: PointId) -> DVec3 {
    self.positions[id]
  }

  /// XY footprint position of a point.
  #[inline]
  pub fn position2(&self, id: PointId) -> glam::DVec2 {
    self.positions[id].truncate()
  }

  /// Read an attribute value.
  #[inline]
  pub fn attr(&self, id: PointId, dim: DimId) -> f64 {
    self.columns[dim.0][id]
  }

  /// Write an attribute value.
  #[inline]
  pub fn set_attr(&mut self, id: PointId, dim: DimId, value: f64) {
    self.columns[dim.0][id] = value;
  }

  /// XY bounding box of the cloud, recomputed from current positions.
  ///
  /// Returns None for an empty cloud.
  pub fn bounds2(&self) -> Option<Aabb2> {
    Aabb2::from_points(self.positions.iter().map(|p| p.truncate()))
  }

  /// Build a new cloud holding the given points in the given order.
  ///
  /// The new cloud has the same dimension layout; selected points keep
  /// their attribute values but receive fresh ids (their position in the
  /// new cloud).
  pub fn select(&self, ids: impl IntoIterator<Item = PointId>) -> Self {
    let mut out = Self {
      positions: Vec::new(),
      dim_names: self.dim_names.clone(),
      columns: vec![Vec::new(); self.columns.len()],
    };
    for id in ids {
      out.positions.push(self.positions[id]);
      for (column, source) in out.columns.iter_mut().zip(&self.columns) {
        column.push(source[id]);
      }
    }
    out
  }
}

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;
