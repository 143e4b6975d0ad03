//! Neighbor-vote reclassification.
//!
//! For each point (optionally gated by value-range domains), the filter
//! asks the injected [`NeighborIndex`] for the K nearest neighbors, tallies
//! their values on one target dimension, and rewrites the point's value to
//! the winner when the winner holds a strict majority and differs from the
//! current value.
//!
//! A full pass votes off a fixed snapshot: every vote reads pre-pass
//! attribute values, with rewrites buffered and applied after the scan.
//! That keeps the pass deterministic (no read-your-neighbor's-rewrite
//! cascades) and lets the per-point votes run on the rayon pool.

use std::collections::BTreeMap;

use rayon::prelude::*;
use web_time::Instant;

use crate::domain::{BoundRange, DimRange};
use crate::error::ConfigError;
use crate::points::{DimId, PointCloud, PointId, CLASSIFICATION};
use crate::spatial::NeighborIndex;

/// Neighbor-vote filter configuration.
///
/// `k` is required and must be at least 1. The target dimension defaults
/// to `Classification`; the domain defaults to empty, which processes
/// every point. Validation happens in [`NeighborVote::prepare`], against a
/// concrete cloud, before any point is touched.
#[derive(Clone, Debug)]
pub struct NeighborVote {
  k: usize,
  dimension: String,
  domain: Vec<String>,
}

impl NeighborVote {
  /// Create a configuration consulting `k` nearest neighbors.
  pub fn new(k: usize) -> Self {
    Self {
      k,
      dimension: CLASSIFICATION.to_owned(),
      domain: Vec::new(),
    }
  }

  /// Vote on (and rewrite) a different target dimension.
  pub fn with_dimension(mut self, name: impl Into<String>) -> Self {
    self.dimension = name.into();
    self
  }

  /// Restrict processing to points matching any of the given
  /// `Dimension[lower:upper]` range specs.
  pub fn with_domain<S: Into<String>>(mut self, specs: impl IntoIterator<Item = S>) -> Self {
    self.domain.extend(specs.into_iter().map(Into::into));
    self
  }

  /// Validate the configuration against a cloud layout.
  ///
  /// Fails on `k < 1`, on a malformed domain spec, or on a dimension name
  /// (domain or target) the cloud does not carry.
  pub fn prepare(&self, cloud: &PointCloud) -> Result<PreparedVote, ConfigError> {
    if self.k < 1 {
      return Err(ConfigError::InvalidNeighborCount(self.k));
    }
    let dim = cloud
      .find_dim(&self.dimension)
      .ok_or_else(|| ConfigError::UnknownDimension(self.dimension.clone()))?;
    let domain = self
      .domain
      .iter()
      .map(|spec| DimRange::parse(spec)?.bind(cloud))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(PreparedVote {
      k: self.k,
      dim,
      domain,
    })
  }
}

/// A [`NeighborVote`] bound to a concrete cloud layout.
#[derive(Clone, Debug)]
pub struct PreparedVote {
  k: usize,
  dim: DimId,
  domain: Vec<BoundRange>,
}

/// Statistics from one full vote pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VotePassStats {
  /// Points that passed the domain gate and were voted on.
  pub points_processed: usize,
  /// Points whose target value was rewritten.
  pub points_changed: usize,
  /// Wall-clock duration of the pass in microseconds.
  pub elapsed_us: u64,
}

impl PreparedVote {
  /// True when the point passes the domain gate.
  ///
  /// An empty domain processes everything; otherwise any one matching
  /// range is sufficient.
  pub fn in_domain(&self, cloud: &PointCloud, id: PointId) -> bool {
    self.domain.is_empty()
      || self
        .domain
        .iter()
        .any(|range| range.passes(cloud.attr(id, range.dim)))
  }

  /// Run the vote for one point, without writing.
  ///
  /// Returns the winning value when it holds a strict majority of the
  /// returned neighbors and differs from the point's current value;
  /// None means the point stays untouched.
  fn vote(&self, cloud: &PointCloud, index: &dyn NeighborIndex, id: PointId) -> Option<f64> {
    let neighbors = index.k_nearest(cloud.position(id), self.k);
    let threshold = neighbors.len() as f64 / 2.0;

    // Values tally as integers, truncated the way discrete attributes
    // (classification codes) are read
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &neighbor in &neighbors {
      *counts.entry(cloud.attr(neighbor, self.dim) as i64).or_insert(0) += 1;
    }

    // Ascending key order plus strictly-greater replacement: equally
    // frequent values resolve to the lowest value
    let mut winner = 0i64;
    let mut winner_count = 0usize;
    for (value, count) in counts {
      if count > winner_count {
        winner = value;
        winner_count = count;
      }
    }

    let winner = winner as f64;
    if winner_count as f64 > threshold && winner != cloud.attr(id, self.dim) {
      Some(winner)
    } else {
      None
    }
  }

  /// Gate and vote a single point, writing the winner if any.
  ///
  /// Returns true when the point's value changed. Reads current attribute
  /// values; for whole-cloud passes use [`PreparedVote::run`], which votes
  /// off a pre-pass snapshot instead of whatever earlier rewrites left
  /// behind.
  pub fn apply(&self, cloud: &mut PointCloud, index: &dyn NeighborIndex, id: PointId) -> bool {
    if !self.in_domain(cloud, id) {
      return false;
    }
    match self.vote(cloud, index, id) {
      Some(value) => {
        cloud.set_attr(id, self.dim, value);
        true
      }
      None => false,
    }
  }

  /// Vote every point of the cloud and apply the rewrites.
  ///
  /// Votes run in parallel against the immutable pre-pass cloud; rewrites
  /// are buffered and applied once the scan completes. Running the pass
  /// again with unchanged neighborhoods is a no-op.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "classify::vote_pass", fields(points = cloud.len()))
  )]
  pub fn run(
    &self,
    cloud: &mut PointCloud,
    index: &(dyn NeighborIndex + Sync),
  ) -> VotePassStats {
    let start = Instant::now();

    // Shared snapshot for the parallel scan; writes wait below
    let snapshot: &PointCloud = cloud;
    let votes: Vec<(PointId, Option<f64>)> = snapshot
      .ids()
      .into_par_iter()
      .filter(|&id| self.in_domain(snapshot, id))
      .map(|id| (id, self.vote(snapshot, index, id)))
      .collect();

    let mut stats = VotePassStats {
      points_processed: votes.len(),
      ..Default::default()
    };
    for (id, vote) in votes {
      if let Some(value) = vote {
        cloud.set_attr(id, self.dim, value);
        stats.points_changed += 1;
      }
    }
    stats.elapsed_us = start.elapsed().as_micros() as u64;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      processed = stats.points_processed,
      changed = stats.points_changed,
      elapsed_us = stats.elapsed_us,
      "vote pass complete"
    );

    stats
  }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
