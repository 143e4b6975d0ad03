//! Stage composition: classify, then reorder, as one sequential pass.
//!
//! Each filter in this crate implements [`Stage`], a cloud-in/cloud-out
//! transformation that validates its own configuration when it runs. A
//! [`Pipeline`] chains stages in order, handing each the previous output;
//! the usual composition is a classification stage followed by an LOD
//! reordering stage feeding a progressive consumer.

#[cfg(feature = "tracing")]
use web_time::Instant;

use crate::classify::NeighborVote;
use crate::error::ConfigError;
use crate::lod::{morton, quadtree};
use crate::points::PointCloud;
use crate::spatial::BruteForceIndex;

/// A cloud-in/cloud-out filter.
///
/// Stages take ownership of the incoming cloud and may mutate it in place
/// (classification) or build a reordered replacement (LOD ordering).
/// Configuration problems surface as [`ConfigError`] before the stage
/// touches any point.
pub trait Stage {
  /// Short identifier used in logs.
  fn name(&self) -> &'static str;

  /// Execute the stage.
  fn run(&self, cloud: PointCloud) -> Result<PointCloud, ConfigError>;
}

/// Quadtree LOD reordering as a stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadtreeLod;

impl Stage for QuadtreeLod {
  fn name(&self) -> &'static str {
    "quadtree_lod"
  }

  fn run(&self, cloud: PointCloud) -> Result<PointCloud, ConfigError> {
    Ok(quadtree::reorder(&cloud))
  }
}

/// Reversed-Morton reordering as a stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct MortonLod;

impl Stage for MortonLod {
  fn name(&self) -> &'static str {
    "morton_lod"
  }

  fn run(&self, cloud: PointCloud) -> Result<PointCloud, ConfigError> {
    Ok(morton::reorder(&cloud))
  }
}

impl Stage for NeighborVote {
  fn name(&self) -> &'static str {
    "neighbor_vote"
  }

  /// Bind against the cloud, index it, and run one full vote pass.
  ///
  /// The stage form builds a [`BruteForceIndex`] over the incoming cloud;
  /// callers with an accelerated index use
  /// [`PreparedVote::run`](crate::classify::PreparedVote::run) directly.
  fn run(&self, mut cloud: PointCloud) -> Result<PointCloud, ConfigError> {
    let prepared = self.prepare(&cloud)?;
    let index = BruteForceIndex::build(&cloud);
    prepared.run(&mut cloud, &index);
    Ok(cloud)
  }
}

/// Ordered sequence of stages.
#[derive(Default)]
pub struct Pipeline {
  stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
  /// Create an empty pipeline (the identity transformation).
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a stage.
  pub fn then(mut self, stage: impl Stage + 'static) -> Self {
    self.stages.push(Box::new(stage));
    self
  }

  /// Number of stages.
  pub fn len(&self) -> usize {
    self.stages.len()
  }

  /// True when no stages are configured.
  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Run every stage in order.
  ///
  /// Stops at the first stage whose configuration fails to bind; the
  /// partially transformed cloud is dropped with the error.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "pipeline::run", fields(stages = self.stages.len()))
  )]
  pub fn run(&self, mut cloud: PointCloud) -> Result<PointCloud, ConfigError> {
    for stage in &self.stages {
      #[cfg(feature = "tracing")]
      let start = Instant::now();

      cloud = stage.run(cloud)?;

      #[cfg(feature = "tracing")]
      tracing::debug!(
        stage = stage.name(),
        points = cloud.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "stage complete"
      );
    }
    Ok(cloud)
  }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
