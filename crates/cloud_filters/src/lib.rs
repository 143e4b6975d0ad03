//! cloud_filters - Framework/engine independent point cloud filtering
//!
//! This crate provides progressive (level-of-detail) reordering and
//! neighbor-vote reclassification for in-memory point clouds. Reordering
//! produces coarse-to-fine point sequences suitable for progressive
//! streaming: any prefix of the output is a reasonable approximation of the
//! whole cloud.
//!
//! # Features
//!
//! - **Quadtree LOD ordering**: recursive quadrant subdivision that picks
//!   the point nearest each box center, yielding a strict coarse-to-fine
//!   ordering grouped by level
//! - **Reversed-Morton ordering**: Z-order encoding of grid cells with a
//!   32-bit reversal, a cheaper ordering with good multi-scale locality
//! - **Neighbor voting**: K-nearest-neighbor majority vote that rewrites a
//!   chosen attribute, optionally gated by per-dimension value ranges
//! - **Stage pipeline**: compose classification and reordering into a
//!   single sequential pass over a cloud
//!
//! # Example
//!
//! ```ignore
//! use cloud_filters::{quadtree, PointCloud};
//! use glam::DVec3;
//!
//! let mut cloud = PointCloud::new();
//! cloud.append(DVec3::new(0.0, 0.0, 0.0));
//! cloud.append(DVec3::new(4.0, 4.0, 0.0));
//!
//! let bounds = cloud.bounds2().unwrap();
//! for (level, id) in quadtree::compute_order(&cloud, bounds) {
//!     println!("level {level}: point {id}");
//! }
//! ```

pub mod bounds;
pub mod points;

// Re-export commonly used items
pub use bounds::Aabb2;
pub use points::{DimId, PointCloud, PointId, CLASSIFICATION};

// Domain range gating for classification filters
pub mod domain;
pub use domain::DimRange;

// Injected nearest-neighbor capability
pub mod spatial;
pub use spatial::{BruteForceIndex, NeighborIndex};

// LOD reordering strategies
pub mod lod;
pub use lod::{morton, quadtree};

// Neighbor-vote reclassification
pub mod classify;
pub use classify::{NeighborVote, PreparedVote, VotePassStats};

// Stage composition
pub mod pipeline;
pub use pipeline::{Pipeline, Stage};

// Configuration errors
pub mod error;
pub use error::ConfigError;
