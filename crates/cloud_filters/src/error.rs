//! Configuration errors, surfaced at filter bind time.
//!
//! Filters validate their full configuration against a concrete cloud
//! before touching any point; a failed bind never leaves a partial run
//! behind. The algorithms themselves have no mid-pass failure modes -
//! degenerate inputs (empty clouds, zero-size axis ranges) follow defined
//! fallback rules instead of erroring.

use thiserror::Error;

/// Filter configuration error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// Neighbor count must be at least 1.
  #[error("invalid neighbor count {0}, must be >= 1")]
  InvalidNeighborCount(usize),

  /// A domain spec string did not parse as `Dimension[lower:upper]`.
  #[error("malformed domain range '{0}', expected Dimension[lower:upper]")]
  MalformedDomainRange(String),

  /// A referenced dimension is not registered on the target cloud.
  #[error("unknown dimension '{0}'")]
  UnknownDimension(String),
}
