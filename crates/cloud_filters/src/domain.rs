//! Value-range predicates that gate which points a filter acts on.
//!
//! A range spec is written `Dimension[lower:upper]` with inclusive bounds.
//! Either bound may be omitted (`[2:]`, `[:5]`, `[:]`) to leave that side
//! open. Several ranges combine as a logical OR: a point passes the domain
//! when any one range accepts it.

use crate::error::ConfigError;
use crate::points::{DimId, PointCloud};

/// Parsed `Dimension[lower:upper]` range spec.
///
/// Parsing resolves only the syntax; the dimension name is checked against
/// a concrete cloud via [`DimRange::bind`], and an unknown name is a
/// configuration error rather than a silently skipped range.
#[derive(Clone, Debug, PartialEq)]
pub struct DimRange {
  /// Dimension the range is evaluated on.
  pub name: String,
  /// Inclusive lower bound.
  pub lower: f64,
  /// Inclusive upper bound.
  pub upper: f64,
}

impl DimRange {
  /// Parse a `Dimension[lower:upper]` spec string.
  pub fn parse(spec: &str) -> Result<Self, ConfigError> {
    let malformed = || ConfigError::MalformedDomainRange(spec.to_owned());

    let spec = spec.trim();
    let open = spec.find('[').ok_or_else(malformed)?;
    let name = spec[..open].trim();
    let body = spec[open + 1..]
      .strip_suffix(']')
      .ok_or_else(malformed)?;
    let (lo, hi) = body.split_once(':').ok_or_else(malformed)?;
    if name.is_empty() {
      return Err(malformed());
    }

    let parse_bound = |text: &str, default: f64| -> Result<f64, ConfigError> {
      let text = text.trim();
      if text.is_empty() {
        Ok(default)
      } else {
        text.parse::<f64>().map_err(|_| malformed())
      }
    };

    let lower = parse_bound(lo, f64::NEG_INFINITY)?;
    let upper = parse_bound(hi, f64::INFINITY)?;
    if lower > upper {
      return Err(malformed());
    }

    Ok(Self {
      name: name.to_owned(),
      lower,
      upper,
    })
  }

  /// Resolve the dimension name against a cloud.
  pub fn bind(&self, cloud: &PointCloud) -> Result<BoundRange, ConfigError> {
    let dim = cloud
      .find_dim(&self.name)
      .ok_or_else(|| ConfigError::UnknownDimension(self.name.clone()))?;
    Ok(BoundRange {
      dim,
      lower: self.lower,
      upper: self.upper,
    })
  }
}

/// A [`DimRange`] resolved against a concrete cloud layout.
#[derive(Clone, Copy, Debug)]
pub struct BoundRange {
  /// Resolved dimension handle.
  pub dim: DimId,
  lower: f64,
  upper: f64,
}

impl BoundRange {
  /// True when a value falls inside the range (inclusive).
  #[inline]
  pub fn passes(&self, value: f64) -> bool {
    value >= self.lower && value <= self.upper
  }
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod domain_test;
