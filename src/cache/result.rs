//! Outcome types for cache lookups.

use serde::{Deserialize, Serialize};

/// What a lookup does when the source answers [`Unauthorized`].
///
/// [`Unauthorized`]: crate::catalog::CatalogError::Unauthorized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthorizedBehavior {
  /// Surface the error to the caller
  #[default]
  Throw,
  /// Resolve to an absent value instead
  ReturnNull,
}

/// Result of a cache lookup, including where the data came from.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
}

impl<T> CacheResult<T> {
  pub fn new(data: T, source: CacheSource) -> Self {
    Self { data, source }
  }
}

/// Indicates where a lookup's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// This lookup started the fetch
  Network,
  /// Joined a fetch another caller had already started
  InFlight,
  /// Served from a completed fetch
  Cache,
}
