//! Error taxonomy for catalog access and record validation.

use thiserror::Error;

use super::resource::Collection;

/// Failure resolving a logical resource.
///
/// `Clone` because a single in-flight resolution hands its outcome to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
  /// The resource identifier is malformed (bad collection, bad id).
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  /// The identifier is well-formed but no record carries that id.
  #[error("{} {id} not found", .collection.record_label())]
  NotFound { collection: Collection, id: u32 },

  /// The network request or file read failed, or the payload was unusable.
  #[error("transport failure: {0}")]
  TransportFailure(String),

  /// The live endpoint refused the request.
  #[error("unauthorized")]
  Unauthorized,
}

impl CatalogError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, CatalogError::NotFound { .. })
  }

  pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
    CatalogError::TransportFailure(err.to_string())
  }
}

/// A record, or a set of records, that breaks a data model invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
  #[error("{} id must be a positive integer", .0.record_label())]
  ZeroId(Collection),

  #[error("duplicate {} id {id}", .collection.record_label())]
  DuplicateId { collection: Collection, id: u32 },

  #[error("price {0:?} is not a positive decimal amount")]
  InvalidPrice(String),

  #[error("paid record must carry a price")]
  MissingPrice,

  #[error("free record must not carry a price (got {0:?})")]
  UnexpectedPrice(String),

  #[error("price label {actual:?} does not match expected {expected:?}")]
  LabelMismatch { expected: String, actual: String },

  #[error("rating {0} is outside 0..=5")]
  RatingOutOfRange(f32),
}
