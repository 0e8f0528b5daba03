use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::catalog::{CatalogError, Collection};

/// Body of every non-success API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
  pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Invalid {} id", .0.record_label().to_lowercase())]
  InvalidId(Collection),

  #[error("{} not found", .0.record_label())]
  NotFound(Collection),

  #[error("Unauthorized")]
  Unauthorized,

  #[error("Internal Server Error")]
  Internal(String),
}

impl From<CatalogError> for ApiError {
  fn from(err: CatalogError) -> Self {
    match err {
      CatalogError::NotFound { collection, .. } => ApiError::NotFound(collection),
      CatalogError::Unauthorized => ApiError::Unauthorized,
      CatalogError::InvalidRequest(msg) | CatalogError::TransportFailure(msg) => {
        ApiError::Internal(msg)
      }
    }
  }
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let ApiError::Internal(detail) = &self {
      error!(%detail, "request failed");
    }
    let body = ApiMessage {
      message: self.to_string(),
    };
    (self.status(), Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_messages() {
    assert_eq!(ApiError::NotFound(Collection::Apps).to_string(), "App not found");
    assert_eq!(
      ApiError::NotFound(Collection::Portfolio).to_string(),
      "Portfolio item not found"
    );
    assert_eq!(ApiError::InvalidId(Collection::Apps).to_string(), "Invalid app id");
    assert_eq!(
      ApiError::InvalidId(Collection::Portfolio).to_string(),
      "Invalid portfolio item id"
    );
  }

  #[test]
  fn test_internal_detail_not_leaked() {
    let err = ApiError::from(CatalogError::TransportFailure("disk on fire".to_string()));
    assert_eq!(err.to_string(), "Internal Server Error");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
