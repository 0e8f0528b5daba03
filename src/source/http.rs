use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::{CatalogSource, Resource, ResourceEntry};
use crate::catalog::{
  decode_collection, AppRecord, CatalogError, Collection, PortfolioItemRecord, ResourceId,
};
use crate::server::ApiMessage;

/// Resolves resources against the live JSON API.
#[derive(Clone)]
pub struct HttpSource {
  client: reqwest::Client,
  base: Url,
  token: Option<String>,
}

impl HttpSource {
  pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
    Ok(Self {
      client: http_client()?,
      base: normalized_base(base_url)?,
      token,
    })
  }

  fn endpoint(&self, id: &ResourceId) -> Result<Url, CatalogError> {
    let id = id.checked()?;
    // Relative join keeps any path prefix the site is mounted under
    self
      .base
      .join(id.api_path().trim_start_matches('/'))
      .map_err(|e| CatalogError::InvalidRequest(format!("cannot build URL for {}: {}", id, e)))
  }
}

#[async_trait]
impl CatalogSource for HttpSource {
  fn describe(&self) -> String {
    format!("live API at {}", self.base)
  }

  async fn resolve(&self, id: &ResourceId) -> Result<Resource, CatalogError> {
    let url = self.endpoint(id)?;
    debug!(%url, "GET");

    let mut request = self.client.get(url);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(CatalogError::transport)?;
    let status = response.status();

    if status.is_success() {
      let bytes = response.bytes().await.map_err(CatalogError::transport)?;
      return match id.collection() {
        Collection::Apps => decode_payload::<AppRecord>(id, &bytes),
        Collection::Portfolio => decode_payload::<PortfolioItemRecord>(id, &bytes),
      };
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
      .map(|m| m.message)
      .unwrap_or_else(|_| {
        if body.is_empty() {
          status.canonical_reason().unwrap_or_default().to_string()
        } else {
          body
        }
      });
    Err(status_error(id, status, message))
  }
}

/// Map a non-success API status to the catalog error taxonomy.
fn status_error(id: &ResourceId, status: StatusCode, message: String) -> CatalogError {
  match (status, id.record_id()) {
    (StatusCode::UNAUTHORIZED, _) => CatalogError::Unauthorized,
    (StatusCode::NOT_FOUND, Some(record_id)) => CatalogError::NotFound {
      collection: id.collection(),
      id: record_id,
    },
    (StatusCode::BAD_REQUEST, _) => CatalogError::InvalidRequest(message),
    _ => CatalogError::TransportFailure(format!("{}: {}", status.as_u16(), message)),
  }
}

/// Decode a successful API body: an array for collections, an object for records.
fn decode_payload<T: ResourceEntry>(id: &ResourceId, bytes: &[u8]) -> Result<Resource, CatalogError> {
  let Some(record_id) = id.record_id() else {
    return decode_collection::<T>(bytes).map(T::wrap_all);
  };

  let record: T = serde_json::from_slice(bytes)
    .map_err(|e| CatalogError::TransportFailure(format!("malformed {} payload: {}", id, e)))?;
  record.validate().map_err(CatalogError::transport)?;
  if record.id() != record_id {
    return Err(CatalogError::TransportFailure(format!(
      "requested {} but received id {}",
      id,
      record.id()
    )));
  }
  Ok(T::wrap_one(record))
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
  reqwest::Client::builder()
    .user_agent(concat!("polifilo/", env!("CARGO_PKG_VERSION")))
    .build()
    .map_err(|e| eyre!("Failed to create HTTP client: {}", e))
}

/// Parse a base URL, making sure relative joins append to its path.
pub(crate) fn normalized_base(base_url: &str) -> Result<Url> {
  let mut url =
    Url::parse(base_url).map_err(|e| eyre!("Invalid base URL {:?}: {}", base_url, e))?;
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  Ok(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_keeps_mount_prefix() {
    let source = HttpSource::new("http://localhost:5000/site", None).unwrap();
    assert_eq!(
      source.endpoint(&ResourceId::app(3)).unwrap().as_str(),
      "http://localhost:5000/site/api/apps/3"
    );

    let source = HttpSource::new("http://localhost:5000", None).unwrap();
    assert_eq!(
      source.endpoint(&ResourceId::portfolio()).unwrap().as_str(),
      "http://localhost:5000/api/portfolio"
    );
  }

  #[test]
  fn test_status_mapping() {
    let record = ResourceId::app(9);
    assert!(status_error(&record, StatusCode::NOT_FOUND, String::new()).is_not_found());
    assert_eq!(
      status_error(&record, StatusCode::UNAUTHORIZED, String::new()),
      CatalogError::Unauthorized
    );
    assert_eq!(
      status_error(&record, StatusCode::BAD_REQUEST, "Invalid app id".to_string()),
      CatalogError::InvalidRequest("Invalid app id".to_string())
    );
    // A missing collection endpoint is a deployment problem, not a missing record
    assert!(matches!(
      status_error(&ResourceId::apps(), StatusCode::NOT_FOUND, String::new()),
      CatalogError::TransportFailure(_)
    ));
  }

  #[test]
  fn test_decode_payload_checks_record_id() {
    let body = br##"{"id":4,"title":"Brand","description":"","category":"Branding","imageUrl":"","technologies":[],"projectUrl":"#"}"##;
    assert!(decode_payload::<PortfolioItemRecord>(&ResourceId::portfolio_item(4), body).is_ok());
    assert!(matches!(
      decode_payload::<PortfolioItemRecord>(&ResourceId::portfolio_item(5), body),
      Err(CatalogError::TransportFailure(_))
    ));
  }
}
