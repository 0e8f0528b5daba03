use std::path::PathBuf;

use async_trait::async_trait;
use color_eyre::Result;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::http::{http_client, normalized_base};
use super::{select, CatalogSource, Resource, ResourceEntry};
use crate::catalog::{
  decode_collection, AppRecord, CatalogError, Collection, PortfolioItemRecord, ResourceId,
};

/// Where the snapshot files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
  /// Local directory holding `apps.json` and `portfolio.json`
  Directory(PathBuf),
  /// URL prefix the files are served under
  Url(Url),
}

impl SnapshotLocation {
  /// The `/data/` folder of a deployed site.
  pub fn under_base_url(base_url: &str) -> Result<Self> {
    let base = normalized_base(base_url)?;
    let data = base
      .join("data/")
      .map_err(|e| color_eyre::eyre::eyre!("Invalid snapshot URL under {}: {}", base, e))?;
    Ok(SnapshotLocation::Url(data))
  }
}

impl std::fmt::Display for SnapshotLocation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SnapshotLocation::Directory(dir) => write!(f, "{}", dir.display()),
      SnapshotLocation::Url(url) => write!(f, "{}", url),
    }
  }
}

/// Resolves resources from static snapshot files.
///
/// Every request reads the whole collection file; single records are picked
/// out of it by id. Files are not held between calls, the query cache above
/// takes care of that.
pub struct SnapshotSource {
  location: SnapshotLocation,
  client: Option<reqwest::Client>,
}

impl SnapshotSource {
  pub fn new(location: SnapshotLocation) -> Result<Self> {
    let client = match location {
      SnapshotLocation::Url(_) => Some(http_client()?),
      SnapshotLocation::Directory(_) => None,
    };
    Ok(Self { location, client })
  }

  async fn read(&self, collection: Collection) -> Result<Vec<u8>, CatalogError> {
    let file = collection.snapshot_file();
    match (&self.location, &self.client) {
      (SnapshotLocation::Directory(dir), _) => {
        let path = dir.join(file);
        debug!(path = %path.display(), "reading snapshot");
        tokio::fs::read(&path).await.map_err(|e| {
          CatalogError::TransportFailure(format!("cannot read {}: {}", path.display(), e))
        })
      }
      (SnapshotLocation::Url(base), Some(client)) => {
        let url = base.join(file).map_err(CatalogError::transport)?;
        debug!(%url, "fetching snapshot");
        let response = client
          .get(url.clone())
          .send()
          .await
          .map_err(CatalogError::transport)?;
        match response.status() {
          status if status.is_success() => response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(CatalogError::transport),
          StatusCode::UNAUTHORIZED => Err(CatalogError::Unauthorized),
          status => Err(CatalogError::TransportFailure(format!(
            "{}: GET {}",
            status.as_u16(),
            url
          ))),
        }
      }
      (SnapshotLocation::Url(_), None) => Err(CatalogError::TransportFailure(
        "snapshot source has no HTTP client".to_string(),
      )),
    }
  }

  async fn load<T: ResourceEntry>(&self, id: &ResourceId) -> Result<Resource, CatalogError> {
    let bytes = self.read(T::COLLECTION).await?;
    let records = decode_collection::<T>(&bytes)?;
    select(&records, id)
  }
}

#[async_trait]
impl CatalogSource for SnapshotSource {
  fn describe(&self) -> String {
    format!("static snapshot at {}", self.location)
  }

  async fn resolve(&self, id: &ResourceId) -> Result<Resource, CatalogError> {
    match id.collection() {
      Collection::Apps => self.load::<AppRecord>(id).await,
      Collection::Portfolio => self.load::<PortfolioItemRecord>(id).await,
    }
  }
}
