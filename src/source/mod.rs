//! Catalog access layer.
//!
//! A [`CatalogSource`] resolves a [`ResourceId`] to a whole collection or a
//! single record. Three interchangeable backends share the contract:
//!
//! - [`StoreSource`]: in-process query against a [`CatalogStore`]
//! - [`HttpSource`]: the live JSON API (`/api/apps`, `/api/apps/{id}`, ...)
//! - [`SnapshotSource`]: static `apps.json` / `portfolio.json` files, from a
//!   directory or a URL, filtered by id client-side
//!
//! Whichever backend is configured, collection requests return records in
//! insertion order, a missing id is always [`CatalogError::NotFound`] and a
//! zero id is always [`CatalogError::InvalidRequest`].

mod http;
mod snapshot;
mod store;

use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::Result;

use crate::catalog::{
  find_by_id, AppRecord, CatalogEntry, CatalogError, CatalogStore, PortfolioItemRecord, ResourceId,
};
use crate::config::{SourceConfig, SourceMode};

pub use http::HttpSource;
pub use snapshot::{SnapshotLocation, SnapshotSource};
pub use store::StoreSource;

/// A resolved logical resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
  Apps(Vec<AppRecord>),
  App(AppRecord),
  Portfolio(Vec<PortfolioItemRecord>),
  PortfolioItem(PortfolioItemRecord),
}

/// Record kinds that can be wrapped into and read back out of a [`Resource`].
pub trait ResourceEntry: CatalogEntry {
  fn wrap_one(record: Self) -> Resource;
  fn wrap_all(records: Vec<Self>) -> Resource;
  fn unwrap_one(resource: &Resource) -> Option<&Self>;
  fn unwrap_all(resource: &Resource) -> Option<&[Self]>;
}

impl ResourceEntry for AppRecord {
  fn wrap_one(record: Self) -> Resource {
    Resource::App(record)
  }

  fn wrap_all(records: Vec<Self>) -> Resource {
    Resource::Apps(records)
  }

  fn unwrap_one(resource: &Resource) -> Option<&Self> {
    match resource {
      Resource::App(app) => Some(app),
      _ => None,
    }
  }

  fn unwrap_all(resource: &Resource) -> Option<&[Self]> {
    match resource {
      Resource::Apps(apps) => Some(apps),
      _ => None,
    }
  }
}

impl ResourceEntry for PortfolioItemRecord {
  fn wrap_one(record: Self) -> Resource {
    Resource::PortfolioItem(record)
  }

  fn wrap_all(records: Vec<Self>) -> Resource {
    Resource::Portfolio(records)
  }

  fn unwrap_one(resource: &Resource) -> Option<&Self> {
    match resource {
      Resource::PortfolioItem(item) => Some(item),
      _ => None,
    }
  }

  fn unwrap_all(resource: &Resource) -> Option<&[Self]> {
    match resource {
      Resource::Portfolio(items) => Some(items),
      _ => None,
    }
  }
}

/// Backend capable of resolving logical resources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
  /// Short description for logs and the header bar
  fn describe(&self) -> String;

  async fn resolve(&self, id: &ResourceId) -> Result<Resource, CatalogError>;
}

/// Answer `id` from an already-loaded collection.
pub(crate) fn select<T: ResourceEntry>(
  records: &[T],
  id: &ResourceId,
) -> Result<Resource, CatalogError> {
  match id.checked()?.record_id() {
    None => Ok(T::wrap_all(records.to_vec())),
    Some(record_id) => find_by_id(records, record_id)
      .cloned()
      .map(T::wrap_one)
      .ok_or(CatalogError::NotFound {
        collection: T::COLLECTION,
        id: record_id,
      }),
  }
}

/// Build the source selected by configuration.
pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn CatalogSource>> {
  let source: Arc<dyn CatalogSource> = match config.mode {
    SourceMode::Live => Arc::new(HttpSource::new(&config.base_url, SourceConfig::api_token())?),
    SourceMode::Static => {
      let location = match &config.snapshot_dir {
        Some(dir) => SnapshotLocation::Directory(dir.clone()),
        None => SnapshotLocation::under_base_url(&config.base_url)?,
      };
      Arc::new(SnapshotSource::new(location)?)
    }
    SourceMode::Embedded => Arc::new(StoreSource::new(CatalogStore::seeded()?)),
  };

  tracing::info!(source = %source.describe(), "catalog source selected");
  Ok(source)
}

#[cfg(test)]
pub(crate) mod testing {
  //! Sources with controllable behaviour for cache and view tests.

  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::time::Duration;

  /// Wraps a store source, counting resolutions and optionally delaying or failing them.
  pub struct ScriptedSource {
    inner: StoreSource,
    pub calls: AtomicUsize,
    delay: Duration,
    /// Errors returned by the first N calls, in order
    failures: std::sync::Mutex<Vec<CatalogError>>,
  }

  impl ScriptedSource {
    pub fn new(store: CatalogStore) -> Self {
      Self {
        inner: StoreSource::new(store),
        calls: AtomicUsize::new(0),
        delay: Duration::ZERO,
        failures: std::sync::Mutex::new(Vec::new()),
      }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
      self.delay = delay;
      self
    }

    pub fn failing_with(self, errors: Vec<CatalogError>) -> Self {
      *self.failures.lock().unwrap() = errors.into_iter().rev().collect();
      self
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  #[async_trait]
  impl CatalogSource for ScriptedSource {
    fn describe(&self) -> String {
      "scripted".to_string()
    }

    async fn resolve(&self, id: &ResourceId) -> Result<Resource, CatalogError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if !self.delay.is_zero() {
        tokio::time::sleep(self.delay).await;
      }
      let scripted = self.failures.lock().unwrap().pop();
      match scripted {
        Some(err) => Err(err),
        None => self.inner.resolve(id).await,
      }
    }
  }

  /// The two-app catalog used throughout the tests.
  pub fn two_app_store() -> CatalogStore {
    use crate::catalog::Pricing;

    let apps = vec![
      AppRecord {
        id: 1,
        name: "TaskMaster Pro".to_string(),
        category: "Productivity".to_string(),
        pricing: Pricing::paid("4.99").unwrap(),
        rating: 4.8,
        ..Default::default()
      },
      AppRecord {
        id: 2,
        name: "FitTrack".to_string(),
        category: "Health & Fitness".to_string(),
        pricing: Pricing::Free,
        rating: 4.6,
        ..Default::default()
      },
    ];
    CatalogStore::new(apps, Vec::new()).unwrap()
  }
}
