//! Cache layer that deduplicates and memoizes catalog resolutions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use super::result::{CacheResult, CacheSource, UnauthorizedBehavior};
use crate::catalog::{CatalogError, ResourceId};
use crate::source::{CatalogSource, Resource, ResourceEntry};

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<Resource>, CatalogError>>>;

enum Slot {
  Ready(Arc<Resource>),
  Pending(SharedFetch),
}

struct Inner {
  source: Arc<dyn CatalogSource>,
  slots: Mutex<HashMap<ResourceId, Slot>>,
  fetches: AtomicU64,
  on_unauthorized: UnauthorizedBehavior,
}

impl Inner {
  fn slots(&self) -> MutexGuard<'_, HashMap<ResourceId, Slot>> {
    self.slots.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Record a finished fetch. Settling twice is a no-op.
  fn settle(&self, id: &ResourceId, result: &Result<Arc<Resource>, CatalogError>) {
    let mut slots = self.slots();
    if !matches!(slots.get(id), Some(Slot::Pending(_))) {
      return;
    }

    match result {
      Ok(resource) => {
        slots.insert(*id, Slot::Ready(Arc::clone(resource)));
      }
      Err(err) => {
        debug!(%id, %err, "fetch failed, not caching");
        slots.remove(id);
      }
    }
  }
}

/// Cache layer between the views and a [`CatalogSource`].
///
/// Clones share the same slots. Every fetch runs on its own task and settles
/// its slot itself, so a fetch completes and populates the cache even when
/// every caller waiting on it has gone away.
#[derive(Clone)]
pub struct QueryCache {
  inner: Arc<Inner>,
}

impl QueryCache {
  pub fn new(source: Arc<dyn CatalogSource>) -> Self {
    Self::with_unauthorized(source, UnauthorizedBehavior::default())
  }

  pub fn with_unauthorized(
    source: Arc<dyn CatalogSource>,
    on_unauthorized: UnauthorizedBehavior,
  ) -> Self {
    Self {
      inner: Arc::new(Inner {
        source,
        slots: Mutex::new(HashMap::new()),
        fetches: AtomicU64::new(0),
        on_unauthorized,
      }),
    }
  }

  pub fn describe_source(&self) -> String {
    self.inner.source.describe()
  }

  /// Number of fetches issued to the source so far.
  pub fn fetch_count(&self) -> u64 {
    self.inner.fetches.load(Ordering::SeqCst)
  }

  /// Resolve `id`, joining an in-flight fetch or starting a new one.
  ///
  /// Errors come back untouched, `Unauthorized` included.
  pub async fn lookup(&self, id: &ResourceId) -> Result<CacheResult<Arc<Resource>>, CatalogError> {
    let (fetch, source) = {
      let mut slots = self.inner.slots();
      match slots.get(id) {
        Some(Slot::Ready(resource)) => {
          return Ok(CacheResult::new(Arc::clone(resource), CacheSource::Cache));
        }
        Some(Slot::Pending(fetch)) => (fetch.clone(), CacheSource::InFlight),
        None => {
          let fetch = self.start_fetch(*id);
          slots.insert(*id, Slot::Pending(fetch.clone()));
          (fetch, CacheSource::Network)
        }
      }
    };

    fetch.await.map(|data| CacheResult::new(data, source))
  }

  /// Resolve `id` using the cache's configured unauthorized behavior.
  pub async fn fetch(&self, id: &ResourceId) -> Result<Option<Arc<Resource>>, CatalogError> {
    self.fetch_with(id, self.inner.on_unauthorized).await
  }

  /// Resolve `id`, overriding the unauthorized behavior for this call.
  pub async fn fetch_with(
    &self,
    id: &ResourceId,
    on_unauthorized: UnauthorizedBehavior,
  ) -> Result<Option<Arc<Resource>>, CatalogError> {
    match self.lookup(id).await {
      Ok(result) => Ok(Some(result.data)),
      Err(CatalogError::Unauthorized) if on_unauthorized == UnauthorizedBehavior::ReturnNull => {
        debug!(%id, "unauthorized, resolving to nothing");
        Ok(None)
      }
      Err(err) => Err(err),
    }
  }

  /// Fetch a whole collection of `T` records.
  pub async fn fetch_list<T: ResourceEntry>(&self) -> Result<Option<Vec<T>>, CatalogError> {
    let id = ResourceId::Collection(T::COLLECTION);
    let Some(resource) = self.fetch(&id).await? else {
      return Ok(None);
    };
    T::unwrap_all(&resource)
      .map(|records| Some(records.to_vec()))
      .ok_or_else(|| unexpected_shape(&id))
  }

  /// Fetch a single `T` record by id.
  pub async fn fetch_record<T: ResourceEntry>(&self, record_id: u32) -> Result<Option<T>, CatalogError> {
    let id = ResourceId::Record(T::COLLECTION, record_id);
    let Some(resource) = self.fetch(&id).await? else {
      return Ok(None);
    };
    T::unwrap_one(&resource)
      .map(|record| Some(record.clone()))
      .ok_or_else(|| unexpected_shape(&id))
  }

  fn start_fetch(&self, id: ResourceId) -> SharedFetch {
    self.inner.fetches.fetch_add(1, Ordering::SeqCst);
    debug!(%id, "fetching");

    let task_inner = Arc::clone(&self.inner);
    let handle = tokio::spawn(async move {
      let result = task_inner.source.resolve(&id).await.map(Arc::new);
      task_inner.settle(&id, &result);
      result
    });

    let inner = Arc::clone(&self.inner);
    async move {
      match handle.await {
        Ok(result) => result,
        Err(join_err) => {
          warn!(%id, %join_err, "fetch task did not complete");
          let result = Err(CatalogError::TransportFailure(format!(
            "fetch of {} did not complete: {}",
            id, join_err
          )));
          inner.settle(&id, &result);
          result
        }
      }
    }
    .boxed()
    .shared()
  }
}

fn unexpected_shape(id: &ResourceId) -> CatalogError {
  CatalogError::TransportFailure(format!("source returned the wrong shape for {}", id))
}
