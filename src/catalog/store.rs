//! The in-memory catalog, built once at startup and shared by handle.

use std::sync::Arc;

use chrono::Utc;

use super::error::RecordError;
use super::model::{validate_collection, AppRecord, CatalogEntry, PortfolioItemRecord};
use super::seed;

struct StoreInner {
  apps: Vec<AppRecord>,
  portfolio: Vec<PortfolioItemRecord>,
}

/// Read-only catalog of apps and portfolio items.
///
/// Cloning is cheap and every clone sees the same records. There is no way to
/// mutate a store after construction.
#[derive(Clone)]
pub struct CatalogStore {
  inner: Arc<StoreInner>,
}

impl CatalogStore {
  /// Build a store, validating every record and id uniqueness per collection.
  pub fn new(
    apps: Vec<AppRecord>,
    portfolio: Vec<PortfolioItemRecord>,
  ) -> Result<Self, RecordError> {
    validate_collection(&apps)?;
    validate_collection(&portfolio)?;

    Ok(Self {
      inner: Arc::new(StoreInner { apps, portfolio }),
    })
  }

  /// Store holding the built-in site content, stamped with the current time.
  pub fn seeded() -> Result<Self, RecordError> {
    let now = Utc::now();
    Self::new(seed::apps(now)?, seed::portfolio_items(now))
  }

  /// All apps in insertion order
  pub fn apps(&self) -> &[AppRecord] {
    &self.inner.apps
  }

  /// All portfolio items in insertion order
  pub fn portfolio(&self) -> &[PortfolioItemRecord] {
    &self.inner.portfolio
  }

}

#[cfg(test)]
impl CatalogStore {
  pub fn empty() -> Self {
    Self {
      inner: Arc::new(StoreInner {
        apps: Vec::new(),
        portfolio: Vec::new(),
      }),
    }
  }

  pub fn app(&self, id: u32) -> Option<&AppRecord> {
    find_by_id(self.apps(), id)
  }

  pub fn portfolio_item(&self, id: u32) -> Option<&PortfolioItemRecord> {
    find_by_id(self.portfolio(), id)
  }
}

impl std::fmt::Debug for CatalogStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogStore")
      .field("apps", &self.inner.apps.len())
      .field("portfolio", &self.inner.portfolio.len())
      .finish()
  }
}

/// Linear lookup; collections are small and kept in display order.
pub fn find_by_id<T: CatalogEntry>(records: &[T], id: u32) -> Option<&T> {
  records.iter().find(|r| r.id() == id)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::model::Pricing;
  use crate::catalog::resource::Collection;

  #[test]
  fn test_seeded_store_matches_site_content() {
    let store = CatalogStore::seeded().unwrap();
    assert_eq!(store.apps().len(), 6);
    assert_eq!(store.portfolio().len(), 4);

    let ids: Vec<u32> = store.apps().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    let fittrack = store.app(2).unwrap();
    assert_eq!(fittrack.name, "FitTrack");
    assert_eq!(fittrack.pricing, Pricing::Free);

    let taskmaster = store.app(1).unwrap();
    assert_eq!(taskmaster.pricing.label(), "$4.99");
  }

  #[test]
  fn test_lookup_missing_id() {
    let store = CatalogStore::seeded().unwrap();
    assert!(store.app(99).is_none());
    assert!(store.portfolio_item(0).is_none());
  }

  #[test]
  fn test_duplicate_ids_rejected() {
    let item = PortfolioItemRecord {
      id: 1,
      ..Default::default()
    };
    let err = CatalogStore::new(Vec::new(), vec![item.clone(), item]).unwrap_err();
    assert_eq!(
      err,
      RecordError::DuplicateId {
        collection: Collection::Portfolio,
        id: 1
      }
    );
  }

  #[test]
  fn test_clones_share_records() {
    let store = CatalogStore::seeded().unwrap();
    let other = store.clone();
    assert!(std::ptr::eq(store.apps(), other.apps()));
  }
}
