use async_trait::async_trait;

use super::{select, CatalogSource, Resource};
use crate::catalog::{CatalogError, CatalogStore, Collection, ResourceId};

/// Resolves resources by querying a [`CatalogStore`] in-process.
///
/// Backs the live API handlers and the `embedded` browse mode.
#[derive(Clone, Debug)]
pub struct StoreSource {
  store: CatalogStore,
}

impl StoreSource {
  pub fn new(store: CatalogStore) -> Self {
    Self { store }
  }
}

#[async_trait]
impl CatalogSource for StoreSource {
  fn describe(&self) -> String {
    "embedded catalog".to_string()
  }

  async fn resolve(&self, id: &ResourceId) -> Result<Resource, CatalogError> {
    match id.collection() {
      Collection::Apps => select(self.store.apps(), id),
      Collection::Portfolio => select(self.store.portfolio(), id),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::testing::two_app_store;

  #[tokio::test]
  async fn test_collection_in_insertion_order() {
    let source = StoreSource::new(CatalogStore::seeded().unwrap());
    let Resource::Apps(apps) = source.resolve(&ResourceId::apps()).await.unwrap() else {
      panic!("expected app list");
    };
    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
      names,
      vec!["TaskMaster Pro", "FitTrack", "StreamHub", "MindfulMe", "NotePro", "DreamTrack"]
    );
  }

  #[tokio::test]
  async fn test_record_lookup_and_not_found() {
    let store = two_app_store();
    let source = StoreSource::new(store.clone());

    let found = source.resolve(&ResourceId::app(2)).await.unwrap();
    assert_eq!(found, Resource::App(store.app(2).unwrap().clone()));

    let missing = source.resolve(&ResourceId::app(99)).await.unwrap_err();
    assert_eq!(
      missing,
      CatalogError::NotFound {
        collection: Collection::Apps,
        id: 99
      }
    );
  }

  #[tokio::test]
  async fn test_empty_store_lists_nothing_and_finds_nothing() {
    let source = StoreSource::new(CatalogStore::empty());

    assert_eq!(
      source.resolve(&ResourceId::portfolio()).await.unwrap(),
      Resource::Portfolio(Vec::new())
    );
    assert!(source
      .resolve(&ResourceId::portfolio_item(1))
      .await
      .unwrap_err()
      .is_not_found());
  }
}
