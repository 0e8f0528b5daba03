//! Detail view logic: resolving one record through the cache and the states
//! its page can be in.

use crate::cache::QueryCache;
use crate::catalog::AppRecord;
use crate::query::{Query, QueryState};
use crate::source::ResourceEntry;

pub const NOT_FOUND_TITLE: &str = "App Not Found";
pub const NOT_FOUND_HINT: &str = "The app you're looking for doesn't exist or has been removed.";
pub const FAILED_MESSAGE: &str = "Something went wrong while loading this page.";
pub const NO_FEATURES: &str = "No feature information available.";
pub const NO_SCREENSHOTS: &str = "No screenshots available.";

/// What a detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
  Loading,
  Resolved(T),
  /// No record with the requested id, or access was refused under `return_null`
  Absent,
  /// Any other failure, with the error for the title bar
  Failed(String),
}

impl<T: Clone> DetailState<T> {
  pub fn from_query(state: &QueryState<Option<T>>) -> Self {
    match state {
      QueryState::Idle | QueryState::Loading => DetailState::Loading,
      QueryState::Success(Some(record)) => DetailState::Resolved(record.clone()),
      QueryState::Success(None) => DetailState::Absent,
      QueryState::Error(err) if err.is_not_found() => DetailState::Absent,
      QueryState::Error(err) => DetailState::Failed(err.to_string()),
    }
  }
}

/// Start resolving record `id` of kind `T` through `cache`.
pub fn record_query<T: ResourceEntry>(cache: &QueryCache, id: u32) -> Query<Option<T>> {
  let cache = cache.clone();
  let mut query = Query::new(move || {
    let cache = cache.clone();
    async move { cache.fetch_record::<T>(id).await }
  });
  query.fetch();
  query
}

/// Tabs of the app detail page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppTab {
  #[default]
  Features,
  Screenshots,
  Details,
}

impl AppTab {
  pub const ALL: [AppTab; 3] = [AppTab::Features, AppTab::Screenshots, AppTab::Details];

  pub fn title(self) -> &'static str {
    match self {
      AppTab::Features => "Features",
      AppTab::Screenshots => "Screenshots",
      AppTab::Details => "Details",
    }
  }

  pub fn next(self) -> Self {
    match self {
      AppTab::Features => AppTab::Screenshots,
      AppTab::Screenshots => AppTab::Details,
      AppTab::Details => AppTab::Features,
    }
  }

  pub fn previous(self) -> Self {
    match self {
      AppTab::Features => AppTab::Details,
      AppTab::Screenshots => AppTab::Features,
      AppTab::Details => AppTab::Screenshots,
    }
  }
}

/// Feature bullet points, or the placeholder when there are none.
pub fn features(app: &AppRecord) -> Result<&[String], &'static str> {
  non_empty(app.features.as_deref(), NO_FEATURES)
}

/// Screenshot URLs, or the placeholder when there are none.
pub fn screenshots(app: &AppRecord) -> Result<&[String], &'static str> {
  non_empty(app.screenshots.as_deref(), NO_SCREENSHOTS)
}

fn non_empty<'a>(
  values: Option<&'a [String]>,
  placeholder: &'static str,
) -> Result<&'a [String], &'static str> {
  match values {
    Some(values) if !values.is_empty() => Ok(values),
    _ => Err(placeholder),
  }
}

/// Label/value rows of the Details tab. Optional fields are left out when unset.
pub fn detail_rows(app: &AppRecord) -> Vec<(&'static str, String)> {
  let mut rows = Vec::new();
  if let Some(developer) = &app.developer {
    rows.push(("Developer", developer.clone()));
  }
  if let Some(size) = &app.size {
    rows.push(("Size", size.clone()));
  }
  if let Some(release_date) = &app.release_date {
    rows.push(("Release Date", release_date.clone()));
  }
  rows.push(("Category", app.category.clone()));
  rows.push(("Price", app.pricing.label().to_string()));
  rows
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::UnauthorizedBehavior;
  use crate::catalog::{CatalogError, CatalogStore};
  use crate::source::testing::{two_app_store, ScriptedSource};
  use crate::source::StoreSource;
  use std::sync::Arc;
  use std::time::Duration;

  fn store_cache(store: CatalogStore) -> QueryCache {
    QueryCache::new(Arc::new(StoreSource::new(store)))
  }

  async fn resolve_detail<T: ResourceEntry>(cache: &QueryCache, id: u32) -> DetailState<T> {
    let state = match cache.fetch_record::<T>(id).await {
      Ok(record) => QueryState::Success(record),
      Err(err) => QueryState::Error(err),
    };
    DetailState::from_query(&state)
  }

  #[tokio::test]
  async fn test_valid_id_resolves_exact_record() {
    let store = two_app_store();
    let cache = store_cache(store.clone());

    let state = resolve_detail::<AppRecord>(&cache, 1).await;
    assert_eq!(state, DetailState::Resolved(store.app(1).unwrap().clone()));
  }

  #[tokio::test]
  async fn test_unknown_id_is_absent() {
    let cache = store_cache(two_app_store());
    assert_eq!(resolve_detail::<AppRecord>(&cache, 99).await, DetailState::Absent);

    let cache = store_cache(CatalogStore::empty());
    assert_eq!(resolve_detail::<AppRecord>(&cache, 1).await, DetailState::Absent);
  }

  #[tokio::test]
  async fn test_unauthorized_return_null_is_absent() {
    let source = ScriptedSource::new(two_app_store()).failing_with(vec![CatalogError::Unauthorized]);
    let cache = QueryCache::with_unauthorized(Arc::new(source), UnauthorizedBehavior::ReturnNull);

    assert_eq!(resolve_detail::<AppRecord>(&cache, 1).await, DetailState::Absent);
  }

  #[tokio::test]
  async fn test_transport_failure_is_failed() {
    let source = ScriptedSource::new(two_app_store())
      .failing_with(vec![CatalogError::TransportFailure("connection refused".to_string())]);
    let cache = QueryCache::new(Arc::new(source));

    assert!(matches!(
      resolve_detail::<AppRecord>(&cache, 1).await,
      DetailState::Failed(_)
    ));
  }

  #[tokio::test]
  async fn test_query_moves_from_loading_to_absent() {
    let source = ScriptedSource::new(two_app_store()).with_delay(Duration::from_millis(20));
    let cache = QueryCache::new(Arc::new(source));

    let mut query = record_query::<AppRecord>(&cache, 42);
    assert_eq!(DetailState::from_query(query.state()), DetailState::Loading);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(query.poll());
    assert_eq!(DetailState::from_query(query.state()), DetailState::Absent);
  }

  #[test]
  fn test_placeholders_for_missing_sections() {
    let app = AppRecord {
      id: 7,
      features: Some(Vec::new()),
      ..Default::default()
    };
    assert_eq!(features(&app), Err(NO_FEATURES));
    assert_eq!(screenshots(&app), Err(NO_SCREENSHOTS));
  }

  #[test]
  fn test_detail_rows_skip_unset_fields() {
    let store = two_app_store();
    let rows = detail_rows(store.app(1).unwrap());
    assert_eq!(
      rows,
      vec![
        ("Category", "Productivity".to_string()),
        ("Price", "$4.99".to_string()),
      ]
    );
  }

  #[test]
  fn test_tabs_cycle() {
    assert_eq!(AppTab::Details.next(), AppTab::Features);
    assert_eq!(AppTab::Features.previous(), AppTab::Details);
  }
}
