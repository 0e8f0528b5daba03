//! JSON API over the catalog store.
//!
//! - `GET /api/apps`, `GET /api/apps/{id}`
//! - `GET /api/portfolio`, `GET /api/portfolio/{id}`
//! - `GET /data/apps.json`, `GET /data/portfolio.json` (snapshot form)
//!
//! Anything else falls through to `server.static_dir` when configured.

mod error;

use std::path::Path as FsPath;

use axum::{
  extract::{Path, State},
  response::Json,
  routing::get,
  Router,
};
use color_eyre::{eyre::eyre, Result};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::{parse_record_id, AppRecord, CatalogStore, PortfolioItemRecord, ResourceId};
use crate::config::ServerConfig;
use crate::source::{CatalogSource, ResourceEntry, StoreSource};

use error::ApiError;
pub use error::ApiMessage;

#[derive(Clone)]
pub struct AppState {
  source: StoreSource,
}

impl AppState {
  pub fn new(store: CatalogStore) -> Self {
    Self {
      source: StoreSource::new(store),
    }
  }
}

/// Build the router, with `static_dir` as fallback for unmatched paths.
pub fn router(state: AppState, static_dir: Option<&FsPath>) -> Router {
  let api = Router::new()
    .route("/api/apps", get(list_records::<AppRecord>))
    .route("/api/apps/{id}", get(get_record::<AppRecord>))
    .route("/api/portfolio", get(list_records::<PortfolioItemRecord>))
    .route("/api/portfolio/{id}", get(get_record::<PortfolioItemRecord>))
    .route("/data/apps.json", get(list_records::<AppRecord>))
    .route("/data/portfolio.json", get(list_records::<PortfolioItemRecord>))
    .with_state(state);

  let app = match static_dir {
    Some(dir) => api.fallback_service(ServeDir::new(dir)),
    None => api,
  };

  app.layer(TraceLayer::new_for_http())
}

async fn list_records<T: ResourceEntry>(
  State(state): State<AppState>,
) -> Result<Json<Vec<T>>, ApiError> {
  let id = ResourceId::Collection(T::COLLECTION);
  let resource = state.source.resolve(&id).await?;
  T::unwrap_all(&resource)
    .map(|records| Json(records.to_vec()))
    .ok_or_else(|| ApiError::Internal(format!("store returned the wrong shape for {}", id)))
}

async fn get_record<T: ResourceEntry>(
  State(state): State<AppState>,
  Path(raw_id): Path<String>,
) -> Result<Json<T>, ApiError> {
  let record_id =
    parse_record_id(T::COLLECTION, &raw_id).map_err(|_| ApiError::InvalidId(T::COLLECTION))?;
  let id = ResourceId::Record(T::COLLECTION, record_id);
  let resource = state.source.resolve(&id).await?;
  T::unwrap_one(&resource)
    .map(|record| Json(record.clone()))
    .ok_or_else(|| ApiError::Internal(format!("store returned the wrong shape for {}", id)))
}

/// Serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, store: CatalogStore) -> Result<()> {
  if let Some(dir) = &config.static_dir {
    if !dir.is_dir() {
      warn!(dir = %dir.display(), "static_dir does not exist, fallback will 404");
    }
  }

  let app = router(AppState::new(store), config.static_dir.as_deref());
  let listener = TcpListener::bind(config.bind)
    .await
    .map_err(|e| eyre!("Failed to bind {}: {}", config.bind, e))?;
  let addr = listener
    .local_addr()
    .map_err(|e| eyre!("Failed to read local address: {}", e))?;
  info!(%addr, "listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| eyre!("Server failed: {}", e))
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "cannot listen for Ctrl-C, running until killed");
    std::future::pending::<()>().await;
  }
  info!("shutting down");
}
