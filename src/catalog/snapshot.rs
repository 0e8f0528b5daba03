//! Static snapshot files: one JSON array per collection.

use std::path::{Path, PathBuf};

use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use tracing::info;

use super::error::CatalogError;
use super::model::{validate_collection, CatalogEntry};
use super::resource::Collection;
use super::store::CatalogStore;

/// Serialize a collection in snapshot form.
pub fn encode_collection<T: Serialize>(records: &[T]) -> serde_json::Result<Vec<u8>> {
  serde_json::to_vec_pretty(records)
}

/// Parse and validate a snapshot file's contents.
pub fn decode_collection<T: CatalogEntry>(bytes: &[u8]) -> Result<Vec<T>, CatalogError> {
  let records: Vec<T> = serde_json::from_slice(bytes).map_err(|e| {
    CatalogError::TransportFailure(format!(
      "malformed {} snapshot: {}",
      T::COLLECTION.snapshot_file(),
      e
    ))
  })?;
  validate_collection(&records).map_err(CatalogError::transport)?;
  Ok(records)
}

/// Write `apps.json` and `portfolio.json` into `dir`, creating it if needed.
pub fn write_snapshot(store: &CatalogStore, dir: &Path) -> Result<Vec<PathBuf>> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create snapshot directory {}: {}", dir.display(), e))?;

  let mut written = Vec::new();
  for collection in Collection::ALL {
    let bytes = match collection {
      Collection::Apps => encode_collection(store.apps()),
      Collection::Portfolio => encode_collection(store.portfolio()),
    }
    .map_err(|e| eyre!("Failed to serialize {}: {}", collection, e))?;

    let path = dir.join(collection.snapshot_file());
    std::fs::write(&path, bytes)
      .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
    info!(path = %path.display(), "wrote snapshot");
    written.push(path);
  }

  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::model::{AppRecord, PortfolioItemRecord};

  #[test]
  fn test_write_then_decode_matches_store() {
    let store = CatalogStore::seeded().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = write_snapshot(&store, dir.path()).unwrap();
    assert_eq!(written.len(), 2);

    let apps: Vec<AppRecord> =
      decode_collection(&std::fs::read(dir.path().join("apps.json")).unwrap()).unwrap();
    assert_eq!(apps.as_slice(), store.apps());

    let portfolio: Vec<PortfolioItemRecord> =
      decode_collection(&std::fs::read(dir.path().join("portfolio.json")).unwrap()).unwrap();
    assert_eq!(portfolio.as_slice(), store.portfolio());
  }

  #[test]
  fn test_decode_rejects_garbage() {
    let err = decode_collection::<AppRecord>(b"{not json").unwrap_err();
    assert!(matches!(err, CatalogError::TransportFailure(_)));
  }

  #[test]
  fn test_decode_rejects_duplicate_ids() {
    let bytes = br##"[
      {"id":1,"title":"a","description":"","category":"x","imageUrl":"","technologies":[],"projectUrl":"#"},
      {"id":1,"title":"b","description":"","category":"x","imageUrl":"","technologies":[],"projectUrl":"#"}
    ]"##;
    let err = decode_collection::<PortfolioItemRecord>(bytes).unwrap_err();
    assert!(matches!(err, CatalogError::TransportFailure(_)));
  }
}
