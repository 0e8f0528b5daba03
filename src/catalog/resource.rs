//! Logical resource identifiers: `apps`, `apps/2`, `portfolio`, `portfolio/4`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// One of the two read-only catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
  Apps,
  Portfolio,
}

impl Collection {
  pub const ALL: [Collection; 2] = [Collection::Apps, Collection::Portfolio];

  /// Path segment used by both the API and resource identifiers.
  pub fn segment(&self) -> &'static str {
    match self {
      Collection::Apps => "apps",
      Collection::Portfolio => "portfolio",
    }
  }

  /// Human label for a single record, as used in "not found" messages.
  pub fn record_label(&self) -> &'static str {
    match self {
      Collection::Apps => "App",
      Collection::Portfolio => "Portfolio item",
    }
  }

  /// File name of the static snapshot for this collection.
  pub fn snapshot_file(&self) -> &'static str {
    match self {
      Collection::Apps => "apps.json",
      Collection::Portfolio => "portfolio.json",
    }
  }

  /// The error every entry point gives for an id that is not a positive `u32`.
  pub fn invalid_id(&self) -> CatalogError {
    CatalogError::InvalidRequest(format!("Invalid {} id", self.record_label().to_lowercase()))
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.segment())
  }
}

/// Transport-independent name for "a collection" or "one record of a collection".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceId {
  Collection(Collection),
  Record(Collection, u32),
}

#[cfg(test)]
impl ResourceId {
  pub fn apps() -> Self {
    ResourceId::Collection(Collection::Apps)
  }

  pub fn app(id: u32) -> Self {
    ResourceId::Record(Collection::Apps, id)
  }

  pub fn portfolio() -> Self {
    ResourceId::Collection(Collection::Portfolio)
  }

  pub fn portfolio_item(id: u32) -> Self {
    ResourceId::Record(Collection::Portfolio, id)
  }
}

impl ResourceId {
  pub fn collection(&self) -> Collection {
    match self {
      ResourceId::Collection(c) | ResourceId::Record(c, _) => *c,
    }
  }

  pub fn record_id(&self) -> Option<u32> {
    match self {
      ResourceId::Collection(_) => None,
      ResourceId::Record(_, id) => Some(*id),
    }
  }

  /// Reject record ids no backend can hold, before any backend is asked.
  pub fn checked(self) -> Result<Self, CatalogError> {
    match self {
      ResourceId::Record(collection, 0) => Err(collection.invalid_id()),
      id => Ok(id),
    }
  }

  /// Path of the live endpoint, relative to the server root.
  pub fn api_path(&self) -> String {
    format!("/api/{}", self)
  }
}

/// Parse a record id the way every entry point does: a positive `u32`.
pub fn parse_record_id(collection: Collection, raw: &str) -> Result<u32, CatalogError> {
  match raw.parse::<u32>() {
    Ok(0) | Err(_) => Err(collection.invalid_id()),
    Ok(id) => Ok(id),
  }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResourceId::Collection(c) => write!(f, "{}", c),
      ResourceId::Record(c, id) => write!(f, "{}/{}", c, id),
    }
  }
}
