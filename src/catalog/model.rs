//! Catalog record types and their wire representation.
//!
//! Records travel as camelCase JSON, identical for the live API and the
//! static snapshot files. App pricing is flat on the wire (`price`,
//! `priceLabel`, `isPaid`) and folded into [`Pricing`] in memory, so a
//! record that made it past deserialization always has consistent pricing.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::RecordError;
use super::resource::Collection;

/// Behaviour shared by every record kind held in the catalog.
pub trait CatalogEntry: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
  /// Collection this record kind lives in
  const COLLECTION: Collection;

  /// Unique, stable identifier within the collection
  fn id(&self) -> u32;

  /// Free-text category label used by listing filters
  fn category(&self) -> &str;

  /// Check record-level invariants.
  fn validate(&self) -> Result<(), RecordError>;
}

// ============================================================================
// Pricing
// ============================================================================

/// Price of a paid app. Only constructible from a valid amount, which fixes
/// the display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidPrice {
  amount: String,
  label: String,
}

impl PaidPrice {
  pub fn new(amount: impl Into<String>) -> Result<Self, RecordError> {
    let amount = amount.into();
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    let well_formed = match amount.split_once('.') {
      Some((whole, cents)) => digits(whole) && digits(cents),
      None => digits(amount.as_str()),
    };
    let positive = amount
      .parse::<f64>()
      .map(|v| v.is_finite() && v > 0.0)
      .unwrap_or(false);

    if !(well_formed && positive) {
      return Err(RecordError::InvalidPrice(amount));
    }

    let label = format!("${}", amount);
    Ok(Self { amount, label })
  }

  /// Decimal amount as a string, e.g. "4.99"
  pub fn amount(&self) -> &str {
    &self.amount
  }

  /// Display label, e.g. "$4.99"
  pub fn label(&self) -> &str {
    &self.label
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Pricing {
  #[default]
  Free,
  Paid(PaidPrice),
}

impl Pricing {
  pub const FREE_LABEL: &'static str = "Free";

  pub fn paid(amount: impl Into<String>) -> Result<Self, RecordError> {
    PaidPrice::new(amount).map(Pricing::Paid)
  }

  /// Rebuild pricing from the flat wire fields, rejecting inconsistent combinations.
  pub fn from_parts(
    price: Option<String>,
    price_label: &str,
    is_paid: bool,
  ) -> Result<Self, RecordError> {
    let pricing = match (is_paid, price) {
      (true, Some(amount)) => Pricing::paid(amount)?,
      (true, None) => return Err(RecordError::MissingPrice),
      (false, Some(amount)) => return Err(RecordError::UnexpectedPrice(amount)),
      (false, None) => Pricing::Free,
    };

    if pricing.label() != price_label {
      return Err(RecordError::LabelMismatch {
        expected: pricing.label().to_string(),
        actual: price_label.to_string(),
      });
    }
    Ok(pricing)
  }

  pub fn is_paid(&self) -> bool {
    matches!(self, Pricing::Paid(_))
  }

  pub fn price(&self) -> Option<&str> {
    match self {
      Pricing::Free => None,
      Pricing::Paid(p) => Some(p.amount()),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      Pricing::Free => Self::FREE_LABEL,
      Pricing::Paid(p) => p.label(),
    }
  }
}

// ============================================================================
// App records
// ============================================================================

/// An app listed in the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AppWire", into = "AppWire")]
pub struct AppRecord {
  pub id: u32,
  pub name: String,
  pub category: String,
  pub pricing: Pricing,
  pub description: String,
  /// Average rating, 0 to 5
  pub rating: f32,
  pub reviews: u32,
  pub image_url: String,
  pub features: Option<Vec<String>>,
  pub screenshots: Option<Vec<String>>,
  pub developer: Option<String>,
  pub release_date: Option<String>,
  pub version: Option<String>,
  pub size: Option<String>,
  pub website: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

impl AppRecord {
  /// Label for the primary action on the detail page.
  pub fn action_label(&self) -> String {
    match &self.pricing {
      Pricing::Paid(p) => format!("Get for {}", p.label()),
      Pricing::Free => "Download Free".to_string(),
    }
  }
}

impl CatalogEntry for AppRecord {
  const COLLECTION: Collection = Collection::Apps;

  fn id(&self) -> u32 {
    self.id
  }

  fn category(&self) -> &str {
    &self.category
  }

  fn validate(&self) -> Result<(), RecordError> {
    if self.id == 0 {
      return Err(RecordError::ZeroId(Collection::Apps));
    }
    if !(0.0..=5.0).contains(&self.rating) {
      return Err(RecordError::RatingOutOfRange(self.rating));
    }
    Ok(())
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppWire {
  id: u32,
  name: String,
  category: String,
  #[serde(default)]
  price: Option<String>,
  price_label: String,
  description: String,
  rating: f32,
  reviews: u32,
  image_url: String,
  is_paid: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  features: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  screenshots: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  developer: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  release_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  size: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  website: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  created_at: Option<DateTime<Utc>>,
}

impl TryFrom<AppWire> for AppRecord {
  type Error = RecordError;

  fn try_from(wire: AppWire) -> Result<Self, Self::Error> {
    let pricing = Pricing::from_parts(wire.price, &wire.price_label, wire.is_paid)?;
    let record = AppRecord {
      id: wire.id,
      name: wire.name,
      category: wire.category,
      pricing,
      description: wire.description,
      rating: wire.rating,
      reviews: wire.reviews,
      image_url: wire.image_url,
      features: wire.features,
      screenshots: wire.screenshots,
      developer: wire.developer,
      release_date: wire.release_date,
      version: wire.version,
      size: wire.size,
      website: wire.website,
      created_at: wire.created_at,
    };
    record.validate()?;
    Ok(record)
  }
}

impl From<AppRecord> for AppWire {
  fn from(record: AppRecord) -> Self {
    AppWire {
      id: record.id,
      name: record.name,
      category: record.category,
      price: record.pricing.price().map(String::from),
      price_label: record.pricing.label().to_string(),
      is_paid: record.pricing.is_paid(),
      description: record.description,
      rating: record.rating,
      reviews: record.reviews,
      image_url: record.image_url,
      features: record.features,
      screenshots: record.screenshots,
      developer: record.developer,
      release_date: record.release_date,
      version: record.version,
      size: record.size,
      website: record.website,
      created_at: record.created_at,
    }
  }
}

// ============================================================================
// Portfolio records
// ============================================================================

/// A showcased project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemRecord {
  pub id: u32,
  pub title: String,
  pub description: String,
  pub category: String,
  pub image_url: String,
  pub technologies: Vec<String>,
  pub project_url: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

impl CatalogEntry for PortfolioItemRecord {
  const COLLECTION: Collection = Collection::Portfolio;

  fn id(&self) -> u32 {
    self.id
  }

  fn category(&self) -> &str {
    &self.category
  }

  fn validate(&self) -> Result<(), RecordError> {
    if self.id == 0 {
      return Err(RecordError::ZeroId(Collection::Portfolio));
    }
    Ok(())
  }
}

/// Validate every record and check ids are unique within the collection.
pub fn validate_collection<T: CatalogEntry>(records: &[T]) -> Result<(), RecordError> {
  let mut seen = std::collections::HashSet::new();
  for record in records {
    record.validate()?;
    if !seen.insert(record.id()) {
      return Err(RecordError::DuplicateId {
        collection: T::COLLECTION,
        id: record.id(),
      });
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn paid_app() -> AppRecord {
    AppRecord {
      id: 1,
      name: "TaskMaster Pro".to_string(),
      category: "Productivity".to_string(),
      pricing: Pricing::paid("4.99").unwrap(),
      description: "Tasks".to_string(),
      rating: 4.8,
      reviews: 2300,
      image_url: "https://example.com/a.jpg".to_string(),
      features: Some(vec!["Dark mode support".to_string()]),
      developer: Some("Polifilo Software Inc.".to_string()),
      created_at: Some(Utc::now()),
      ..Default::default()
    }
  }

  #[test]
  fn test_paid_price_label() {
    let pricing = Pricing::paid("4.99").unwrap();
    assert!(pricing.is_paid());
    assert_eq!(pricing.price(), Some("4.99"));
    assert_eq!(pricing.label(), "$4.99");
  }

  #[test]
  fn test_invalid_amounts_rejected() {
    for amount in ["", "abc", "-1", "0", "1.2.3", "4,99", "4.", ".5", "."] {
      assert!(Pricing::paid(amount).is_err(), "{:?} should be rejected", amount);
    }
  }

  #[test]
  fn test_from_parts_enforces_invariant() {
    assert_eq!(
      Pricing::from_parts(None, "Free", false),
      Ok(Pricing::Free)
    );
    assert_eq!(
      Pricing::from_parts(None, "$1.99", true),
      Err(RecordError::MissingPrice)
    );
    assert!(matches!(
      Pricing::from_parts(Some("1.99".to_string()), "Free", false),
      Err(RecordError::UnexpectedPrice(_))
    ));
    assert!(matches!(
      Pricing::from_parts(Some("1.99".to_string()), "$2.99", true),
      Err(RecordError::LabelMismatch { .. })
    ));
    assert!(matches!(
      Pricing::from_parts(None, "Gratis", false),
      Err(RecordError::LabelMismatch { .. })
    ));
  }

  #[test]
  fn test_app_wire_field_names() {
    let value = serde_json::to_value(paid_app()).unwrap();
    assert_eq!(value["priceLabel"], "$4.99");
    assert_eq!(value["price"], "4.99");
    assert_eq!(value["isPaid"], true);
    assert_eq!(value["imageUrl"], "https://example.com/a.jpg");
    // Absent optionals are omitted rather than null
    assert!(value.get("screenshots").is_none());
    assert!(value["createdAt"].is_string());
  }

  #[test]
  fn test_free_app_serializes_null_price() {
    let app = AppRecord {
      id: 2,
      name: "FitTrack".to_string(),
      category: "Health & Fitness".to_string(),
      ..Default::default()
    };
    let value = serde_json::to_value(&app).unwrap();
    assert!(value["price"].is_null());
    assert_eq!(value["priceLabel"], "Free");
    assert_eq!(value["isPaid"], false);
  }

  #[test]
  fn test_app_round_trip_preserves_every_field() {
    let app = paid_app();
    let text = serde_json::to_string(&app).unwrap();
    let parsed: AppRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, app);

    let item = PortfolioItemRecord {
      id: 3,
      title: "Analytics Dashboard".to_string(),
      technologies: vec!["Figma".to_string(), "D3.js".to_string()],
      created_at: Some(Utc::now()),
      ..Default::default()
    };
    let text = serde_json::to_string(&item).unwrap();
    assert_eq!(serde_json::from_str::<PortfolioItemRecord>(&text).unwrap(), item);
  }

  #[test]
  fn test_deserialize_rejects_inconsistent_pricing() {
    let value = json!({
      "id": 5, "name": "NotePro", "category": "Productivity",
      "price": null, "priceLabel": "$2.99", "isPaid": true,
      "description": "Notes", "rating": 4.5, "reviews": 2800,
      "imageUrl": "https://example.com/n.jpg"
    });
    assert!(serde_json::from_value::<AppRecord>(value).is_err());
  }

  #[test]
  fn test_deserialize_rejects_rating_out_of_range() {
    let value = json!({
      "id": 5, "name": "NotePro", "category": "Productivity",
      "priceLabel": "Free", "isPaid": false,
      "description": "Notes", "rating": 7.0, "reviews": 1,
      "imageUrl": "https://example.com/n.jpg"
    });
    assert!(serde_json::from_value::<AppRecord>(value).is_err());
  }

  #[test]
  fn test_validate_collection_rejects_duplicates() {
    let apps = vec![paid_app(), paid_app()];
    assert_eq!(
      validate_collection(&apps),
      Err(RecordError::DuplicateId {
        collection: Collection::Apps,
        id: 1
      })
    );
  }

  #[test]
  fn test_action_label() {
    assert_eq!(paid_app().action_label(), "Get for $4.99");
    assert_eq!(AppRecord::default().action_label(), "Download Free");
  }
}
