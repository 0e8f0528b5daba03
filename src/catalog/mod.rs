//! Catalog records, the read-only store that holds them, and the logical
//! resource identifiers used to address them.

mod error;
mod model;
mod resource;
mod seed;
mod snapshot;
mod store;

pub use error::CatalogError;
pub use model::{AppRecord, CatalogEntry, PortfolioItemRecord, Pricing};
pub use resource::{parse_record_id, Collection, ResourceId};
pub use snapshot::{decode_collection, write_snapshot};
pub use store::{find_by_id, CatalogStore};
