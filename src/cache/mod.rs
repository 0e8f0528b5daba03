//! Session-scoped query cache over a catalog source.
//!
//! - Results are cached per logical resource and never go stale
//! - Concurrent lookups of the same resource share one fetch
//! - Failures are not cached and nothing is retried automatically
//! - `Unauthorized` either propagates or becomes an absent value

mod layer;
mod result;

pub use layer::QueryCache;
pub use result::UnauthorizedBehavior;
