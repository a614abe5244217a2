//! Session-scoped caching of fetched payloads.
//!
//! This module is catalog-agnostic:
//! - Stores raw response bodies under string keys
//! - Applies an explicit expiry policy (session / TTL / disabled)
//! - Degrades store failures to cache misses

mod layer;
mod storage;
mod traits;

pub use layer::{CacheLayer, CachePolicy};
pub use storage::SqliteStore;
pub use traits::{CacheResult, QueryKey};
