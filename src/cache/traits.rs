//! Core traits and types for the caching system.

use chrono::{DateTime, Utc};

/// Something that identifies a cacheable request.
///
/// The key must cover every parameter that changes the response: two requests
/// that can return different payloads must never share a key.
pub trait QueryKey {
  /// Storage key (e.g. `all_cars`, `search:bmw`, `car:7`)
  fn cache_key(&self) -> String;

  /// Human-readable label for logs
  fn description(&self) -> String {
    self.cache_key()
  }
}

impl QueryKey for str {
  fn cache_key(&self) -> String {
    self.to_string()
  }
}

impl QueryKey for String {
  fn cache_key(&self) -> String {
    self.clone()
  }
}

/// Result from a cache-aware fetch.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  pub data: T,
  /// When the served entry was cached; `None` for fresh network data
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh network data.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      cached_at: None,
    }
  }

  /// Create a new cache result from cached data.
  pub fn from_cache(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      cached_at: Some(cached_at),
    }
  }
}

