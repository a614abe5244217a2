//! Cache layer that applies the configured cache policy on top of a store.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::storage::{SessionStore, StoredEntry};

/// How long cached payloads remain usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
  /// Entries never expire while the session lasts
  Session,
  /// Entries older than the given age are treated as misses
  Ttl(Duration),
  /// Nothing is read from or written to the store
  Disabled,
}

/// Cache layer that manages cache policy over a session store.
///
/// Store failures are logged and degrade to a miss (on read) or a skipped
/// write; they never surface to callers.
#[derive(Clone)]
pub struct CacheLayer {
  storage: Arc<dyn SessionStore>,
  policy: CachePolicy,
}

impl CacheLayer {
  /// Create a new cache layer with the given store and policy.
  pub fn new(storage: impl SessionStore + 'static, policy: CachePolicy) -> Self {
    Self {
      storage: Arc::new(storage),
      policy,
    }
  }

  pub fn policy(&self) -> CachePolicy {
    self.policy
  }

  /// Check if an entry written at `cached_at` has outlived the policy.
  fn is_expired(&self, cached_at: DateTime<Utc>) -> bool {
    match self.policy {
      CachePolicy::Session => false,
      CachePolicy::Disabled => true,
      CachePolicy::Ttl(ttl) => (Utc::now() - cached_at)
        .to_std()
        .map(|age| age >= ttl)
        .unwrap_or(false), // written "in the future": clock went backwards, keep it
    }
  }

  /// Look up a usable entry for `key`.
  pub fn lookup(&self, key: &str) -> Option<StoredEntry> {
    if self.policy == CachePolicy::Disabled {
      return None;
    }

    match self.storage.get(key) {
      Ok(Some(entry)) if !self.is_expired(entry.cached_at) => {
        debug!(key, entry = %entry.description, "cache hit");
        Some(entry)
      }
      Ok(_) => None,
      Err(e) => {
        warn!(key, error = %e, "cache read failed, treating as miss");
        None
      }
    }
  }

  /// Store a payload under `key`.
  pub fn store(&self, key: &str, description: &str, payload: &str) {
    if self.policy == CachePolicy::Disabled {
      return;
    }

    if let Err(e) = self.storage.set(key, description, payload) {
      warn!(key, error = %e, "cache write failed");
    }
  }

  /// Number of entries currently held by the store.
  pub fn len(&self) -> usize {
    self.storage.len().unwrap_or(0)
  }
}
