//! Session store trait and its SQLite implementation.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// A payload stored under a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
  /// Human-readable label of the request that produced the payload
  pub description: String,
  /// Raw response body, exactly as received
  pub payload: String,
  /// When the entry was written
  pub cached_at: DateTime<Utc>,
}

/// String-keyed, string-valued store scoped to one browsing session.
pub trait SessionStore: Send + Sync {
  /// Read the entry stored under `key`.
  fn get(&self, key: &str) -> Result<Option<StoredEntry>>;

  /// Write `payload` under `key`, replacing any previous entry.
  fn set(&self, key: &str, description: &str, payload: &str) -> Result<()>;

  /// Number of stored entries.
  fn len(&self) -> Result<usize>;
}

/// SQLite-backed session store.
///
/// The database lives in memory, so its contents vanish with the process:
/// one run of the app is one session.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open a fresh, empty in-memory session store.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open session cache database: {}", e))?;

    let store = Self {
      conn: Mutex::new(conn),
    };
    store.run_migrations()?;

    Ok(store)
  }

  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(SESSION_SCHEMA)
      .map_err(|e| eyre!("Failed to create session cache tables: {}", e))?;

    Ok(())
  }
}

const SESSION_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS session_cache (
    cache_key TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    payload TEXT NOT NULL,
    cached_at TEXT NOT NULL
);
"#;

impl SessionStore for SqliteStore {
  fn get(&self, key: &str) -> Result<Option<StoredEntry>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let row: Option<(String, String, String)> = conn
      .query_row(
        "SELECT description, payload, cached_at FROM session_cache WHERE cache_key = ?",
        params![key],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read cache entry '{}': {}", key, e))?;

    match row {
      Some((description, payload, cached_at)) => Ok(Some(StoredEntry {
        description,
        payload,
        cached_at: parse_datetime(&cached_at)?,
      })),
      None => Ok(None),
    }
  }

  fn set(&self, key: &str, description: &str, payload: &str) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO session_cache (cache_key, description, payload, cached_at)
         VALUES (?, ?, ?, ?)",
        params![key, description, payload, Utc::now().to_rfc3339()],
      )
      .map_err(|e| eyre!("Failed to store cache entry '{}': {}", key, e))?;

    Ok(())
  }

  fn len(&self) -> Result<usize> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let count: i64 = conn
      .query_row("SELECT COUNT(*) FROM session_cache", [], |row| row.get(0))
      .map_err(|e| eyre!("Failed to count cache entries: {}", e))?;

    Ok(count as usize)
  }
}

/// Parse a stored RFC 3339 timestamp.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_missing_key() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("all_cars").unwrap(), None);
    assert_eq!(store.len().unwrap(), 0);
  }

  #[test]
  fn test_set_then_get_returns_exact_payload() {
    let store = SqliteStore::open_in_memory().unwrap();
    let body = r#"[{"id":1,"condition":"New"}]"#;
    store.set("all_cars", "all cars", body).unwrap();

    let entry = store.get("all_cars").unwrap().unwrap();
    assert_eq!(entry.payload, body);
    assert_eq!(entry.description, "all cars");
    assert_eq!(store.len().unwrap(), 1);
  }

  #[test]
  fn test_keys_are_isolated() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("search:bmw", "search bmw", "[1]").unwrap();
    store.set("search:audi", "search audi", "[2]").unwrap();

    assert_eq!(store.get("search:bmw").unwrap().unwrap().payload, "[1]");
    assert_eq!(store.get("search:audi").unwrap().unwrap().payload, "[2]");
    assert_eq!(store.get("search:").unwrap(), None);
  }

  #[test]
  fn test_set_replaces_existing_entry() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("car:1", "car 1", "old").unwrap();
    store.set("car:1", "car 1", "new").unwrap();

    assert_eq!(store.get("car:1").unwrap().unwrap().payload, "new");
    assert_eq!(store.len().unwrap(), 1);
  }

  #[test]
  fn test_separate_stores_do_not_share_entries() {
    let first = SqliteStore::open_in_memory().unwrap();
    let second = SqliteStore::open_in_memory().unwrap();
    first.set("all_cars", "all cars", "[]").unwrap();

    assert_eq!(second.get("all_cars").unwrap(), None);
  }
}
