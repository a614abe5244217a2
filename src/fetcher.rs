//! Cache-first fetching of catalog payloads.
//!
//! One fetcher is shared by every view. For a given key it:
//! 1. Serves the cached payload if the cache policy admits one
//! 2. Otherwise issues a single GET to the URL
//! 3. Maps a 4xx response to `NotFound`, and a failed request, a 5xx, or an
//!    unparseable body to `Error`
//! 4. Caches the raw body only after it parsed successfully
//!
//! There is no retry and no de-duplication of concurrent requests for the
//! same cold key.

use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::cache::{CacheLayer, CacheResult, QueryKey};
use crate::catalog::{HttpResponse, HttpTransport};
use crate::error::FetchError;
use crate::query::QueryState;

/// Listing data cache/fetcher.
#[derive(Clone)]
pub struct Fetcher {
  cache: CacheLayer,
  transport: Arc<dyn HttpTransport>,
}

impl Fetcher {
  /// Create a fetcher over an injected cache and transport.
  pub fn new(cache: CacheLayer, transport: impl HttpTransport + 'static) -> Self {
    Self {
      cache,
      transport: Arc::new(transport),
    }
  }

  pub fn cache(&self) -> &CacheLayer {
    &self.cache
  }

  /// Fetch `url` under `key`, reporting where the data came from.
  pub async fn load<K, V, P, E>(
    &self,
    key: &K,
    url: &Url,
    parse: P,
  ) -> Result<CacheResult<V>, FetchError>
  where
    K: QueryKey + Sync + ?Sized,
    P: Fn(&str) -> Result<V, E> + Send,
    E: Display,
  {
    let cache_key = key.cache_key();

    if let Some(entry) = self.cache.lookup(&cache_key) {
      match parse(&entry.payload) {
        Ok(data) => return Ok(CacheResult::from_cache(data, entry.cached_at)),
        Err(e) => {
          warn!(key = %cache_key, error = %e, "cached payload no longer parses, refetching");
        }
      }
    }

    info!(key = %cache_key, %url, "fetching");
    let response = self.transport.get(url).await.map_err(|e| {
      warn!(key = %cache_key, error = %e, "request failed");
      e
    })?;

    let body = response_body(response).map_err(|e| {
      match &e {
        FetchError::NotFound { status } => info!(key = %cache_key, status, "nothing found"),
        _ => warn!(key = %cache_key, error = %e, "server error"),
      }
      e
    })?;

    let data = parse(&body).map_err(|e| {
      warn!(key = %cache_key, error = %e, "response did not parse");
      FetchError::Parse(e.to_string())
    })?;

    self
      .cache
      .store(&cache_key, &key.description(), &body);

    Ok(CacheResult::from_network(data))
  }

  /// Fetch `url` under `key` and fold the outcome into a status.
  pub async fn fetch<K, V, P, E>(&self, key: &K, url: &Url, parse: P) -> QueryState<V>
  where
    K: QueryKey + Sync + ?Sized,
    P: Fn(&str) -> Result<V, E> + Send,
    E: Display,
  {
    let result = self.load(key, url, parse).await;
    if let Ok(loaded) = &result {
      match loaded.cached_at {
        Some(at) => debug!(key = %key.cache_key(), cached_at = %at, "served from cache"),
        None => debug!(key = %key.cache_key(), "served from network"),
      }
    }
    result.map(|r| r.data).into()
  }
}

/// Body of a 2xx response.
///
/// A 5xx means the server broke and is an error like any failed request;
/// every other status means there is nothing under the URL.
fn response_body(response: HttpResponse) -> Result<String, FetchError> {
  match response.status {
    200..=299 => Ok(response.body),
    500..=599 => Err(FetchError::Transport(format!("HTTP {}", response.status))),
    status => Err(FetchError::NotFound { status }),
  }
}
