//! Async query abstraction for view-owned data fetching.
//!
//! Inspired by TanStack Query, this module provides a `Query<T>` type that
//! encapsulates one keyed request, its lifecycle status, and the guard that
//! keeps late results from landing on a view that has moved on.
//!
//! # Example
//!
//! ```ignore
//! let fetcher = fetcher.clone();
//! let key = CatalogQueryKey::AllCars;
//! let url = endpoints.all_cars();
//! let mut query = Query::new(key.cache_key(), move || {
//!     let fetcher = fetcher.clone();
//!     let (key, url) = (key.clone(), url.clone());
//!     async move { fetcher.fetch(&key, &url, parse_listing).await }
//! });
//!
//! // Start fetching
//! query.fetch();
//!
//! // In event loop tick
//! if query.poll() {
//!     // State changed, trigger re-render
//! }
//!
//! // In render
//! match query.state() {
//!     QueryState::Loading => render_spinner(),
//!     QueryState::Success(cars) => render_cars(cars),
//!     QueryState::NotFound => render_no_results(),
//!     QueryState::Error(e) => render_error(e),
//!     QueryState::Idle => {}
//! }
//! ```

use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::FetchError;

/// The state of a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
  /// Query has not been started
  Idle,
  /// Query is currently fetching data
  Loading,
  /// Query completed successfully
  Success(T),
  /// Query failed with an error
  Error(String),
  /// The API has nothing under this key
  NotFound,
}

impl<T> QueryState<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn data(&self) -> Option<&T> {
    match self {
      QueryState::Success(data) => Some(data),
      _ => None,
    }
  }
}

impl<T> From<Result<T, FetchError>> for QueryState<T> {
  fn from(result: Result<T, FetchError>) -> Self {
    match result {
      Ok(data) => QueryState::Success(data),
      Err(e) if e.is_not_found() => QueryState::NotFound,
      Err(e) => QueryState::Error(e.to_string()),
    }
  }
}

/// A factory function that creates futures for fetching data
type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<'static, QueryState<T>> + Send + Sync>;

/// Async query for data fetching with state management.
///
/// Query<T> encapsulates:
/// - The request key and the fetching logic (via a closure)
/// - Loading/success/error/not-found states
/// - Async result handling via a oneshot channel
/// - Cancellation of the in-flight task on refetch, retarget, or drop
pub struct Query<T> {
  key: String,
  state: QueryState<T>,
  fetcher: FetcherFn<T>,
  receiver: Option<oneshot::Receiver<QueryState<T>>>,
  task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a new query for `key` with the given fetcher function.
  ///
  /// The fetcher is a closure that returns a future. It will be called
  /// each time `fetch()` or `refetch()` is invoked.
  pub fn new<F, Fut>(key: impl Into<String>, fetcher: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = QueryState<T>> + Send + 'static,
  {
    Self {
      key: key.into(),
      state: QueryState::Idle,
      fetcher: Box::new(move || Box::pin(fetcher())),
      receiver: None,
      task: None,
    }
  }

  /// Get the current state of the query.
  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  /// Get the data if the query succeeded.
  pub fn data(&self) -> Option<&T> {
    self.state.data()
  }

  /// Start fetching data if not already loading.
  ///
  /// This is a no-op if the query is already loading.
  pub fn fetch(&mut self) {
    if self.state.is_loading() {
      return;
    }
    self.start_fetch();
  }

  /// Force a refetch, even if already loading or data exists.
  pub fn refetch(&mut self) {
    self.cancel();
    self.start_fetch();
  }

  /// Point the query at a different key and start fetching it.
  ///
  /// Any request still in flight for the old key is aborted, and its result
  /// is discarded even if it was already sent.
  pub fn retarget<F, Fut>(&mut self, key: impl Into<String>, fetcher: F)
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = QueryState<T>> + Send + 'static,
  {
    self.cancel();
    self.key = key.into();
    self.fetcher = Box::new(move || Box::pin(fetcher()));
    self.start_fetch();
  }

  /// Poll for results from a pending fetch.
  ///
  /// Returns `true` if the state changed (data arrived or error occurred).
  /// Call this in your event loop tick handler.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(state) => {
        self.state = state;
        self.receiver = None;
        self.task = None;
        true
      }
      Err(oneshot::error::TryRecvError::Empty) => false,
      Err(oneshot::error::TryRecvError::Closed) => {
        // Task ended without sending: it panicked, since cancel() drops the
        // receiver before aborting
        self.state = QueryState::Error("Request failed unexpectedly".to_string());
        self.receiver = None;
        self.task = None;
        true
      }
    }
  }

  /// Drop the pending receiver and abort the task feeding it.
  fn cancel(&mut self) {
    self.receiver = None;
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }

  fn start_fetch(&mut self) {
    let (tx, rx) = oneshot::channel();
    self.receiver = Some(rx);
    self.state = QueryState::Loading;

    let future = (self.fetcher)();
    self.task = Some(tokio::spawn(async move {
      // Ignore send errors - receiver may have been dropped
      let _ = tx.send(future.await);
    }));
  }
}

impl<T> Drop for Query<T> {
  fn drop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("key", &self.key)
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::sync::Arc;
  use std::time::Duration;

  #[tokio::test]
  async fn test_query_success() {
    let mut query = Query::new("numbers", || async { QueryState::Success(vec![1, 2, 3]) });

    assert!(matches!(query.state(), QueryState::Idle));

    query.fetch();
    assert!(query.state().is_loading());

    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(query.data(), Some(&vec![1, 2, 3]));
    // Terminal state is reported once
    assert!(!query.poll());
  }

  #[tokio::test]
  async fn test_query_error() {
    let mut query: Query<i32> = Query::new("broken", || async {
      QueryState::Error("Something went wrong".to_string())
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(
      query.state(),
      &QueryState::Error("Something went wrong".to_string())
    );
  }

  #[tokio::test]
  async fn test_query_not_found() {
    let mut query: Query<i32> = Query::new("search:zzz", || async {
      QueryState::<i32>::from(Err(FetchError::NotFound { status: 404 }))
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(query.state(), &QueryState::NotFound);
  }

  #[tokio::test]
  async fn test_panicking_request_becomes_error() {
    let mut query: Query<i32> = Query::new("car:1", || async {
      if true {
        panic!("decoder blew up");
      }
      QueryState::Success(1)
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(
      query.state(),
      &QueryState::Error("Request failed unexpectedly".to_string())
    );
  }

  #[tokio::test]
  async fn test_fetch_while_loading_is_noop() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();
    let mut query = Query::new("slow", move || {
      let counter = counter_clone.clone();
      async move {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        QueryState::Success(42)
      }
    });

    query.fetch();
    query.fetch();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(query.state().is_loading());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_refetch_cancels_pending() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let mut query = Query::new("counter", move || {
      let counter = counter_clone.clone();
      async move {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        QueryState::Success(n)
      }
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Refetch should cancel the first and start a new one
    query.refetch();
    tokio::time::sleep(Duration::from_millis(100)).await;

    query.poll();
    // Only the second fetch should have completed and been received
    assert_eq!(query.data(), Some(&1));
  }

  #[tokio::test]
  async fn test_retarget_ignores_late_result_for_old_key() {
    let mut query = Query::new("search:bmw", || async {
      tokio::time::sleep(Duration::from_millis(80)).await;
      QueryState::Success("bmw results".to_string())
    });
    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    query.retarget("search:audi", || async {
      QueryState::Success("audi results".to_string())
    });
    assert!(query.state().is_loading());

    // Long enough for both requests to have finished
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(query.poll());
    assert_eq!(query.data().map(String::as_str), Some("audi results"));
    assert!(!query.poll());
    assert_eq!(query.data().map(String::as_str), Some("audi results"));
  }

  #[tokio::test]
  async fn test_retarget_after_completion_resets_to_loading() {
    let mut query = Query::new("car:1", || async { QueryState::Success(1) });
    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;
    query.poll();
    assert_eq!(query.data(), Some(&1));

    query.retarget("car:2", || async {
      tokio::time::sleep(Duration::from_millis(50)).await;
      QueryState::Success(2)
    });
    assert!(query.state().is_loading());
    assert_eq!(query.data(), None);
  }

  #[tokio::test]
  async fn test_drop_aborts_in_flight_task() {
    let finished = Arc::new(AtomicU32::new(0));
    let finished_clone = finished.clone();
    let mut query = Query::new("slow", move || {
      let finished = finished_clone.clone();
      async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        finished.fetch_add(1, Ordering::SeqCst);
        QueryState::Success(())
      }
    });

    query.fetch();
    drop(query);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(finished.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn test_state_from_result() {
    let ok = QueryState::<u8>::from(Ok(7));
    assert_eq!(ok, QueryState::Success(7));

    let missing = QueryState::<u8>::from(Err(FetchError::NotFound { status: 404 }));
    assert_eq!(missing, QueryState::NotFound);

    let broken = QueryState::<u8>::from(Err(FetchError::Transport("refused".into())));
    assert_eq!(
      broken,
      QueryState::Error("Network error: refused".to_string())
    );
  }
}
