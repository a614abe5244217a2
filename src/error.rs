//! Error taxonomy for catalog requests.

use thiserror::Error;

/// Errors produced while fetching catalog data.
///
/// These never reach the UI as-is: the fetcher folds them into a
/// [`QueryState`](crate::query::QueryState) so views only ever see a status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
  /// The API answered with a non-success status (404 for an unknown search
  /// term or vehicle id).
  #[error("Not found (HTTP {status})")]
  NotFound { status: u16 },

  /// The request never produced a response: connection failure, TLS error,
  /// timeout.
  #[error("Network error: {0}")]
  Transport(String),

  /// The response body could not be read as the expected JSON shape.
  #[error("Malformed response: {0}")]
  Parse(String),
}

impl FetchError {
  /// Whether this error means "nothing there" rather than "something broke".
  pub fn is_not_found(&self) -> bool {
    matches!(self, FetchError::NotFound { .. })
  }
}

impl From<reqwest::Error> for FetchError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      FetchError::Transport("request timed out".to_string())
    } else {
      FetchError::Transport(err.to_string())
    }
  }
}
