//! Cache keys for catalog requests.

use crate::cache::QueryKey;

/// Query key types for catalog API calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogQueryKey {
  /// Every listing (`/cars`)
  AllCars,
  /// A single listing by id (`/cars/{id}`)
  CarDetail { id: u64 },
  /// Server-side search (`/cars?search={term}`)
  Search { term: String },
}

impl CatalogQueryKey {
  /// Build a search key from raw user input.
  ///
  /// The term is trimmed; blank input yields `None`. The same trimmed term
  /// must be used for the request URL so key and response always agree.
  pub fn search(raw: &str) -> Option<Self> {
    let term = raw.trim();
    if term.is_empty() {
      None
    } else {
      Some(Self::Search {
        term: term.to_string(),
      })
    }
  }
}

impl QueryKey for CatalogQueryKey {
  fn cache_key(&self) -> String {
    match self {
      Self::AllCars => "all_cars".to_string(),
      Self::CarDetail { id } => format!("car:{}", id),
      Self::Search { term } => format!("search:{}", term),
    }
  }

  fn description(&self) -> String {
    match self {
      Self::AllCars => "all cars".to_string(),
      Self::CarDetail { id } => format!("car {}", id),
      Self::Search { term } => format!("search \"{}\"", term),
    }
  }
}
