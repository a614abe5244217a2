//! Path-style routes, as accepted by `--open`.
//!
//! `/`, `/new_cars`, `/used_cars`, `/car_details/{id}` and
//! `/search?searchTerm={term}`.

use url::{form_urlencoded, Url};

const SEARCH_PARAM: &str = "searchTerm";

/// Application pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
  Home,
  NewCars,
  UsedCars,
  CarDetails { id: u64 },
  /// Search results for an already trimmed, non-empty term
  Search { term: String },
}

impl Route {
  /// Search route for raw user input; blank input has no route.
  pub fn search(raw: &str) -> Option<Self> {
    let term = raw.trim();
    (!term.is_empty()).then(|| Self::Search {
      term: term.to_string(),
    })
  }

  /// Parse a path into a route. Unknown paths yield `None`.
  pub fn from_path(path: &str) -> Option<Self> {
    let path = path.trim();
    let path = if path.starts_with('/') {
      path.to_string()
    } else {
      format!("/{}", path)
    };
    let url = Url::parse(&format!("route://app{}", path)).ok()?;

    let segments: Vec<&str> = url
      .path_segments()
      .map(|s| s.filter(|seg| !seg.is_empty()).collect())
      .unwrap_or_default();

    match segments.as_slice() {
      [] => Some(Self::Home),
      ["new_cars"] => Some(Self::NewCars),
      ["used_cars"] => Some(Self::UsedCars),
      ["car_details", id] => id.parse().ok().map(|id| Self::CarDetails { id }),
      ["search"] => url
        .query_pairs()
        .find(|(k, _)| k == SEARCH_PARAM)
        .and_then(|(_, term)| Self::search(&term)),
      _ => None,
    }
  }

  pub fn to_path(&self) -> String {
    match self {
      Self::Home => "/".to_string(),
      Self::NewCars => "/new_cars".to_string(),
      Self::UsedCars => "/used_cars".to_string(),
      Self::CarDetails { id } => format!("/car_details/{}", id),
      Self::Search { term } => {
        let query = form_urlencoded::Serializer::new(String::new())
          .append_pair(SEARCH_PARAM, term)
          .finish();
        format!("/search?{}", query)
      }
    }
  }
}
