//! URL construction for the catalog API.

use color_eyre::{eyre::eyre, Result};
use url::Url;

/// Base URL of the catalog API plus the routes it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
  base: Url,
}

impl CatalogEndpoints {
  /// Parse and validate the API base URL.
  ///
  /// The base may carry a path prefix (`https://host/api`); routes are
  /// appended below it.
  pub fn new(base_url: &str) -> Result<Self> {
    let mut base =
      Url::parse(base_url).map_err(|e| eyre!("Invalid API URL '{}': {}", base_url, e))?;

    if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
      return Err(eyre!(
        "Invalid API URL '{}': expected an http(s) URL",
        base_url
      ));
    }

    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);

    Ok(Self { base })
  }

  /// Host (and port, if any) for display.
  pub fn host(&self) -> String {
    match (self.base.host_str(), self.base.port()) {
      (Some(host), Some(port)) => format!("{}:{}", host, port),
      (Some(host), None) => host.to_string(),
      _ => self.base.to_string(),
    }
  }

  /// `GET /cars`: every listing.
  pub fn all_cars(&self) -> Url {
    self.with_segments(&["cars"])
  }

  /// `GET /cars/{id}`: one listing.
  pub fn car(&self, id: u64) -> Url {
    self.with_segments(&["cars", &id.to_string()])
  }

  /// `GET /cars?search={term}`: server-side search.
  pub fn search(&self, term: &str) -> Url {
    let mut url = self.all_cars();
    url.query_pairs_mut().append_pair("search", term);
    url
  }

  fn with_segments(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    // Validated as a base URL in `new`
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }
}
