use futures::future::{BoxFuture, FutureExt};
use url::Url;

use crate::cache::QueryKey;
use crate::catalog::{
  parse_listing, parse_vehicle, CatalogEndpoints, CatalogQueryKey, Condition, ListingFilter, Vehicle,
};
use crate::config::DisplayConfig;
use crate::fetcher::Fetcher;
use crate::query::{Query, QueryState};

type Parser<V> = fn(&str) -> serde_json::Result<V>;

/// Everything a view needs to load and present catalog data.
#[derive(Clone)]
pub struct ViewContext {
  fetcher: Fetcher,
  endpoints: CatalogEndpoints,
  display: DisplayConfig,
}

impl ViewContext {
  pub fn new(fetcher: Fetcher, endpoints: CatalogEndpoints, display: DisplayConfig) -> Self {
    Self {
      fetcher,
      endpoints,
      display,
    }
  }

  pub fn fetcher(&self) -> &Fetcher {
    &self.fetcher
  }

  pub fn endpoints(&self) -> &CatalogEndpoints {
    &self.endpoints
  }

  pub fn display(&self) -> &DisplayConfig {
    &self.display
  }

  /// Display predicate for a listing, honoring the incomplete-listing
  /// setting. `None` keeps every condition.
  pub fn listing_filter(&self, condition: Option<Condition>) -> ListingFilter {
    let filter = match condition {
      Some(c) => ListingFilter::condition(c),
      None => ListingFilter::all(),
    };
    filter.with_incomplete(self.display.incomplete_listings)
  }

  /// Every listing, started.
  pub fn all_cars_query(&self) -> Query<Vec<Vehicle>> {
    self.start(CatalogQueryKey::AllCars, parse_listing)
  }

  /// One listing, started.
  pub fn car_query(&self, id: u64) -> Query<Vehicle> {
    self.start(CatalogQueryKey::CarDetail { id }, parse_vehicle)
  }

  /// Search results for `term`, started. Blank terms have no query.
  pub fn search_query(&self, term: &str) -> Option<Query<Vec<Vehicle>>> {
    CatalogQueryKey::search(term).map(|key| self.start(key, parse_listing))
  }

  /// Point an existing search query at `term`. Returns `false` for blank
  /// terms, leaving the query untouched.
  pub fn retarget_search(&self, query: &mut Query<Vec<Vehicle>>, term: &str) -> bool {
    let Some(key) = CatalogQueryKey::search(term) else {
      return false;
    };
    query.retarget(key.cache_key(), self.request(key, parse_listing));
    true
  }

  fn url_for(&self, key: &CatalogQueryKey) -> Url {
    match key {
      CatalogQueryKey::AllCars => self.endpoints.all_cars(),
      CatalogQueryKey::CarDetail { id } => self.endpoints.car(*id),
      CatalogQueryKey::Search { term } => self.endpoints.search(term),
    }
  }

  fn start<V>(&self, key: CatalogQueryKey, parse: Parser<V>) -> Query<V>
  where
    V: Send + 'static,
  {
    let mut query = Query::new(key.cache_key(), self.request(key, parse));
    query.fetch();
    query
  }

  fn request<V>(
    &self,
    key: CatalogQueryKey,
    parse: Parser<V>,
  ) -> impl Fn() -> BoxFuture<'static, QueryState<V>> + Send + Sync + 'static
  where
    V: Send + 'static,
  {
    let fetcher = self.fetcher.clone();
    let url = self.url_for(&key);
    move || {
      let fetcher = fetcher.clone();
      let key = key.clone();
      let url = url.clone();
      async move { fetcher.fetch(&key, &url, parse).await }.boxed()
    }
  }
}
