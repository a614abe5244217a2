//! Client-side display predicates applied to fetched listings.

use serde::Deserialize;

use super::types::{Condition, Vehicle};

/// What list views do with listings that lack a price or photos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncompleteListings {
  /// Keep them and render placeholders
  #[default]
  Show,
  /// Leave them out of list views
  Hide,
}

/// Selects which listings a view shows, in server order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
  condition: Option<Condition>,
  incomplete: IncompleteListings,
  limit: Option<usize>,
}

impl ListingFilter {
  /// Everything, unfiltered (search results).
  pub fn all() -> Self {
    Self::default()
  }

  /// Only listings in `condition`.
  pub fn condition(condition: Condition) -> Self {
    Self {
      condition: Some(condition),
      ..Self::default()
    }
  }

  pub fn with_incomplete(mut self, incomplete: IncompleteListings) -> Self {
    self.incomplete = incomplete;
    self
  }

  /// Keep at most `limit` listings (home page previews).
  pub fn with_limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  fn matches(&self, vehicle: &Vehicle) -> bool {
    let condition_ok = self.condition.map_or(true, |c| vehicle.condition == c);
    let complete_ok = self.incomplete == IncompleteListings::Show || vehicle.is_complete();
    condition_ok && complete_ok
  }

  pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
    vehicles
      .iter()
      .filter(|v| self.matches(v))
      .take(self.limit.unwrap_or(usize::MAX))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn car(id: u64, condition: Condition, price: Option<f64>) -> Vehicle {
    Vehicle {
      id,
      name: format!("Car {}", id),
      description: String::new(),
      price,
      brand: String::new(),
      year: None,
      condition,
      transmission: String::new(),
      fuel: String::new(),
      engine: String::new(),
      mileage: None,
      availability: String::new(),
      location: String::new(),
      color: String::new(),
      images: vec![format!("https://img/{}.jpg", id)],
      features: Vec::new(),
    }
  }

  fn ids(vehicles: &[&Vehicle]) -> Vec<u64> {
    vehicles.iter().map(|v| v.id).collect()
  }

  #[test]
  fn test_condition_filter() {
    let cars = vec![
      car(1, Condition::New, Some(20000.0)),
      car(2, Condition::Used, Some(9000.0)),
    ];
    assert_eq!(ids(&ListingFilter::condition(Condition::New).apply(&cars)), vec![1]);
    assert_eq!(ids(&ListingFilter::condition(Condition::Used).apply(&cars)), vec![2]);
  }

  #[test]
  fn test_new_and_used_partition_the_listing() {
    let cars: Vec<Vehicle> = (1..=20)
      .map(|id| {
        let condition = if id % 3 == 0 {
          Condition::Used
        } else {
          Condition::New
        };
        car(id, condition, Some(1000.0 * id as f64))
      })
      .collect();

    let new = ids(&ListingFilter::condition(Condition::New).apply(&cars));
    let used = ids(&ListingFilter::condition(Condition::Used).apply(&cars));

    assert!(new.iter().all(|id| !used.contains(id)));
    let mut union: Vec<u64> = new.iter().chain(used.iter()).copied().collect();
    union.sort_unstable();
    assert_eq!(union, (1..=20).collect::<Vec<_>>());
  }

  #[test]
  fn test_other_condition_is_in_neither_partition() {
    let cars = vec![car(1, Condition::Other, Some(1.0))];
    assert!(ListingFilter::condition(Condition::New).apply(&cars).is_empty());
    assert!(ListingFilter::condition(Condition::Used).apply(&cars).is_empty());
    assert_eq!(ListingFilter::all().apply(&cars).len(), 1);
  }

  #[test]
  fn test_limit_keeps_server_order() {
    let cars: Vec<Vehicle> = (1..=5)
      .map(|id| car(id, Condition::New, Some(1.0)))
      .collect();
    let preview = ListingFilter::condition(Condition::New).with_limit(3).apply(&cars);
    assert_eq!(ids(&preview), vec![1, 2, 3]);
  }

  #[test]
  fn test_limit_applies_after_condition() {
    let cars = vec![
      car(1, Condition::Used, Some(1.0)),
      car(2, Condition::New, Some(1.0)),
      car(3, Condition::Used, Some(1.0)),
      car(4, Condition::New, Some(1.0)),
    ];
    let preview = ListingFilter::condition(Condition::New).with_limit(3).apply(&cars);
    assert_eq!(ids(&preview), vec![2, 4]);
  }

  #[test]
  fn test_hide_incomplete_listings() {
    let mut no_photos = car(3, Condition::New, Some(5.0));
    no_photos.images.clear();
    let cars = vec![
      car(1, Condition::New, Some(5.0)),
      car(2, Condition::New, None),
      no_photos,
    ];

    let shown = ListingFilter::condition(Condition::New).apply(&cars);
    assert_eq!(ids(&shown), vec![1, 2, 3]);

    let hidden = ListingFilter::condition(Condition::New)
      .with_incomplete(IncompleteListings::Hide)
      .apply(&cars);
    assert_eq!(ids(&hidden), vec![1]);
  }
}
