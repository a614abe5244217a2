//! Vehicle records as served by the catalog API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Whether a vehicle is sold new or pre-owned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Condition {
  New,
  Used,
  /// Anything else the API sends; belongs to neither listing
  #[default]
  #[serde(other)]
  Other,
}

impl Condition {
  pub fn label(&self) -> &'static str {
    match self {
      Condition::New => "New",
      Condition::Used => "Used",
      Condition::Other => "Other",
    }
  }
}

/// A single car listing.
///
/// The API is trusted as-is. Absent, `null` or wrongly typed fields fall
/// back to empty values so a sparse or sloppy record still renders; only a
/// usable `id` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
  pub id: u64,
  #[serde(default, deserialize_with = "lenient")]
  pub name: String,
  #[serde(default, deserialize_with = "lenient")]
  pub description: String,
  #[serde(default, deserialize_with = "lenient")]
  pub price: Option<f64>,
  #[serde(default, deserialize_with = "lenient")]
  pub brand: String,
  #[serde(default, deserialize_with = "lenient")]
  pub year: Option<i32>,
  #[serde(default, deserialize_with = "lenient")]
  pub condition: Condition,
  #[serde(default, deserialize_with = "lenient")]
  pub transmission: String,
  #[serde(default, deserialize_with = "lenient")]
  pub fuel: String,
  #[serde(default, deserialize_with = "lenient")]
  pub engine: String,
  #[serde(default, deserialize_with = "lenient")]
  pub mileage: Option<u64>,
  /// "Available" or "Sold"
  #[serde(default, deserialize_with = "lenient")]
  pub availability: String,
  #[serde(default, deserialize_with = "lenient")]
  pub location: String,
  #[serde(default, deserialize_with = "lenient")]
  pub color: String,
  /// Image URLs, cover image first
  #[serde(default, deserialize_with = "lenient")]
  pub images: Vec<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub features: Vec<String>,
}

impl Vehicle {
  /// URL of the cover image, if the listing has any.
  pub fn cover_image(&self) -> Option<&str> {
    self.images.first().map(String::as_str)
  }

  /// Whether the listing carries everything a list card shows.
  pub fn is_complete(&self) -> bool {
    self.price.is_some() && !self.images.is_empty()
  }
}

/// Read a field without ever failing the record.
///
/// `null` and values of the wrong type become the default. Numbers sent as
/// strings (`"2019"`) are still read as numbers.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  if let Value::String(s) = &value {
    if let Ok(parsed) = serde_json::from_str::<T>(s.trim()) {
      return Ok(parsed);
    }
  }
  Ok(T::deserialize(value).unwrap_or_default())
}

/// Parse a `/cars` or search body.
///
/// The body must be a JSON array. Records that cannot be read at all (no
/// usable `id`) are logged and skipped so one bad listing never hides the
/// rest.
pub fn parse_listing(body: &str) -> serde_json::Result<Vec<Vehicle>> {
  let records: Vec<Value> = serde_json::from_str(body)?;
  Ok(
    records
      .into_iter()
      .enumerate()
      .filter_map(|(index, record)| match Vehicle::deserialize(record) {
        Ok(vehicle) => Some(vehicle),
        Err(e) => {
          warn!(index, error = %e, "skipping unreadable listing");
          None
        }
      })
      .collect(),
  )
}

/// Parse a `/cars/{id}` body.
pub fn parse_vehicle(body: &str) -> serde_json::Result<Vehicle> {
  serde_json::from_str(body)
}
