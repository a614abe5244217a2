//! Catalog API: vehicle model, routes, cache keys, and transport.

mod cache;
mod endpoints;
mod listing;
mod transport;
mod types;

pub use cache::CatalogQueryKey;
pub use endpoints::CatalogEndpoints;
pub use listing::{IncompleteListings, ListingFilter};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{parse_listing, parse_vehicle, Condition, Vehicle};
