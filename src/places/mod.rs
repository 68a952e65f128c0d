//! Places search integration.
//!
//! Turns selected categories and a city into a short, deduplicated list of
//! candidate places from a text-search API.

/// Category-driven multi-query aggregation
pub mod aggregator;
/// HTTP client for the text search endpoint
pub mod api;
/// Loading/result state and stale-run guarding
pub mod session;
/// Data types for search results
pub mod types;

// Re-export key components
pub use aggregator::{PlacesAggregator, SearchRequest};
pub use api::PlacesClient;
pub use session::{SearchSession, SearchTrigger};
pub use types::{Place, PlaceSearch};
