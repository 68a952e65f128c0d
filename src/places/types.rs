//! Places data types.
//!
//! These types represent the data returned by the text search API and the
//! transport seam the aggregator is written against.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PlaceId;

/// A suggestion from the places provider. Never stored in the itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Provider identifier, used for dedup across keywords
    pub place_id: PlaceId,
    /// Display name; the only part copied into an activity
    pub name: String,
    /// `vicinity`, or `formatted_address` when the provider omits it
    pub vicinity: String,
    /// Average rating, if the provider has one
    pub rating: Option<f64>,
    /// Number of ratings behind `rating`
    pub user_ratings_total: Option<u64>,
}

/// Anything that can run one free-text place query.
///
/// A server refusal comes back as [`Error::Places`](crate::error::Error::Places);
/// anything for which [`is_transport`](crate::error::Error::is_transport) holds
/// means the transport failed outright and the aggregation run should stop.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Run `query` authenticated with `api_key`.
    async fn text_search(&self, query: &str, api_key: &str) -> Result<Vec<Place>>;
}
