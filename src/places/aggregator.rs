//! Category-driven place aggregation.
//!
//! One aggregation run expands the selected categories into provider place
//! types, runs one text search per distinct type, and merges the answers into
//! a single capped list.

use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::places::MAX_PLACE_RESULTS;
use crate::error::Result;
use crate::places::types::{Place, PlaceSearch};
use crate::types::Category;

/// The inputs that define one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Selected categories, in pick order.
    pub categories: Vec<Category>,
    /// City name appended to every query.
    pub city: String,
    /// Caller-supplied API key.
    pub api_key: String,
}

impl SearchRequest {
    /// Build a request, trimming the free-text parts.
    pub fn new(categories: &[Category], city: &str, api_key: &str) -> Self {
        Self {
            categories: categories.to_vec(),
            city: city.trim().to_string(),
            api_key: api_key.trim().to_string(),
        }
    }

    /// A run needs a key, a city, and at least one category.
    pub fn is_searchable(&self) -> bool {
        !self.api_key.is_empty() && !self.city.is_empty() && !self.categories.is_empty()
    }

    /// Distinct place types for the selected categories, first occurrence first.
    pub fn keywords(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.place_types().iter().copied())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Query text sent for one keyword.
    pub fn query_for(&self, keyword: &str) -> String {
        format!("{} in {}", keyword, self.city)
    }
}

/// Runs aggregation against a [`PlaceSearch`] backend.
#[derive(Clone)]
pub struct PlacesAggregator {
    search: Arc<dyn PlaceSearch>,
}

impl PlacesAggregator {
    /// Create an aggregator over `search`.
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Run the aggregation, returning an empty list on any fatal failure.
    ///
    /// Unsearchable requests return immediately without a network call.
    pub async fn run(&self, request: &SearchRequest) -> Vec<Place> {
        match self.try_run(request).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!("Error fetching places in '{}': {}", request.city, e);
                Vec::new()
            }
        }
    }

    /// Run the aggregation, surfacing the first transport failure.
    ///
    /// Keywords run one after another. A keyword the server refuses
    /// contributes nothing; a transport error ends the whole run.
    pub async fn try_run(&self, request: &SearchRequest) -> Result<Vec<Place>> {
        if !request.is_searchable() {
            return Ok(Vec::new());
        }

        let mut all_places = Vec::new();
        for keyword in request.keywords() {
            let query = request.query_for(keyword);
            match self.search.text_search(&query, &request.api_key).await {
                Ok(places) => {
                    tracing::debug!("'{}' returned {} places", query, places.len());
                    all_places.extend(places);
                }
                Err(e) if e.is_transport() => return Err(e),
                Err(e) => tracing::warn!("Skipping '{}': {}", query, e),
            }
        }

        Ok(merge_places(all_places, MAX_PLACE_RESULTS))
    }
}

/// Dedup by place id keeping the first seen entry, then keep at most `limit`.
pub fn merge_places(places: Vec<Place>, limit: usize) -> Vec<Place> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|p| seen.insert(p.place_id.clone()))
        .take(limit)
        .collect()
}
