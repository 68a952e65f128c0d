use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::places::types::{Place, PlaceSearch};
use crate::types::PlaceId;

/// Client for the places text search endpoint
///
/// Holds no credentials of its own: the key is supplied per query because
/// the user can change it while the app runs.
#[derive(Clone)]
pub struct PlacesClient {
    base_url: String,
    client: Client,
}

impl PlacesClient {
    /// Create a new places client from config
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.places_base_url.clone(),
            client: Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Endpoint this client queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn text_search(&self, query: &str, api_key: &str) -> Result<Vec<Place>> {
        let resp = self.client
            .get(&self.base_url)
            .query(&[("query", query), ("key", api_key)])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Search for '{}' failed: {}", query, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::places_status(
                format!("Search for '{}' returned {}", query, status),
                status.as_u16(),
            ));
        }

        let json: Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON for '{}': {}", query, e), None))?;

        Ok(parse_results(query, &json))
    }
}

/// Pull places out of a text search body, skipping entries without an id or name
pub(crate) fn parse_results(query: &str, json: &Value) -> Vec<Place> {
    let Some(results) = json["results"].as_array() else {
        // 200 with a provider-level refusal (REQUEST_DENIED, OVER_QUERY_LIMIT, ...)
        if let Some(status) = json["status"].as_str() {
            tracing::warn!(
                "Search for '{}' answered {}: {}",
                query,
                status,
                json["error_message"].as_str().unwrap_or("no detail")
            );
        }
        return Vec::new();
    };

    if results.is_empty() {
        if let Some(message) = json["error_message"].as_str() {
            tracing::warn!("Search for '{}' returned no results: {}", query, message);
        }
    }

    results.iter().filter_map(|r| {
        let place_id = PlaceId::new(r["place_id"].as_str()?);
        let name = r["name"].as_str()?.to_string();
        let vicinity = r["vicinity"].as_str()
            .or_else(|| r["formatted_address"].as_str())
            .unwrap_or("")
            .to_string();

        Some(Place {
            place_id,
            name,
            vicinity,
            rating: r["rating"].as_f64(),
            user_ratings_total: r["user_ratings_total"].as_u64(),
        })
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_results_prefers_vicinity() {
        let body = json!({
            "results": [
                { "place_id": "a", "name": "Alpha", "vicinity": "1 Main St", "formatted_address": "1 Main St, Town", "rating": 4.5, "user_ratings_total": 120 },
                { "place_id": "b", "name": "Beta", "formatted_address": "2 Side St, Town" },
            ],
            "status": "OK"
        });

        let places = parse_results("restaurant in Town", &body);
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].vicinity, "1 Main St");
        assert_eq!(places[0].rating, Some(4.5));
        assert_eq!(places[0].user_ratings_total, Some(120));
        assert_eq!(places[1].vicinity, "2 Side St, Town");
        assert_eq!(places[1].rating, None);
    }

    #[test]
    fn test_parse_results_skips_malformed_entries() {
        let body = json!({ "results": [ { "name": "No id" }, { "place_id": "x" }, { "place_id": "ok", "name": "Fine" } ] });
        let places = parse_results("gym in Town", &body);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id.as_str(), "ok");
    }

    #[test]
    fn test_parse_results_provider_refusal_is_empty() {
        let body = json!({ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." });
        assert!(parse_results("cafe in Town", &body).is_empty());
    }
}
