//! Live search against the configured places endpoint.

// Only runs when integration tests are explicitly enabled
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Instant;

use weekplan::config::Config;
use weekplan::places::{PlacesAggregator, PlacesClient, SearchRequest};
use weekplan::types::Category;

// Helper function to set up the client for tests
fn setup() -> Option<(Config, PlacesAggregator)> {
    match Config::load() {
        Ok(config) => {
            if config.has_places_api_key() {
                let aggregator = PlacesAggregator::new(Arc::new(PlacesClient::new(&config)));
                Some((config, aggregator))
            } else {
                println!(r#"Skipping integration test: PLACES_API_KEY not found in environment/".env" file."#);
                None
            }
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {e}");
            None
        }
    }
}

#[tokio::test]
async fn test_live_food_search() {
    if let Some((config, aggregator)) = setup() {
        let city = if config.city.is_empty() { "Chicago".to_string() } else { config.city.clone() };
        let request = SearchRequest::new(&[Category::Food, Category::Cafe], &city, &config.places_api_key);

        let start = Instant::now();
        let places = aggregator.try_run(&request).await.expect("live search");
        println!("Fetched {} places in {:?}", places.len(), start.elapsed());

        assert!(!places.is_empty(), "Expected at least one place in {city}");
        assert!(places.len() <= 20);
    }
    // If setup returned None, the test implicitly passes by being skipped.
}
