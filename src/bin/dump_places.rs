//! Run a places search from the command line and print the merged results.
//!
//! Usage: cargo run --bin dump_places [-- --city Austin --category food --category golf]

use std::sync::Arc;

use anyhow::{bail, Context};
use weekplan::config::Config;
use weekplan::places::{PlacesAggregator, PlacesClient, SearchRequest};
use weekplan::types::Category;

fn arg_values(name: &str) -> Vec<String> {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2)
        .filter(|pair| pair[0] == name)
        .map(|pair| pair[1].clone())
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    if !config.has_places_api_key() {
        bail!("PLACES_API_KEY is not set");
    }

    let city = arg_values("--city").pop().unwrap_or_else(|| config.city.clone());
    let mut categories = Vec::new();
    for id in arg_values("--category") {
        match Category::from_id(&id) {
            Some(category) => categories.push(category),
            None => bail!(
                "Unknown category '{id}' (expected one of: {})",
                Category::all().iter().map(|c| c.id()).collect::<Vec<_>>().join(", ")
            ),
        }
    }
    if categories.is_empty() {
        categories.push(Category::Food);
    }

    let request = SearchRequest::new(&categories, &city, &config.places_api_key);
    if !request.is_searchable() {
        bail!("Nothing to search: pass --city or set WEEKPLAN_CITY");
    }

    println!("=== Queries ===");
    for keyword in request.keywords() {
        println!("  {}", request.query_for(keyword));
    }

    let aggregator = PlacesAggregator::new(Arc::new(PlacesClient::new(&config)));
    let places = aggregator.try_run(&request).await.context("Search failed")?;

    println!("\n=== Places ({}) ===", places.len());
    for place in &places {
        let rating = place.rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!("  {} | {} | {} | {}", place.place_id.as_str(), place.name, rating, place.vicinity);
    }

    Ok(())
}
