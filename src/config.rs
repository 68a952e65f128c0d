//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use crate::constants::places::{DEFAULT_BASE_URL, DEFAULT_CITIES};
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Places API key the session starts with
    pub places_api_key: String,
    /// Text search endpoint
    pub places_base_url: String,
    /// City selected at startup (may be empty)
    pub city: String,
    /// Cities offered by the city picker
    pub cities: Vec<String>,
    /// HTTP timeout for place searches
    pub request_timeout: Duration,
    /// Delay the simulated sender waits before reporting success
    pub send_delay: Duration,
    /// Where tracing output goes while the terminal is in raw mode
    pub log_path: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            places_api_key: String::new(),
            places_base_url: DEFAULT_BASE_URL.to_string(),
            city: String::new(),
            cities: DEFAULT_CITIES.iter().map(|c| (*c).to_string()).collect(),
            request_timeout: Duration::from_secs(30),
            send_delay: Duration::from_millis(1000),
            log_path: default_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(key) = env::var("PLACES_API_KEY") {
            config.places_api_key = key.trim().to_string();
        }

        if let Ok(url) = env::var("PLACES_BASE_URL") {
            if !url.trim().is_empty() {
                config.places_base_url = url.trim().to_string();
            }
        }

        if let Ok(cities) = env::var("WEEKPLAN_CITIES") {
            let parsed = parse_city_list(&cities);
            if !parsed.is_empty() {
                config.cities = parsed;
            }
        }

        if let Ok(city) = env::var("WEEKPLAN_CITY") {
            config.city = city.trim().to_string();
            // A city given on its own still has to be pickable
            if !config.city.is_empty() && !config.cities.contains(&config.city) {
                config.cities.insert(0, config.city.clone());
            }
        }

        if let Ok(secs) = env::var("REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(ms) = env::var("SEND_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.send_delay = Duration::from_millis(ms);
            }
        }

        if let Ok(path) = env::var("WEEKPLAN_LOG") {
            config.log_path = Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
        }

        Ok(config)
    }

    /// Check if a places API key is configured
    pub fn has_places_api_key(&self) -> bool {
        !self.places_api_key.is_empty()
    }
}

/// Split a comma-separated city list, dropping blanks and repeats.
fn parse_city_list(raw: &str) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for city in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !cities.iter().any(|c| c == city) {
            cities.push(city.to_string());
        }
    }
    cities
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("weekplan").join("weekplan.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_list_trims_and_dedups() {
        let cities = parse_city_list(" Springfield, Shelbyville ,,Springfield ");
        assert_eq!(cities, vec!["Springfield".to_string(), "Shelbyville".to_string()]);
    }

    #[test]
    fn test_default_has_cities_and_no_key() {
        let config = Config::default();
        assert!(!config.cities.is_empty());
        assert!(!config.has_places_api_key());
        assert_eq!(config.app_name(), "weekplan");
    }
}
