//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Place search constants.
pub mod places {
    /// Maximum number of merged places kept from one aggregation run.
    pub const MAX_PLACE_RESULTS: usize = 20;

    /// Google Places text search endpoint.
    pub const DEFAULT_BASE_URL: &str =
        "https://maps.googleapis.com/maps/api/place/textsearch/json";

    /// Cities offered when `WEEKPLAN_CITIES` is not set.
    pub const DEFAULT_CITIES: &[&str] = &[
        "New York",
        "Chicago",
        "San Francisco",
        "Austin",
        "Seattle",
        "Boston",
        "Denver",
        "Miami",
    ];
}

/// Itinerary document constants.
pub mod document {
    /// Heading at the top of the shared document.
    pub const TITLE: &str = "My Weekly Itinerary";

    /// Separator between an activity name and its category.
    pub const ENTRY_SEPARATOR: &str = " - ";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}
