//! `weekplan` - terminal weekly itinerary planner.
//!
//! Collects activities into a Monday-to-Sunday itinerary, suggests nearby
//! places for the selected categories, and shares the finished week.


// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod itinerary;
pub mod places;
pub mod services;
pub mod types;
pub mod ui;
