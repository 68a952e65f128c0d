//! Service modules for extracted functionality.
//!
//! This module contains service abstractions kept out of the main App struct
//! to improve modularity and testability.

pub mod delivery;
pub mod sharing;
