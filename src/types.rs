//! Core type definitions for compile-time safety.
//!
//! Weekdays and interest categories are closed sets, so they are enums rather
//! than the free-form strings a form would hand around. Identifiers get
//! newtype wrappers to keep activity and place ids from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A day of the week, in the planner's fixed Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Day {
    /// Monday.
    #[default]
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// Returns all days in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Returns the canonical label of this day.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Position in the week, Monday = 0.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Next day, wrapping Sunday back to Monday.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Monday => Self::Tuesday,
            Self::Tuesday => Self::Wednesday,
            Self::Wednesday => Self::Thursday,
            Self::Thursday => Self::Friday,
            Self::Friday => Self::Saturday,
            Self::Saturday => Self::Sunday,
            Self::Sunday => Self::Monday,
        }
    }

    /// Previous day, wrapping Monday back to Sunday.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Monday => Self::Sunday,
            Self::Tuesday => Self::Monday,
            Self::Wednesday => Self::Tuesday,
            Self::Thursday => Self::Wednesday,
            Self::Friday => Self::Thursday,
            Self::Saturday => Self::Friday,
            Self::Sunday => Self::Saturday,
        }
    }

    /// Parse a day from its label or a three-letter prefix, ignoring case.
    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        if needle.len() < 3 {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|d| d.name().to_lowercase().starts_with(&needle))
    }

    /// The current local weekday.
    pub fn today() -> Self {
        use chrono::Datelike;
        chrono::Local::now().weekday().into()
    }
}

impl From<chrono::Weekday> for Day {
    fn from(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interest category. Drives both itinerary labelling and place search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Restaurants.
    Food,
    /// Nightlife, cinemas, amusement parks.
    Entertainment,
    /// Bowling alleys.
    Bowling,
    /// Golf courses.
    Golf,
    /// Coffee shops.
    Cafe,
    /// Cinemas.
    Movies,
    /// Gyms.
    Fitness,
    /// Malls and stores.
    Shopping,
}

impl Category {
    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Entertainment,
            Self::Bowling,
            Self::Golf,
            Self::Cafe,
            Self::Movies,
            Self::Fitness,
            Self::Shopping,
        ]
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Entertainment => "entertainment",
            Self::Bowling => "bowling",
            Self::Golf => "golf",
            Self::Cafe => "cafe",
            Self::Movies => "movies",
            Self::Fitness => "fitness",
            Self::Shopping => "shopping",
        }
    }

    /// Human-readable name, as recorded on activities.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Entertainment => "Entertainment",
            Self::Bowling => "Bowling",
            Self::Golf => "Golf",
            Self::Cafe => "Cafés",
            Self::Movies => "Movies",
            Self::Fitness => "Fitness",
            Self::Shopping => "Shopping",
        }
    }

    /// Place types the search provider understands for this category.
    #[must_use]
    pub const fn place_types(self) -> &'static [&'static str] {
        match self {
            Self::Food => &["restaurant"],
            Self::Entertainment => &["night_club", "movie_theater", "amusement_park"],
            Self::Bowling => &["bowling_alley"],
            Self::Golf => &["golf_course"],
            Self::Cafe => &["cafe"],
            Self::Movies => &["movie_theater"],
            Self::Fitness => &["gym"],
            Self::Shopping => &["shopping_mall", "store"],
        }
    }

    /// Look a category up by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Itinerary activity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub Uuid);

impl ActivityId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Places provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceId(pub String);

impl PlaceId {
    /// Create a new `PlaceId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PlaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
