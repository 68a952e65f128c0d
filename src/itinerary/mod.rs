//! Weekly itinerary state.
//!
//! The store is a flat, insertion-ordered list of activities. Activities are
//! only ever appended or removed; nothing edits one in place.

/// Shareable rendering of the week
pub mod document;
/// Ordered category selection
pub mod selection;

pub use document::{DaySection, DocumentEntry, ItineraryDocument};
pub use selection::CategorySelection;

use crate::types::{ActivityId, Category, Day};
use serde::{Deserialize, Serialize};

/// A single plan item bound to one day and one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier.
    pub id: ActivityId,
    /// Trimmed, non-empty label.
    pub name: String,
    /// Category that was first in the selection when the activity was added.
    pub category: Category,
    /// Day the activity is planned for.
    pub day: Day,
}

impl Activity {
    /// Display name of the recorded category.
    pub const fn category_name(&self) -> &'static str {
        self.category.name()
    }
}

/// In-memory collection of activities.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ItineraryStore {
    activities: Vec<Activity>,
}

impl ItineraryStore {
    /// Create a new empty store.
    pub const fn new() -> Self {
        Self { activities: Vec::new() }
    }

    /// Add an activity for `day`.
    ///
    /// Returns `None` without touching the store when nothing is selected or
    /// the name is blank. Only the first selected category is recorded, even
    /// when several are active.
    pub fn add_activity(
        &mut self,
        name: &str,
        selected: &[Category],
        day: Day,
    ) -> Option<ActivityId> {
        let category = *selected.first()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let activity = Activity {
            id: ActivityId::new(),
            name: name.to_string(),
            category,
            day,
        };
        let id = activity.id;
        tracing::debug!("Added '{}' ({}) on {}", activity.name, category.id(), day);
        self.activities.push(activity);
        Some(id)
    }

    /// Remove the activity with `id`, if present.
    pub fn remove_activity(&mut self, id: ActivityId) -> Option<Activity> {
        let pos = self.activities.iter().position(|a| a.id == id)?;
        Some(self.activities.remove(pos))
    }

    /// Activities planned for `day`, in insertion order.
    pub fn activities_for_day(&self, day: Day) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.day == day).collect()
    }

    /// Get an activity by id.
    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Iterate over every activity in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    /// Number of activities in the week.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Check if the week has no activities.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Build the shareable document: every day in order, empty ones included.
    pub fn render_document(&self) -> ItineraryDocument {
        let sections = Day::all()
            .iter()
            .map(|&day| DaySection {
                day,
                entries: self
                    .activities_for_day(day)
                    .into_iter()
                    .map(|a| DocumentEntry {
                        name: a.name.clone(),
                        category: a.category_name().to_string(),
                    })
                    .collect(),
            })
            .collect();
        ItineraryDocument { sections }
    }
}
