//! Search state exposed to the UI.
//!
//! Each run gets a generation number. Only the completion carrying the
//! current generation is applied, so a slow run can never overwrite the
//! results of the inputs that replaced it.

use crate::places::aggregator::SearchRequest;
use crate::places::types::Place;

/// What the caller should do after the inputs were updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTrigger {
    /// Inputs did not change; nothing to do.
    Unchanged,
    /// Inputs are incomplete; results were cleared without a search.
    Cleared,
    /// Start a run tagged with this generation.
    Start(u64),
}

/// Loading flag, current results, and the generation of the latest run.
#[derive(Debug, Default)]
pub struct SearchSession {
    request: SearchRequest,
    generation: u64,
    loading: bool,
    results: Option<Vec<Place>>,
}

impl SearchSession {
    /// Create a session that has not searched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest inputs.
    pub fn update(&mut self, request: SearchRequest) -> SearchTrigger {
        if request == self.request && (self.loading || self.results.is_some()) {
            return SearchTrigger::Unchanged;
        }
        self.request = request;
        self.begin()
    }

    /// Start over with the current inputs, even if they have not changed.
    pub fn refresh(&mut self) -> SearchTrigger {
        self.begin()
    }

    fn begin(&mut self) -> SearchTrigger {
        // Any in-flight run is stale from here on
        self.generation += 1;
        if self.request.is_searchable() {
            self.loading = true;
            SearchTrigger::Start(self.generation)
        } else {
            self.loading = false;
            self.results = Some(Vec::new());
            SearchTrigger::Cleared
        }
    }

    /// Apply a finished run. Returns `false` if the run was superseded.
    pub fn complete(&mut self, generation: u64, places: Vec<Place>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale search results (generation {} < {})",
                generation,
                self.generation
            );
            return false;
        }
        self.loading = false;
        self.results = Some(places);
        true
    }

    /// Inputs of the latest run.
    pub const fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Generation of the latest run.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the latest run is outstanding.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// `None` before the first search, otherwise the latest results.
    pub fn results(&self) -> Option<&[Place]> {
        self.results.as_deref()
    }

    /// Whether a search has finished at least once.
    pub const fn has_searched(&self) -> bool {
        self.results.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, PlaceId};

    fn place(id: &str) -> Place {
        Place {
            place_id: PlaceId::new(id),
            name: id.to_string(),
            vicinity: String::new(),
            rating: None,
            user_ratings_total: None,
        }
    }

    fn request(city: &str) -> SearchRequest {
        SearchRequest::new(&[Category::Food], city, "key")
    }

    #[test]
    fn test_new_session_has_not_searched() {
        let session = SearchSession::new();
        assert!(session.results().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_unsearchable_update_clears_without_starting() {
        let mut session = SearchSession::new();
        let trigger = session.update(SearchRequest::new(&[], "Town", "key"));
        assert_eq!(trigger, SearchTrigger::Cleared);
        assert_eq!(session.results(), Some(&[][..]));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_same_inputs_do_not_restart() {
        let mut session = SearchSession::new();
        assert_eq!(session.update(request("Town")), SearchTrigger::Start(1));
        assert_eq!(session.update(request("Town")), SearchTrigger::Unchanged);
        assert!(session.complete(1, vec![place("a")]));
        assert_eq!(session.update(request("Town")), SearchTrigger::Unchanged);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = SearchSession::new();
        let SearchTrigger::Start(first) = session.update(request("Springfield")) else {
            unreachable!("searchable request should start");
        };
        let SearchTrigger::Start(second) = session.update(request("Shelbyville")) else {
            unreachable!("searchable request should start");
        };

        // The older run finishes last in wall-clock terms but must not win
        assert!(session.complete(second, vec![place("new")]));
        assert!(!session.complete(first, vec![place("old")]));

        let ids: Vec<_> = session.results().unwrap_or_default().iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn test_stale_completion_keeps_loading() {
        let mut session = SearchSession::new();
        session.update(request("Springfield"));
        session.update(request("Shelbyville"));
        assert!(!session.complete(1, vec![place("old")]));
        assert!(session.is_loading());
        assert!(session.results().is_none());
    }

    #[test]
    fn test_clearing_invalidates_in_flight_run() {
        let mut session = SearchSession::new();
        session.update(request("Springfield"));
        assert_eq!(session.update(SearchRequest::new(&[Category::Food], "", "key")), SearchTrigger::Cleared);
        assert!(!session.complete(1, vec![place("late")]));
        assert_eq!(session.results(), Some(&[][..]));
    }

    #[test]
    fn test_refresh_bumps_generation() {
        let mut session = SearchSession::new();
        session.update(request("Town"));
        assert_eq!(session.refresh(), SearchTrigger::Start(2));
        assert_eq!(session.generation(), 2);
    }
}
