//! Aggregation behaviour against a scripted search backend.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use weekplan::error::{Error, Result};
use weekplan::places::{
    Place, PlaceSearch, PlacesAggregator, SearchRequest, SearchSession, SearchTrigger,
};
use weekplan::types::{Category, PlaceId};

enum Answer {
    Places(Vec<Place>),
    Refused(u16),
    Dropped,
    Rejected,
}

/// Scripted backend: answers per query, records every call in order.
#[derive(Default)]
struct ScriptedSearch {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSearch {
    fn answer(mut self, query: &str, places: Vec<Place>) -> Self {
        self.answers.insert(query.to_string(), Answer::Places(places));
        self
    }

    fn refuse(mut self, query: &str, status: u16) -> Self {
        self.answers.insert(query.to_string(), Answer::Refused(status));
        self
    }

    fn fail(mut self, query: &str) -> Self {
        self.answers.insert(query.to_string(), Answer::Dropped);
        self
    }

    fn reject(mut self, query: &str) -> Self {
        self.answers.insert(query.to_string(), Answer::Rejected);
        self
    }

    fn queries(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
    }
}

#[async_trait]
impl PlaceSearch for ScriptedSearch {
    async fn text_search(&self, query: &str, api_key: &str) -> Result<Vec<Place>> {
        self.calls.lock().unwrap().push((query.to_string(), api_key.to_string()));
        match self.answers.get(query) {
            Some(Answer::Places(places)) => Ok(places.clone()),
            Some(Answer::Refused(status)) => Err(Error::places_status(format!("'{query}' refused"), *status)),
            Some(Answer::Dropped) => Err(Error::Network("connection reset".to_string())),
            Some(Answer::Rejected) => Err(Error::Delivery("not a places error".to_string())),
            None => Ok(Vec::new()),
        }
    }
}

fn place(id: &str, name: &str) -> Place {
    Place {
        place_id: PlaceId::new(id),
        name: name.to_string(),
        vicinity: format!("{name} street"),
        rating: Some(4.0),
        user_ratings_total: Some(12),
    }
}

fn aggregator(search: &Arc<ScriptedSearch>) -> PlacesAggregator {
    PlacesAggregator::new(Arc::clone(search) as Arc<dyn PlaceSearch>)
}

#[tokio::test]
async fn test_food_in_springfield_issues_one_query() {
    let search = Arc::new(ScriptedSearch::default().answer(
        "restaurant in Springfield",
        vec![place("a", "Krusty Burger"), place("b", "Moe's"), place("c", "Luigi's")],
    ));
    let request = SearchRequest::new(&[Category::Food], "Springfield", "key-123");

    let mut session = SearchSession::new();
    let SearchTrigger::Start(generation) = session.update(request.clone()) else {
        panic!("expected a search to start");
    };
    assert!(session.is_loading());

    let places = aggregator(&search).run(&request).await;
    assert!(session.complete(generation, places));

    assert!(!session.is_loading());
    assert_eq!(session.results().unwrap().len(), 3);
    let calls = search.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("restaurant in Springfield".to_string(), "key-123".to_string())]);
}

#[tokio::test]
async fn test_duplicate_ids_keep_first_seen() {
    let search = Arc::new(
        ScriptedSearch::default()
            .answer("night_club in Austin", vec![place("p1", "First copy"), place("p2", "Club")])
            .answer("movie_theater in Austin", vec![place("p1", "Second copy"), place("p3", "Cinema")]),
    );
    let request = SearchRequest::new(&[Category::Entertainment, Category::Movies], "Austin", "k");

    let places = aggregator(&search).run(&request).await;

    let ids: Vec<_> = places.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    assert_eq!(places[0].name, "First copy");
    // movie_theater is shared by both categories but only asked once
    assert_eq!(
        search.queries(),
        vec!["night_club in Austin", "movie_theater in Austin", "amusement_park in Austin"]
    );
}

#[tokio::test]
async fn test_results_capped_at_twenty() {
    let malls: Vec<Place> = (0..15).map(|i| place(&format!("m{i}"), "Mall")).collect();
    let stores: Vec<Place> = (0..15).map(|i| place(&format!("s{i}"), "Store")).collect();
    let search = Arc::new(
        ScriptedSearch::default()
            .answer("shopping_mall in Denver", malls)
            .answer("store in Denver", stores),
    );
    let request = SearchRequest::new(&[Category::Shopping], "Denver", "k");

    let places = aggregator(&search).run(&request).await;

    assert_eq!(places.len(), 20);
    assert_eq!(places[0].place_id.as_str(), "m0");
    assert_eq!(places[19].place_id.as_str(), "s4");
}

#[tokio::test]
async fn test_guard_makes_no_calls() {
    let search = Arc::new(ScriptedSearch::default());
    let agg = aggregator(&search);

    for request in [
        SearchRequest::new(&[Category::Food], "Springfield", ""),
        SearchRequest::new(&[Category::Food], "   ", "k"),
        SearchRequest::new(&[], "Springfield", "k"),
    ] {
        assert!(agg.run(&request).await.is_empty());

        let mut session = SearchSession::new();
        assert_eq!(session.update(request), SearchTrigger::Cleared);
        assert!(!session.is_loading());
        assert_eq!(session.results(), Some(&[][..]));
    }

    assert!(search.queries().is_empty());
}

#[tokio::test]
async fn test_refused_keyword_is_skipped() {
    let search = Arc::new(
        ScriptedSearch::default()
            .refuse("shopping_mall in Boston", 500)
            .answer("store in Boston", vec![place("s1", "Corner shop")]),
    );
    let request = SearchRequest::new(&[Category::Shopping], "Boston", "k");

    let places = aggregator(&search).try_run(&request).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(search.queries().len(), 2);
}

#[tokio::test]
async fn test_non_transport_error_skips_only_that_keyword() {
    let search = Arc::new(
        ScriptedSearch::default()
            .reject("night_club in Austin")
            .refuse("movie_theater in Austin", 403)
            .answer("amusement_park in Austin", vec![place("a1", "Six Flags")]),
    );
    let request = SearchRequest::new(&[Category::Entertainment], "Austin", "k");

    let places = aggregator(&search).try_run(&request).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Six Flags");
    assert_eq!(search.queries().len(), 3);
}

#[tokio::test]
async fn test_transport_error_empties_the_run() {
    let search = Arc::new(
        ScriptedSearch::default()
            .answer("night_club in Miami", vec![place("n1", "Club")])
            .fail("movie_theater in Miami"),
    );
    let request = SearchRequest::new(&[Category::Entertainment], "Miami", "k");
    let agg = aggregator(&search);

    let err = agg.try_run(&request).await.unwrap_err();
    assert!(err.is_transport());
    assert!(agg.run(&request).await.is_empty());
    // The run stops at the failing keyword
    assert!(!search.queries().contains(&"amusement_park in Miami".to_string()));
}

#[tokio::test]
async fn test_superseded_run_is_discarded() {
    let search = Arc::new(
        ScriptedSearch::default()
            .answer("golf_course in Tampa", vec![place("g1", "Links")])
            .answer("cafe in Tampa", vec![place("c1", "Beans")]),
    );
    let agg = aggregator(&search);
    let mut session = SearchSession::new();

    let golf = SearchRequest::new(&[Category::Golf], "Tampa", "k");
    let cafe = SearchRequest::new(&[Category::Cafe], "Tampa", "k");
    let SearchTrigger::Start(old) = session.update(golf.clone()) else { panic!() };
    let SearchTrigger::Start(new) = session.update(cafe.clone()) else { panic!() };

    // Newer run lands first, then the stale one
    assert!(session.complete(new, agg.run(&cafe).await));
    assert!(!session.complete(old, agg.run(&golf).await));

    assert_eq!(session.results().unwrap()[0].name, "Beans");
}
