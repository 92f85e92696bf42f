//! Autocomplete backed by the HTTP source, against a mock server

use std::sync::Arc;
use std::time::Duration;

use autosuggest_core::{AutocompleteBuilder, AutocompleteConfig, SearchState};
use autosuggest_http::{HttpConfig, HttpSuggestionSource};
use serde_json::json;
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick() -> AutocompleteConfig {
    AutocompleteConfig::default().with_debounce(Duration::from_millis(20))
}

async fn fruit_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fruit/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 6, "name": "Apple", "family": "Rosaceae" },
            { "id": 35, "name": "Apricot", "family": "Rosaceae" },
            { "id": 1, "name": "Banana", "family": "Musaceae" },
            { "id": 84, "name": "Avocado", "family": "Lauraceae" },
            { "id": 64, "name": "Blueberry", "family": "Ericaceae" }
        ])))
        .mount(&server)
        .await;
    server
}

async fn settled(states: &mut watch::Receiver<SearchState>, query: &str) -> SearchState {
    tokio::time::timeout(
        Duration::from_secs(5),
        states.wait_for(|s| s.debounced_text() == query && !s.is_loading() && !s.suggestions().is_empty()),
    )
    .await
    .expect("suggestions should load")
    .unwrap()
    .clone()
}

#[tokio::test]
async fn test_remote_suggestions_are_ranked() {
    let server = fruit_server().await;
    let source = HttpSuggestionSource::new(
        &format!("{}/api/fruit/all", server.uri()),
        HttpConfig::fast(),
    )
    .unwrap();

    let handle = AutocompleteBuilder::new(Arc::new(source))
        .config(quick())
        .mount()
        .unwrap();
    let mut states = handle.subscribe();

    handle.input_changed("Ap").unwrap();
    let state = settled(&mut states, "Ap").await;

    let names: Vec<_> = state.suggestions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Apple", "Apricot"]);
    assert_eq!(
        state.suggestions()[0].attribute("family"),
        Some(&json!("Rosaceae"))
    );
}

#[tokio::test]
async fn test_remote_failure_keeps_last_suggestions() {
    let server = fruit_server().await;
    let url = format!("{}/api/fruit/all", server.uri());
    let source = HttpSuggestionSource::new(&url, HttpConfig::fast()).unwrap();

    let handle = AutocompleteBuilder::new(Arc::new(source))
        .config(quick())
        .mount()
        .unwrap();
    let mut states = handle.subscribe();

    handle.input_changed("b").unwrap();
    settled(&mut states, "b").await;

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    handle.input_changed("bl").unwrap();
    tokio::time::timeout(
        Duration::from_secs(5),
        states.wait_for(|s| s.debounced_text() == "bl" && !s.is_loading() && handle.stats().failed == 1),
    )
    .await
    .expect("failure should settle")
    .unwrap();

    let names: Vec<_> = handle
        .state()
        .suggestions()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, vec!["Banana", "Blueberry"]);
}
