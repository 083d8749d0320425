//! Shared test fixtures: a small deck site served by wiremock.
//!
//! Provides `service_for()` which points a `DeckService` at the mock
//! server's `/data` tree, plus sample payload builders and mock-mount
//! helpers. Each test binary mounts only the mocks it needs.

#![allow(dead_code)]

use std::time::Duration;

use decksite_sdk::DeckService;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Service rooted at the mock server's `/data` tree, default deadline.
pub fn service_for(server: &MockServer) -> DeckService {
    DeckService::builder(format!("{}/data", server.uri()))
        .build()
        .unwrap()
}

/// Service with a short deadline, for timeout tests.
pub fn impatient_service_for(server: &MockServer, timeout: Duration) -> DeckService {
    DeckService::builder(format!("{}/data", server.uri()))
        .timeout(timeout)
        .build()
        .unwrap()
}

/// Three-entry index: two dragon-flavored decks and one that is not.
pub fn sample_index() -> Value {
    json!([
        { "index": "104001", "name": "Red Dragons", "description": "Burn them down with aggro" },
        { "index": "104002", "name": "Azure Control", "description": "Patient dragon tamers" },
        { "index": "104003", "name": "Gravemind", "description": "Mill and reanimate" },
    ])
}

pub fn sample_deck() -> Value {
    json!({
        "name": "Red Dragons",
        "description": "Burn them down with aggro",
        "cards": ["Dragon Hatchling", "Flame Bolt", "Mountain"],
        "strategyDescription": "Race to seven mana and land a dragon every turn."
    })
}

/// Mount a 200 response for the index resource.
pub async fn mount_index(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/data/decks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a 200 response for one deck document.
pub async fn mount_deck(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/data/decks/{}.json", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
