//! Mock Braintrust API helpers built on wiremock

use braintrust_export::{ExportConfig, HttpTracker};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key the mock server expects
pub const TEST_API_KEY: &str = "sk-pipeline-test";

/// Build an HTTP tracker pointed at the mock server
pub fn tracker_for(server: &MockServer) -> HttpTracker {
    let config = ExportConfig {
        api_key: TEST_API_KEY.to_string(),
        api_url: server.uri(),
        ..Default::default()
    };
    HttpTracker::new(&config).expect("tracker should build against mock server")
}

/// Respond to `GET {route}` with a JSON body
pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Respond to `GET {route}` with an error status
pub async fn mount_get_error(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("internal error"))
        .mount(server)
        .await;
}

/// Mount a list endpoint filtered by project id
pub async fn mount_listing(server: &MockServer, route: &str, objects: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("project_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": objects })))
        .mount(server)
        .await;
}

/// Mount the experiment-by-name lookup used to open an event log
pub async fn mount_experiment_lookup(server: &MockServer, id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/experiment"))
        .and(query_param("project_name", "Demo"))
        .and(query_param("experiment_name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{"id": id, "name": name}]
        })))
        .mount(server)
        .await;
}

/// Mount a single-page event fetch for an experiment
pub async fn mount_experiment_fetch(server: &MockServer, id: &str, events: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/experiment/{id}/fetch")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": events,
            "cursor": null
        })))
        .mount(server)
        .await;
}

/// Make every event fetch for an experiment fail
pub async fn mount_experiment_fetch_error(server: &MockServer, id: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/experiment/{id}/fetch")))
        .respond_with(ResponseTemplate::new(500).set_body_string("fetch failed"))
        .expect(1)
        .mount(server)
        .await;
}
