//! Payload fixtures shaped like Braintrust API responses

use serde_json::{Value, json};

/// Project listing with a single project `{p1, Demo}`
pub fn single_project() -> Value {
    json!({
        "objects": [
            {"id": "p1", "name": "Demo", "org_id": "org-1", "created": "2024-05-01T10:00:00Z"}
        ]
    })
}

/// Full experiment object as returned by `GET /v1/experiment/{id}`
pub fn experiment_object(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "project_id": "p1",
        "public": false,
        "metadata": {"model": "gpt-4o", "temperature": 0.2},
        "repo_info": {"commit": "abc123", "dirty": false}
    })
}

/// Experiment summary as returned by `GET /v1/experiment/{id}/summarize`
pub fn experiment_summary(name: &str) -> Value {
    json!({
        "project_name": "Demo",
        "experiment_name": name,
        "scores": {
            "Factuality": {"name": "Factuality", "score": 0.8, "diff": 0.05}
        },
        "metrics": {
            "duration": {"name": "duration", "metric": 1.5, "unit": "s"}
        }
    })
}

/// Two experiment log events
pub fn experiment_events() -> Vec<Value> {
    vec![
        json!({
            "id": "ev-1",
            "input": {"question": "What is 2+2?"},
            "output": "4",
            "expected": "4",
            "scores": {"Factuality": 1}
        }),
        json!({
            "id": "ev-2",
            "input": {"question": "Capital of France?"},
            "output": "Paris, France",
            "expected": "Paris",
            "scores": {"Factuality": 0.6},
            "tags": ["geo"]
        }),
    ]
}

/// Dataset object as returned by `GET /v1/dataset/{id}`
pub fn dataset_object(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "project_id": "p1",
        "description": "hand-labelled answers",
        "metadata": null
    })
}
