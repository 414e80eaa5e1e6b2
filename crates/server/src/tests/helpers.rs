// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router fixtures.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use breakshot_domain::Tz;
use breakshot_persistence::Persistence;
use serde_json::{Value, json};
use time::macros::datetime;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::routes::{AppState, TimeSource, build_router};

/// A Tuesday afternoon in UTC.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let config: ServerConfig = ServerConfig {
        database: None,
        port: 0,
        timezone: Tz::UTC,
        horizon: 4,
        maintenance_interval: None,
    };
    AppState::new(
        persistence,
        &config,
        TimeSource::Fixed(datetime!(2026-03-10 15:00 UTC)),
    )
}

pub fn create_test_router() -> Router {
    build_router(create_test_app_state())
}

/// Merges the stub identity into a request body.
pub fn envelope(actor_id: &str, role: &str, body: Value) -> Value {
    let mut request: Value = json!({
        "actor_id": actor_id,
        "actor_role": role,
        "cause_id": "test-cause",
        "cause_description": "Router test",
    });
    if let (Some(target), Value::Object(fields)) = (request.as_object_mut(), body) {
        target.extend(fields);
    }
    request
}

pub fn tournament_body(start_date: &str) -> Value {
    json!({
        "name": "Tuesday 8-Ball",
        "game_type": "8-ball",
        "format": "double elimination",
        "start_date": start_date,
        "start_time": "19:30",
        "fee_cents": 1500,
        "table_size": "7ft",
        "max_players": 24,
    })
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Submits as a director and approves as an admin; returns the tournament id.
pub async fn submit_approved(app: &Router, body: Value) -> String {
    let (status, submitted) =
        post_json(app, "/tournaments", &envelope("td-7", "director", body)).await;
    assert_eq!(status, StatusCode::OK, "{submitted}");
    let id: String = submitted["tournament"]["tournament_id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = post_json(
        app,
        &format!("/tournaments/{id}/approve"),
        &envelope("admin-1", "admin", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    id
}
