// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::{
    create_test_router, envelope, get_json, post_json, submit_approved, tournament_body,
};

#[tokio::test]
async fn test_health() {
    let app = create_test_router();

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_submit_tournament_as_director_succeeds() {
    let app = create_test_router();

    let (status, body) = post_json(
        &app,
        "/tournaments",
        &envelope("td-7", "director", tournament_body("2026-03-20")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["event_id"].as_i64().unwrap() > 0);
    assert_eq!(body["tournament"]["status"], "pending");
    assert_eq!(body["tournament"]["sequence_number"], 1);
    assert_eq!(body["tournament"]["start_time"], "19:30:00");
    assert_eq!(body["tournament"]["director_id"], "td-7");
}

#[tokio::test]
async fn test_submit_tournament_as_player_is_forbidden() {
    let app = create_test_router();

    let (status, body) = post_json(
        &app,
        "/tournaments",
        &envelope("player-3", "player", tournament_body("2026-03-20")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_unknown_role_is_unauthenticated() {
    let app = create_test_router();

    let (status, _) = post_json(
        &app,
        "/tournaments",
        &envelope("td-7", "referee", tournament_body("2026-03-20")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let app = create_test_router();

    let (status, body) = post_json(
        &app,
        "/tournaments",
        &envelope("td-7", "director", tournament_body("next tuesday")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("next tuesday"));
}

#[tokio::test]
async fn test_missing_tournament_is_not_found() {
    let app = create_test_router();

    let (status, _) = get_json(&app, "/tournaments/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_tournament_by_sequence_number() {
    let app = create_test_router();
    let id: String = submit_approved(&app, tournament_body("2026-03-20")).await;

    let (status, body) = get_json(&app, "/tournaments/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tournament"]["tournament_id"], id.as_str());
    assert_eq!(body["like_count"], 0);
}

#[tokio::test]
async fn test_approve_twice_is_conflict() {
    let app = create_test_router();
    let id: String = submit_approved(&app, tournament_body("2026-03-20")).await;

    let (status, _) = post_json(
        &app,
        &format!("/tournaments/{id}/approve"),
        &envelope("admin-1", "admin", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = create_test_router();
    submit_approved(&app, tournament_body("2026-03-20")).await;
    post_json(
        &app,
        "/tournaments",
        &envelope("td-7", "director", tournament_body("2026-03-27")),
    )
    .await;

    let (status, pending) = get_json(&app, "/tournaments?status=pending").await;
    let (_, all) = get_json(&app, "/tournaments").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["tournaments"].as_array().unwrap().len(), 1);
    assert_eq!(pending["tournaments"][0]["start_date"], "2026-03-27");
    assert_eq!(all["tournaments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_moves_to_history_and_restore_returns_it() {
    let app = create_test_router();
    let id: String = submit_approved(&app, tournament_body("2026-03-20")).await;

    let (status, _) = post_json(
        &app,
        &format!("/tournaments/{id}/delete"),
        &envelope("admin-1", "admin", json!({ "reason": "Venue closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, history) = get_json(&app, "/tournaments/history?reason=admin_deletion").await;
    assert_eq!(history["records"].as_array().unwrap().len(), 1);
    assert_eq!(history["records"][0]["deletion_reason"], "Venue closed");
    let (status, _) = get_json(&app, &format!("/tournaments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, restored) = post_json(
        &app,
        &format!("/tournaments/{id}/restore"),
        &envelope("admin-1", "admin", json!({ "target_status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["tournament"]["status"], "approved");
    assert_eq!(restored["tournament"]["sequence_number"], 1);
}

#[tokio::test]
async fn test_delete_without_reason_is_bad_request() {
    let app = create_test_router();
    let id: String = submit_approved(&app, tournament_body("2026-03-20")).await;

    let (status, _) = post_json(
        &app,
        &format!("/tournaments/{id}/delete"),
        &envelope("admin-1", "admin", json!({ "reason": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_then_unlike() {
    let app = create_test_router();
    let id: String = submit_approved(&app, tournament_body("2026-03-20")).await;
    let player = envelope("player-3", "player", json!({}));

    let (status, liked) = post_json(&app, &format!("/tournaments/{id}/like"), &player).await;
    let (_, again) = post_json(&app, &format!("/tournaments/{id}/like"), &player).await;
    let (_, unliked) = post_json(&app, &format!("/tournaments/{id}/unlike"), &player).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["liked"], true);
    assert_eq!(liked["like_count"], 1);
    assert_eq!(again["changed"], false);
    assert_eq!(unliked["liked"], false);
    assert_eq!(unliked["like_count"], 0);
}

#[tokio::test]
async fn test_pause_recurring_master() {
    let app = create_test_router();
    let mut body = tournament_body("2026-03-17");
    body["recurrence_interval"] = json!("weekly");
    let id: String = submit_approved(&app, body).await;

    let (status, paused) = post_json(
        &app,
        &format!("/tournaments/{id}/template"),
        &envelope("admin-1", "admin", json!({ "template_status": "paused" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(paused["tournament"]["recurring_template_status"], "paused");
}
