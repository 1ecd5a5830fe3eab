//! Integration tests for the HTTP API.
//!
//! Each test drives the full axum router (middleware included) against a
//! fresh in-memory ledger.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pointkeeper::adapters::http::{app_router, AppState};
use pointkeeper::application::handlers::history::AggregationSettings;
use pointkeeper::application::handlers::ledger::BatchPolicy;
use pointkeeper::config::ServerConfig;
use pointkeeper::domain::foundation::{CategoryId, UserId};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(policy: BatchPolicy) -> Router {
    let state = AppState::in_memory(AggregationSettings::default(), policy);
    app_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with(BatchPolicy::Partial)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, json)
}

async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send(app, Method::POST, "/api/users", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_category(app: &Router, name: &str, value: i32) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": name, "value": value })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn submit(app: &Router, user: &str, points: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/users/{}/points", user),
        Some(json!({ "points": points })),
    )
    .await
}

/// `{neg, pos}` for one pair out of a serialized breakdown report.
fn pair(report: &Value, category: &str, user: &str) -> (i64, i64) {
    let row = report["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["category"]["id"] == category)
        .unwrap();
    let cell = row["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|cell| cell["user"]["id"] == user)
        .unwrap();
    (cell["neg"].as_i64().unwrap(), cell["pos"].as_i64().unwrap())
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_check_responds() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn user_crud_round_trip() {
    let app = app();
    let id = create_user(&app, "Ada").await;
    let uri = format!("/api/users/{}", id);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "name": "Grace" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grace");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn blank_user_name_is_unprocessable() {
    let (status, body) = send(&app(), Method::POST, "/api/users", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "name");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let (status, body) = send(&app(), Method::GET, "/api/users/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_partial_update_keeps_name() {
    let app = app();
    let id = create_category(&app, "Chores", 3).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/categories/{}", id),
        Some(json!({ "value": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Chores");
    assert_eq!(body["value"], -1);

    let (_, list) = send(&app, Method::GET, "/api/categories", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_referenced_category_is_conflict() {
    let app = app();
    let user = create_user(&app, "Ada").await;
    let category = create_category(&app, "Chores", 1).await;
    let (status, _) = submit(&app, &user, json!({ category.clone(): 1 })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/categories/{}", category), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "REFERENCE_IN_USE");
}

#[tokio::test]
async fn batch_with_missing_category_keeps_valid_points() {
    let app = app();
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 5).await;
    let missing = CategoryId::new().to_string();

    let (status, body) = submit(&app, &user, json!({ cat_a.clone(): 5, missing.clone(): -2 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "PARTIAL_BATCH_FAILURE");
    assert_eq!(body["details"]["saved"], 1);
    assert_eq!(body["details"]["failures"][0]["category"], missing);

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/points", user), None).await;
    assert_eq!(status, StatusCode::OK);
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["category_id"], cat_a);
    assert_eq!(points[0]["value"], 5);
}

#[tokio::test]
async fn batch_accepts_whole_decimal_numbers() {
    let app = app();
    let user = create_user(&app, "U").await;
    let category = create_category(&app, "A", 5).await;

    let (status, body) = submit(&app, &user, json!({ category.clone(): 5.0 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["saved"], 1);

    let (_, body) = send(&app, Method::GET, &format!("/api/users/{}/points", user), None).await;
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["value"], 5);
}

#[tokio::test]
async fn batch_where_every_entry_fails_reports_the_entry_error() {
    let app = app();
    let user = create_user(&app, "U").await;
    let category = create_category(&app, "A", 5).await;

    let (status, body) = submit(&app, &user, json!({ category: 1.5 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "value");
}

#[tokio::test]
async fn atomic_batch_with_missing_category_saves_nothing() {
    let app = app_with(BatchPolicy::Atomic);
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 5).await;
    let missing = CategoryId::new().to_string();

    let (status, body) = submit(&app, &user, json!({ cat_a: 5, missing: -2 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CATEGORY_NOT_FOUND");

    let (_, body) = send(&app, Method::GET, &format!("/api/users/{}/points", user), None).await;
    assert!(body["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn points_for_unknown_user_are_not_found() {
    let app = app();
    let category = create_category(&app, "A", 1).await;
    let stranger = UserId::new().to_string();

    let (status, _) = submit(&app, &stranger, json!({ category: 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn point_form_lists_categories() {
    let app = app();
    let user = create_user(&app, "U").await;
    create_category(&app, "A", 5).await;
    create_category(&app, "B", -1).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/points/new", user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user);
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn weekly_history_splits_signs_per_category() {
    let app = app();
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 1).await;
    let cat_b = create_category(&app, "B", 1).await;

    submit(&app, &user, json!({ cat_a.clone(): 5, cat_b.clone(): 2 })).await;
    submit(&app, &user, json!({ cat_a.clone(): "-3" })).await;

    let (status, body) = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pair(&body["breakdown"], &cat_a, &user), (3, 5));
    assert_eq!(pair(&body["breakdown"], &cat_b, &user), (0, 2));

    let totals = body["totals"]["users"].as_array().unwrap();
    assert_eq!(totals[0]["total"], 4);
    let range = body["totals"]["range"].as_str().unwrap();
    assert_eq!(range.len(), "MM/DD - MM/DD".len());
}

#[tokio::test]
async fn prior_week_history_excludes_fresh_points() {
    let app = app();
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 1).await;
    submit(&app, &user, json!({ cat_a.clone(): 5 })).await;

    let (_, current) = send(&app, Method::GET, "/api/history", None).await;
    let (status, prior) = send(&app, Method::GET, "/api/history?prior=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pair(&prior["breakdown"], &cat_a, &user), (0, 0));
    assert_eq!(prior["totals"]["users"][0]["total"], 0);
    assert_ne!(prior["totals"]["range"], current["totals"]["range"]);
}

#[tokio::test]
async fn today_breakdown_covers_every_pair() {
    let app = app();
    create_user(&app, "U").await;
    create_user(&app, "V").await;
    create_category(&app, "A", 1).await;

    let (status, body) = send(&app, Method::GET, "/api/history/today", None).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn users_dashboard_reports_recent_points_as_new() {
    let app = app();
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 1).await;
    submit(&app, &user, json!({ cat_a.clone(): 4 })).await;
    submit(&app, &user, json!({ cat_a: -1 })).await;

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let row = &body["users"][0];
    assert_eq!(row["user"]["id"], user);
    let net = row["pos"].as_i64().unwrap() - row["neg"].as_i64().unwrap();
    assert_eq!(row["new"].as_i64().unwrap(), net);
}

#[tokio::test]
async fn reward_balance_tracks_cash_outs() {
    let app = app();
    let user = create_user(&app, "U").await;
    let cat_a = create_category(&app, "A", 1).await;
    let balance_uri = format!("/api/users/{}/rewards/new", user);

    let (status, body) = send(&app, Method::GET, &balance_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cashed_out"], 0);
    assert_eq!(body["remaining"], 0);

    submit(&app, &user, json!({ cat_a: 10 })).await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/users/{}/rewards", user),
        Some(json!({ "value": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, &balance_uri, None).await;
    assert_eq!(body["user_id"], user);
    assert_eq!(body["cashed_out"], 4);
    assert_eq!(body["remaining"], 6);

    let (_, body) = send(&app, Method::GET, &format!("/api/users/{}/rewards", user), None).await;
    assert_eq!(body["rewards"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn balance_of_unknown_user_is_not_found() {
    let uri = format!("/api/users/{}/rewards/new", UserId::new());
    let (status, _) = send(&app(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cash_out_for_unknown_user_is_unprocessable() {
    let uri = format!("/api/users/{}/rewards", UserId::new());
    let (status, body) = send(&app(), Method::POST, &uri, Some(json!({ "value": 1 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "user_id");
}
