mod common;

use axum::http::StatusCode;
use common::{event_payload, parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_event_derives_slug_and_canonical_date_time() {
    let app = TestApp::new();

    let mut payload = event_payload("Hello, World! 2024", vec!["rust"]);
    payload["date"] = json!("March 5, 2024");
    payload["time"] = json!("2:30 PM");

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["slug"], "hello-world-2024");
    assert_eq!(body["date"], "2024-03-05");
    assert_eq!(body["time"], "14:30");
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn test_get_event_by_slug_envelope() {
    let app = TestApp::new();

    let res = app.request("POST", "/api/v1/events", Some(event_payload("Rust Meetup", vec!["rust"]))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/events/rust-meetup", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["message"], "Event fetched successfully");
    assert_eq!(body["event"]["title"], "Rust Meetup");
}

#[tokio::test]
async fn test_get_event_slug_is_trimmed_and_lowercased() {
    let app = TestApp::new();

    app.request("POST", "/api/v1/events", Some(event_payload("Rust Meetup", vec!["rust"]))).await;

    let res = app.request("GET", "/api/v1/events/RUST-Meetup", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/events/%20rust-meetup%20", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_event_blank_slug_is_client_error() {
    let app = TestApp::new();

    let res = app.request("GET", "/api/v1/events/%20%20", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_event_unknown_slug_is_404() {
    let app = TestApp::new();

    let res = app.request("GET", "/api/v1/events/no-such-event", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let app = TestApp::new();

    let res = app.request("POST", "/api/v1/events", Some(event_payload("Same Title", vec!["a"]))).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Different tags, same title: the derived slug collides on the unique index.
    let res = app.request("POST", "/api/v1/events", Some(event_payload("Same Title", vec!["b"]))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = parse_body(res).await;
    assert_eq!(body["error"], "Resource already exists (duplicate entry)");
}

#[tokio::test]
async fn test_empty_agenda_rejected() {
    let app = TestApp::new();

    let mut payload = event_payload("Agenda Free", vec!["rust"]);
    payload["agenda"] = json!([]);

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("Agenda must contain at least one item"));
}

#[tokio::test]
async fn test_empty_tags_rejected() {
    let app = TestApp::new();

    // Everything else valid; the empty tag list alone must fail the write.
    let payload = event_payload("Tagless", vec![]);

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validation_enumerates_all_violations() {
    let app = TestApp::new();

    let mut payload = event_payload("", vec![]);
    payload["mode"] = json!("virtual");

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Title is required"));
    assert!(error.contains("Mode must be one of: online, offline, hybrid"));
    assert!(error.contains("Tags must contain at least one tag"));
}

#[tokio::test]
async fn test_unparseable_date_rejected() {
    let app = TestApp::new();

    let mut payload = event_payload("Bad Date", vec!["rust"]);
    payload["date"] = json!("not-a-date");

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["error"], "Invalid date format");
}

#[tokio::test]
async fn test_out_of_range_time_rejected() {
    let app = TestApp::new();

    let mut payload = event_payload("Late Night", vec!["rust"]);
    payload["time"] = json!("25:00");

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["error"], "Time must be between 00:00 and 23:59");
}

#[tokio::test]
async fn test_update_title_rederives_slug() {
    let app = TestApp::new();

    app.request("POST", "/api/v1/events", Some(event_payload("Old Title", vec!["rust"]))).await;

    let res = app.request(
        "PUT",
        "/api/v1/events/old-title",
        Some(json!({"title": "Brand New Title!"})),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["slug"], "brand-new-title");

    let res = app.request("GET", "/api/v1/events/brand-new-title", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.request("GET", "/api/v1/events/old-title", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unrelated_field_keeps_slug_date_time() {
    let app = TestApp::new();

    let mut payload = event_payload("Stable Event", vec!["rust"]);
    payload["date"] = json!("March 5, 2024");
    payload["time"] = json!("2:30 PM");
    app.request("POST", "/api/v1/events", Some(payload)).await;

    let res = app.request(
        "PUT",
        "/api/v1/events/stable-event",
        Some(json!({"venue": "Bigger Hall"})),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["venue"], "Bigger Hall");
    assert_eq!(body["slug"], "stable-event");
    assert_eq!(body["date"], "2024-03-05");
    assert_eq!(body["time"], "14:30");
}

#[tokio::test]
async fn test_list_events() {
    let app = TestApp::new();

    app.request("POST", "/api/v1/events", Some(event_payload("First", vec!["a"]))).await;
    app.request("POST", "/api/v1/events", Some(event_payload("Second", vec!["b"]))).await;

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new();

    app.request("POST", "/api/v1/events", Some(event_payload("Short Lived", vec!["a"]))).await;

    let res = app.request("DELETE", "/api/v1/events/short-lived", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/events/short-lived", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_database_url_is_distinguished_500() {
    let app = TestApp::without_database();

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(res).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Database connection failed"));
    assert!(error.contains("DATABASE_URL is not set"));
}
