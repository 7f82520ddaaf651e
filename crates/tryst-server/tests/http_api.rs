//! HTTP-level integration tests for the rendezvous boundary.
//!
//! These tests prove the wire contract: route shapes, camelCase field
//! names, the flat error response shared by every failure kind, and the
//! full host/guest exchange driven end to end through the router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tryst_server::{ServerState, SignalServer};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    SignalServer::router(ServerState::new())
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    send(app, request).await
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("request builds");
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router serves the request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, value)
}

/// Session ids contain a space; encode them for use in a query string.
fn encoded(id: &str) -> String {
    id.replace(' ', "%20")
}

fn flat_error() -> Value {
    json!({"error": "that's an error"})
}

// =============================================================================
// Routes
// =============================================================================

#[tokio::test]
async fn register_host_returns_generated_id() {
    let app = test_app();

    let (status, body) = post_json(&app, "/host", json!({"description": "alice offer"})).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().expect("id is a string");
    let parts: Vec<&str> = id.split(' ').collect();
    assert_eq!(parts.len(), 2, "id is two space-separated tokens");
    assert!(parts.iter().all(|p| p.len() == 8 && p.chars().all(|c| c.is_ascii_hexdigit())));
}

#[tokio::test]
async fn register_host_honors_explicit_id() {
    let app = test_app();

    let (status, body) =
        post_json(&app, "/host", json!({"description": "alice offer", "id": "pet-name"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "pet-name"}));

    let (status, body) = get(&app, "/host?id=pet-name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "pet-name", "description": "alice offer"}));
}

#[tokio::test]
async fn full_exchange_over_http() {
    let app = test_app();

    let (_, body) = post_json(&app, "/host", json!({"description": "alice offer"})).await;
    let id = body["id"].as_str().expect("id is a string").to_string();

    let (status, body) = get(&app, &format!("/host?id={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "alice offer");

    let (status, body) = post_json(
        &app,
        "/guest",
        json!({"hostId": id, "guestDescription": "bob answer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    // With a guest waiting the host slot must not be re-advertised.
    let (status, body) = get(&app, &format!("/host?id={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());

    let (status, body) = get(&app, &format!("/guest?hostId={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"guestDescription": "bob answer"}));

    // Consumed: the session is gone.
    let (status, body) = get(&app, &format!("/guest?hostId={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());
}

#[tokio::test]
async fn unmatched_guest_poll_returns_empty_without_consuming() {
    let app = test_app();

    let (_, body) = post_json(&app, "/host", json!({"description": "alice offer"})).await;
    let id = body["id"].as_str().expect("id is a string").to_string();

    for _ in 0..2 {
        let (status, body) = get(&app, &format!("/guest?hostId={}", encoded(&id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"guestDescription": ""}));
    }

    // Still advertised after polling.
    let (status, _) = get(&app, &format!("/host?id={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn debug_probe_is_a_stateless_no_op() {
    let app = test_app();

    let (_, body) = post_json(&app, "/host", json!({"description": "alice offer"})).await;
    let id = body["id"].as_str().expect("id is a string").to_string();

    let (status, body) = get(&app, "/debug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    // The probe left the session alone.
    let (status, _) = get(&app, &format!("/host?id={}", encoded(&id))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Flat error model
// =============================================================================

#[tokio::test]
async fn every_failure_kind_shares_one_wire_shape() {
    let app = test_app();

    // InvalidArgument: empty description.
    let (status, body) = post_json(&app, "/host", json!({"description": "", "id": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());

    // The failed registration created nothing.
    let (status, body) = get(&app, "/host?id=x").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());

    // NotFound: unknown host id.
    let (status, body) = post_json(
        &app,
        "/guest",
        json!({"hostId": "missing", "guestDescription": "answer"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());

    // InvalidArgument: missing query parameter.
    let (status, body) = get(&app, "/guest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());
}

#[tokio::test]
async fn malformed_body_gets_the_flat_error() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/host")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json at all"))
        .expect("request builds");
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());
}

#[tokio::test]
async fn unknown_routes_get_the_flat_error() {
    let app = test_app();

    let (status, body) = get(&app, "/sessions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());

    let (status, body) = post_json(&app, "/host/extra", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, flat_error());
}
