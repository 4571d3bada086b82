//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint, including the
//! error status mapping.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cachegrid::{
    api::create_router,
    cache::{CacheEngine, EvictionPolicy},
    AppState,
};
use serde_json::Value;
use std::thread::sleep;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn app_with(engine: CacheEngine) -> Router {
    create_router(AppState::new(engine))
}

fn create_test_app() -> Router {
    app_with(CacheEngine::new(100, 10_000_000, EvictionPolicy::Lru))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn put(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == Single-Key Round Trip ==

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(put("/cache/greeting", "hello world"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/cache/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response.into_body()).await, "hello world");
}

#[tokio::test]
async fn test_get_not_found() {
    let app = create_test_app();

    let response = app.oneshot(get("/cache/nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_put_with_ttl_expires() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(put("/cache/short_lived?ttl=1", "temp"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Present before the TTL elapses
    let response = app.clone().oneshot(get("/cache/short_lived")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    sleep(Duration::from_millis(1100));

    let response = app.oneshot(get("/cache/short_lived")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_zero_ttl_is_rejected() {
    let app = create_test_app();

    let response = app.oneshot(put("/cache/k?ttl=0", "v")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_overwrite_keeps_single_entry() {
    let app = create_test_app();

    app.clone().oneshot(put("/cache/k", "first")).await.unwrap();
    app.clone().oneshot(put("/cache/k", "second")).await.unwrap();

    let response = app.clone().oneshot(get("/cache/k")).await.unwrap();
    assert_eq!(body_to_string(response.into_body()).await, "second");

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["current_size"].as_u64().unwrap(), 1);
    assert_eq!(json["sets"].as_u64().unwrap(), 2);
}

// == DELETE Endpoint ==

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = create_test_app();

    app.clone().oneshot(put("/cache/doomed", "value")).await.unwrap();

    let response = app.clone().oneshot(delete("/cache/doomed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/cache/doomed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_not_found() {
    let app = create_test_app();

    let response = app.oneshot(delete("/cache/nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Clear Endpoint ==

#[tokio::test]
async fn test_clear_requires_confirm() {
    let app = create_test_app();

    let response = app.oneshot(delete("/cache")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_reports_count() {
    let app = create_test_app();

    app.clone().oneshot(put("/cache/a", "1")).await.unwrap();
    app.clone().oneshot(put("/cache/b", "2")).await.unwrap();

    let response = app
        .clone()
        .oneshot(delete("/cache?confirm=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cleared"].as_u64().unwrap(), 2);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["current_size"].as_u64().unwrap(), 0);
    assert_eq!(json["current_bytes"].as_u64().unwrap(), 0);
}

// == Batch Endpoints ==

#[tokio::test]
async fn test_batch_set_then_batch_get() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/cache/batch/set",
            r#"{"items": {"a": "1", "b": "2", "c": "3"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["stored"].as_u64().unwrap(), 3);

    let response = app
        .oneshot(post_json(
            "/cache/batch/get",
            r#"{"keys": ["a", "b", "missing"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["found"].as_u64().unwrap(), 2);
    assert_eq!(json["values"]["a"].as_str().unwrap(), "1");
    assert_eq!(json["values"]["b"].as_str().unwrap(), "2");
    assert!(json["values"].get("missing").is_none());
}

#[tokio::test]
async fn test_batch_set_with_ttl_applies_to_all() {
    let app = create_test_app();

    app.clone()
        .oneshot(post_json(
            "/cache/batch/set",
            r#"{"items": {"x": "1", "y": "2"}, "ttl": 1}"#,
        ))
        .await
        .unwrap();

    sleep(Duration::from_millis(1100));

    let response = app.oneshot(get("/cache/x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_invalid_json() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/cache/batch/get", r#"{"invalid json"#))
        .await
        .unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == Stats Endpoint ==

#[tokio::test]
async fn test_stats_counts_hits_and_misses() {
    let app = create_test_app();

    app.clone().oneshot(put("/cache/stats_key", "v")).await.unwrap();
    app.clone().oneshot(get("/cache/stats_key")).await.unwrap();
    app.clone().oneshot(get("/cache/nonexistent")).await.unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["sets"].as_u64().unwrap(), 1);
    assert_eq!(json["current_size"].as_u64().unwrap(), 1);
    assert_eq!(json["policy"].as_str().unwrap(), "lru");
    assert!(json.get("hit_ratio").is_some());
    assert!(json.get("memory_usage_mb").is_some());
    assert!(json.get("uptime_seconds").is_some());
}

#[tokio::test]
async fn test_stats_reports_eviction() {
    let app = app_with(CacheEngine::new(2, 10_000_000, EvictionPolicy::Lru));

    app.clone().oneshot(put("/cache/a", "1")).await.unwrap();
    app.clone().oneshot(put("/cache/b", "2")).await.unwrap();
    app.clone().oneshot(put("/cache/c", "3")).await.unwrap();

    let response = app.clone().oneshot(get("/cache/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["evictions"].as_u64().unwrap(), 1);
    assert_eq!(json["current_size"].as_u64().unwrap(), 2);
}

// == Admin Keys Endpoint ==

#[tokio::test]
async fn test_admin_keys_with_pattern_and_limit() {
    let app = create_test_app();

    app.clone().oneshot(put("/cache/user:1", "a")).await.unwrap();
    app.clone().oneshot(put("/cache/user:2", "b")).await.unwrap();
    app.clone().oneshot(put("/cache/session:9", "c")).await.unwrap();

    let response = app
        .clone()
        .oneshot(get("/admin/keys?pattern=user:*"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 2);
    let keys: Vec<&str> = json["keys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert!(keys.contains(&"user:1"));
    assert!(keys.contains(&"user:2"));

    let response = app.oneshot(get("/admin/keys?limit=1")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 1);
}

// == Error Mapping ==

#[tokio::test]
async fn test_oversized_entry_is_413() {
    // Budget of 1000 bytes; a 900-byte value plus overhead exceeds it
    let app = app_with(CacheEngine::new(100, 1000, EvictionPolicy::Lru));

    let big = "x".repeat(900);
    let response = app.oneshot(put("/cache/big", &big)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_unadmittable_entry_is_507() {
    let app = app_with(CacheEngine::new(0, 10_000_000, EvictionPolicy::Lru));

    let response = app.oneshot(put("/cache/k", "v")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INSUFFICIENT_STORAGE);
}

// == Health Endpoint ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
    assert!(json.get("uptime_seconds").is_some());
}
