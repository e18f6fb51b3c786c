//! Router-level tests: requests go through the full middleware stack via
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn router_with(config: ServerConfig) -> Router {
    let state = ServerState::new(config).expect("state");
    build_router(Arc::new(state))
}

fn router() -> Router {
    router_with(ServerConfig::default())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_both_models() {
    let app = router();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["models"]["collaborative_filtering"], "active");
    assert_eq!(body["models"]["content_based"], "active");
}

#[tokio::test]
async fn ready_reports_seeded_items() {
    let app = router();
    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["collaborative_filtering"]["status"], "ready");
    assert_eq!(body["components"]["collaborative_filtering"]["items"], 9);
    assert_eq!(body["components"]["content_based"]["items"], 0);
}

#[tokio::test]
async fn response_carries_request_id() {
    let app = router();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn recommends_from_seeded_sample_data() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json("/recommend/food", json!({ "orderHistory": ["samosa"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "collaborative_filtering");
    assert_eq!(
        body["recommendations"],
        json!([["chai", 2], ["pakora", 1], ["jalebi", 1], ["poha", 0], ["dosa", 0]])
    );
}

#[tokio::test]
async fn empty_history_serves_popular_items() {
    let app = router();
    let (status, body) = send(&app, post_json("/recommend/food", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "popular");
    assert_eq!(
        body["recommendations"],
        json!([["samosa", 10], ["chai", 9], ["dosa", 8]])
    );

    let (_, body) = send(
        &app,
        post_json("/recommend/food", json!({ "orderHistory": [], "n": 1 })),
    )
    .await;
    assert_eq!(body["recommendations"], json!([["samosa", 10]]));
}

#[tokio::test]
async fn train_replaces_the_model() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json(
            "/recommend/train",
            json!({ "interactions": [
                { "user_id": 1, "item_id": "a", "rating": 5 },
                { "user_id": 1, "item_id": "b" },
                { "user_id": 2, "item_id": "a" },
                { "user_id": 2, "item_id": "c" }
            ]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "trained_on": 4 }));

    let (_, body) = send(
        &app,
        post_json("/recommend/food", json!({ "orderHistory": ["a"], "n": 5 })),
    )
    .await;
    assert_eq!(body["recommendations"], json!([["b", 1], ["c", 1]]));

    let (_, body) = send(
        &app,
        post_json("/recommend/food", json!({ "orderHistory": ["samosa"] })),
    )
    .await;
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn empty_training_batch_keeps_model() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json("/recommend/train", json!({ "interactions": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trained_on"], 0);

    let (_, body) = send(&app, get("/stats")).await;
    assert_eq!(body["models"]["recommender"]["items"], 9);
}

#[tokio::test]
async fn timed_out_training_keeps_model() {
    let config = ServerConfig {
        timeout_secs: 0,
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::new(config).expect("state"));
    let app = build_router(state.clone());

    let interactions: Vec<Value> = (0..3000)
        .map(|i| json!({"user_id": format!("u{}", i / 3), "item_id": format!("dish-{i}")}))
        .collect();
    let (status, body) = send(
        &app,
        post_json("/recommend/train", json!({"interactions": interactions})),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"]["code"], "TIMEOUT");

    // Let the abandoned build finish; it must not be installed.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let stats = state.registry.stats();
    assert_eq!(stats.recommender.items, 9);
    assert_eq!(stats.recommender.interactions, 15);
}

#[tokio::test]
async fn stores_items_and_matches_routes() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json(
            "/match/items",
            json!({ "items": [
                { "item_id": "r1", "features": { "from": "Sitapur", "to": "Lucknow", "fare": 40 } },
                { "item_id": "r2", "features": { "from": "Sitapur", "to": "Hardoi", "fare": 55 } },
                { "item_id": "r3", "features": { "from": "Hardoi", "ac": true } }
            ]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "stored": 3, "total": 3 }));

    let (status, body) = send(
        &app,
        post_json(
            "/match/routes",
            json!({ "query": { "from": "Sitapur", "fare": 40 }, "n": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0], json!(["r1", 2.0]));
    assert_eq!(matches[1][0], "r2");
    let score = matches[1][1].as_f64().unwrap();
    assert!((score - (1.0 + 1.0 / 16.0)).abs() < 1e-9);
}

#[tokio::test]
async fn match_on_empty_catalog_is_empty() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json("/match/routes", json!({ "query": { "from": "Sitapur" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"], json!([]));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = router();
    let (status, body) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = router();
    let request = Request::builder()
        .method("POST")
        .uri("/recommend/food")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn null_feature_value_is_rejected() {
    let app = router();
    let (status, body) = send(
        &app,
        post_json("/match/routes", json!({ "query": { "from": null } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn metrics_without_recorder_is_404() {
    let app = router();
    let (status, _) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_keys_guard_protected_routes() {
    let mut config = ServerConfig::default();
    config.api_keys.insert("test-api-key".to_string());
    let app = router_with(config);

    let (status, body) = send(&app, post_json("/recommend/food", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_FAILED");

    let request = Request::builder()
        .method("POST")
        .uri("/recommend/food")
        .header("content-type", "application/json")
        .header("authorization", "Bearer test-api-key")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_applies_per_key() {
    let mut config = ServerConfig::default();
    config.api_keys.insert("k".to_string());
    config.rate_limit_per_minute = 1;
    let app = router_with(config);

    let request = || {
        Request::builder()
            .uri("/stats")
            .header("x-api-key", "k")
            .body(Body::empty())
            .unwrap()
    };
    let (status, _) = send(&app, request()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, request()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
}
