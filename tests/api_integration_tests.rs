//! Integration Tests for API Endpoints
//!
//! Drives the full router request/response cycle for each orders endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use orders_service::{
    api::create_router,
    cache::MemoryCache,
    repository::{FileOrderRepository, MemoryOrderRepository},
    service::order_cache_key,
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::new(Arc::new(MemoryOrderRepository::new()), MemoryCache::new(100))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn create_order(app: &Router, body: &str) -> Value {
    let response = send(app, "POST", "/api/orders", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await
}

const ADA: &str = r#"{"customerName":"Ada","product":"Widget","amount":12.50}"#;

// == Create ==

#[tokio::test]
async fn test_create_returns_created_with_location() {
    let app = create_router(create_test_state());

    let response = send(&app, "POST", "/api/orders", Some(ADA)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Order created successfully");
    let id = json["data"]["orderId"].as_str().unwrap();
    assert_eq!(location, format!("/api/orders/{}", id));
    assert_eq!(json["data"]["customerName"], "Ada");
    assert_eq!(json["data"]["amount"], 12.5);
}

#[tokio::test]
async fn test_create_validation_failure() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        "POST",
        "/api/orders",
        Some(r#"{"customerName":"","product":"Widget","amount":-1}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
    assert!(json["errors"]["customerName"].is_array());
    assert!(json["errors"]["amount"].is_array());
    assert!(json["errors"].get("product").is_none());
}

async fn assert_rejected(response: Response, field: &str) -> Value {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
    assert!(json["errors"][field][0].is_string(), "errors: {}", json["errors"]);
    json
}

#[tokio::test]
async fn test_create_malformed_json_is_rejected_in_envelope() {
    let app = create_router(create_test_state());

    let response = send(&app, "POST", "/api/orders", Some("{not json")).await;

    assert_rejected(response, "body").await;
}

#[tokio::test]
async fn test_create_wrongly_typed_amount_is_rejected_in_envelope() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        "POST",
        "/api/orders",
        Some(r#"{"customerName":"Ada","product":"Widget","amount":"abc"}"#),
    )
    .await;

    let json = assert_rejected(response, "body").await;
    assert!(json["errors"]["body"][0].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_create_rejects_sub_cent_amounts() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        "POST",
        "/api/orders",
        Some(r#"{"customerName":"Ada","product":"Widget","amount":12.345}"#),
    )
    .await;
    assert_rejected(response, "amount").await;

    let response = send(
        &app,
        "POST",
        "/api/orders",
        Some(r#"{"customerName":"Ada","product":"Widget","amount":1e-300}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/orders", None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

// == Read ==

#[tokio::test]
async fn test_create_read_delete_scenario() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    let created = create_order(&app, ADA).await;
    let id = created["data"]["orderId"].as_str().unwrap().to_string();
    let key = order_cache_key(Uuid::parse_str(&id).unwrap());
    assert!(!cache.contains(&key).await, "create must not populate the cache");

    let response = send(&app, "GET", &format!("/api/orders/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_to_json(response.into_body()).await;
    assert_eq!(fetched["data"], created["data"]);
    assert!(!fetched["data"]["createdAt"].as_str().unwrap().is_empty());
    assert!(cache.contains(&key).await, "first read populates the cache");

    let response = send(&app, "DELETE", &format!("/api/orders/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"], true);
    assert!(!cache.contains(&key).await);

    let response = send(&app, "GET", &format!("/api/orders/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains(&id));

    let response = send(&app, "DELETE", &format!("/api/orders/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_is_rejected_in_envelope() {
    let app = create_router(create_test_state());

    for method in ["GET", "DELETE"] {
        let response = send(&app, method, "/api/orders/not-a-uuid", None).await;
        assert_rejected(response, "id").await;
    }

    let response = send(&app, "PUT", "/api/orders/not-a-uuid", Some(ADA)).await;
    assert_rejected(response, "id").await;
}

#[tokio::test]
async fn test_repeated_reads_hit_cache() {
    let app = create_router(create_test_state());
    let created = create_order(&app, ADA).await;
    let uri = format!("/api/orders/{}", created["data"]["orderId"].as_str().unwrap());

    for _ in 0..3 {
        let response = send(&app, "GET", &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, "GET", "/stats", None).await;
    let stats = body_to_json(response.into_body()).await;
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hits"], 2);
    assert_eq!(stats["total_entries"], 1);
}

// == List ==

#[tokio::test]
async fn test_list_returns_every_order_newest_first() {
    let app = create_router(create_test_state());
    for name in ["first", "second", "third"] {
        let body = format!(r#"{{"customerName":"{}","product":"Widget","amount":1}}"#, name);
        create_order(&app, &body).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["customerName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

// == Update ==

#[tokio::test]
async fn test_update_changes_fields_seen_by_next_read() {
    let app = create_router(create_test_state());
    let created = create_order(&app, ADA).await;
    let uri = format!("/api/orders/{}", created["data"]["orderId"].as_str().unwrap());

    // Warm the cache so the update has something to invalidate
    send(&app, "GET", &uri, None).await;

    let response = send(
        &app,
        "PUT",
        &uri,
        Some(r#"{"customerName":"Ada","product":"Widget Pro","amount":20}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", &uri, None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"]["product"], "Widget Pro");
    assert_eq!(json["data"]["createdAt"], created["data"]["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_and_invalid() {
    let app = create_router(create_test_state());
    let uri = format!("/api/orders/{}", Uuid::new_v4());

    let response = send(&app, "PUT", &uri, Some(ADA)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "PUT",
        &uri,
        Some(r#"{"customerName":"Ada","product":"","amount":1}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Durable Store ==

#[tokio::test]
async fn test_orders_survive_restart_with_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let id = {
        let repo = FileOrderRepository::open(&path).await.unwrap();
        let app = create_router(AppState::new(Arc::new(repo), MemoryCache::new(100)));
        let created = create_order(&app, ADA).await;
        created["data"]["orderId"].as_str().unwrap().to_string()
    };

    let repo = FileOrderRepository::open(&path).await.unwrap();
    let app = create_router(AppState::new(Arc::new(repo), MemoryCache::new(100)));

    let response = send(&app, "GET", &format!("/api/orders/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"]["customerName"], "Ada");
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
