#![cfg(feature = "server")]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use receipt_processor::api::create_app;
use receipt_processor::{ReceiptProcessor, SequentialGenerator, ServerConfig, ScoreStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_app(ReceiptProcessor::new(), &ServerConfig::default())
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    })
}

fn corner_market_receipt() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"}
        ],
        "total": "9.00"
    })
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn submit(app: &Router, receipt: &Value) -> String {
    let (status, body) = send(app, post_json("/receipts/process", receipt.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn points(app: &Router, id: &str) -> u64 {
    let (status, body) = send(app, get(&format!("/receipts/{}/points", id))).await;
    assert_eq!(status, StatusCode::OK);
    body["points"].as_u64().unwrap()
}

#[tokio::test]
async fn test_target_receipt_round_trip() {
    let app = app();
    let id = submit(&app, &target_receipt()).await;

    assert!(uuid::Uuid::parse_str(&id).is_ok());
    assert_eq!(points(&app, &id).await, 28);
}

#[tokio::test]
async fn test_corner_market_receipt_round_trip() {
    let app = app();
    let id = submit(&app, &corner_market_receipt()).await;
    assert_eq!(points(&app, &id).await, 109);
}

#[tokio::test]
async fn test_same_receipt_twice_gives_distinct_ids() {
    let app = app();
    let first = submit(&app, &target_receipt()).await;
    let second = submit(&app, &target_receipt()).await;

    assert_ne!(first, second);
    assert_eq!(points(&app, &first).await, points(&app, &second).await);
}

#[tokio::test]
async fn test_unparsable_total_scores_zero() {
    let app = app();
    let mut receipt = corner_market_receipt();
    receipt["total"] = json!("not-a-number");

    let id = submit(&app, &receipt).await;
    assert_eq!(points(&app, &id).await, 0);
}

#[tokio::test]
async fn test_malformed_receipt_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, post_json("/receipts/process", "{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid receipt format. Please verify input.");

    let mut numeric_total = target_receipt();
    numeric_total["total"] = json!(35.35);
    let (status, _) = send(&app, post_json("/receipts/process", numeric_total.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .body(Body::from(target_receipt().to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid receipt format. Please verify input.");
}

#[tokio::test]
async fn test_missing_fields_are_scored_as_empty() {
    let app = app();

    let mut missing_total = corner_market_receipt();
    missing_total.as_object_mut().unwrap().remove("total");
    let id = submit(&app, &missing_total).await;
    assert_eq!(points(&app, &id).await, 0);

    // No items: retailer (14) + round dollar (50) + quarter (25) + 14:33 (10)
    let mut missing_items = corner_market_receipt();
    missing_items.as_object_mut().unwrap().remove("items");
    let id = submit(&app, &missing_items).await;
    assert_eq!(points(&app, &id).await, 99);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    let (status, body) = send(&app, get("/receipts/does-not-exist/points")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No receipt found for that ID.");
}

#[tokio::test]
async fn test_health_reports_receipt_count() {
    let store = ScoreStore::new();
    let processor = ReceiptProcessor::with_parts(Arc::new(SequentialGenerator::new("r")), store);
    let app = create_app(processor, &ServerConfig::default());

    let id = submit(&app, &target_receipt()).await;
    assert_eq!(id, "r-1");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "receipts": 1}));
}
