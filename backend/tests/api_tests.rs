//! HTTP API tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pharmstock_backend::{create_app, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> (Router, AppState) {
    let state = AppState::new(Config::default());
    (create_app(state.clone()), state)
}

fn period(index: u32, beginning: f64, consumption: f64, stock_out_days: u32) -> Value {
    json!({
        "index": index,
        "label": format!("2024-{:02}", index),
        "beginning_balance": beginning,
        "received": 0.0,
        "positive_adjustment": 0.0,
        "negative_adjustment": 0.0,
        "ending_balance": beginning - consumption,
        "stock_out_days": stock_out_days,
        "expired_or_damaged": 0.0,
        "consumption_or_issue": consumption,
    })
}

fn product(id: Uuid, periods: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": "Amoxicillin 250mg",
        "unit": "capsule",
        "unit_price": "0.12",
        "classification": "vital",
        "frequency": "monthly",
        "periods": periods,
    })
}

fn stocked_product(id: Uuid) -> Value {
    product(
        id,
        vec![
            period(1, 400.0, 100.0, 0),
            period(2, 400.0, 110.0, 0),
            period(3, 400.0, 95.0, 0),
        ],
    )
}

fn depleted_product(id: Uuid) -> Value {
    product(
        id,
        vec![
            period(1, 100.0, 100.0, 0),
            period(2, 110.0, 110.0, 0),
            period(3, 95.0, 95.0, 0),
        ],
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["products_tracked"], 0);
}

#[tokio::test]
async fn test_consumption_analysis() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/analysis/consumption",
        Some(stocked_product(Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["pattern"], "stable");
    let aamc = body["metrics"]["aamc"].as_f64().unwrap();
    assert!((aamc - 305.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_forecast_rejects_invalid_alpha() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/analysis/forecast",
        Some(json!({
            "product": stocked_product(Uuid::new_v4()),
            "options": { "alpha": 1.5 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_forecast_rejects_inconsistent_balance() {
    let (app, _) = app();
    let mut bad = period(1, 400.0, 100.0, 0);
    bad["ending_balance"] = json!(250.0);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/analysis/forecast",
        Some(json!({ "product": product(Uuid::new_v4(), vec![bad]) })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_forecast_moving_average() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/analysis/forecast",
        Some(json!({
            "product": stocked_product(Uuid::new_v4()),
            "options": { "method": "moving_average", "horizon": 4 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "moving_average");
    assert_eq!(body["predicted_consumption"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["parameters"]["service_level"], 0.99);
}

#[tokio::test]
async fn test_recompute_then_status() {
    let (app, _) = app();
    let id = Uuid::new_v4();

    let (status, _) = send(&app, "GET", &format!("/api/v1/products/{}/status", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/products/recompute",
        Some(json!({ "product": stocked_product(id) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["status"], "adequate");
    assert_eq!(body["alerts"].as_array().map(Vec::len), Some(0));

    let (status, body) = send(&app, "GET", &format!("/api/v1/products/{}/status", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_stock"], 305.0);
}

#[tokio::test]
async fn test_stock_out_alert_lifecycle() {
    let (app, state) = app();
    let id = Uuid::new_v4();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/products/recompute",
        Some(json!({ "product": depleted_product(id) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["status"], "critical");
    let alerts = body["alerts"].as_array().cloned().unwrap_or_default();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "stock_out");
    assert_eq!(alerts[0]["level"], "critical");

    // recomputing replaces rather than accumulates open alerts
    send(
        &app,
        "POST",
        "/api/v1/products/recompute",
        Some(json!({ "product": depleted_product(id) })),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/v1/alerts/unacknowledged/count", None).await;
    assert_eq!(body["unacknowledged"], 1);

    let (_, listed) = send(&app, "GET", "/api/v1/alerts?level=critical&type=stock_out", None).await;
    let alert_id = listed[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/alerts/{}/acknowledge", alert_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.store.unacknowledged_count(), 0);

    let (_, acknowledged) = send(&app, "GET", "/api/v1/alerts?acknowledged=true", None).await;
    assert_eq!(acknowledged.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_acknowledge_unknown_alert_is_not_found() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/alerts/{}/acknowledge", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_acknowledge_product_alerts() {
    let (app, _) = app();
    let id = Uuid::new_v4();
    send(
        &app,
        "POST",
        "/api/v1/products/recompute",
        Some(json!({ "product": depleted_product(id) })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/products/{}/alerts/acknowledge", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], 1);
}

#[tokio::test]
async fn test_portfolio_metrics() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/portfolio/metrics",
        Some(json!({
            "products": [stocked_product(Uuid::new_v4()), depleted_product(Uuid::new_v4())]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_products"], 2);
    assert_eq!(body["status_counts"]["critical"], 1);
    assert_eq!(body["status_counts"]["adequate"], 1);
    assert_eq!(body["products_below_reorder_point"], 1);
    assert_eq!(state.store.product_count(), 2);
}

#[tokio::test]
async fn test_wastage_raises_expiring_alert() {
    let (app, _) = app();
    let id = Uuid::new_v4();
    let mut wasted = period(3, 400.0, 95.0, 0);
    wasted["expired_or_damaged"] = json!(60.0);
    wasted["ending_balance"] = json!(245.0);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/products/recompute",
        Some(json!({
            "product": product(
                id,
                vec![period(1, 400.0, 100.0, 0), period(2, 400.0, 110.0, 0), wasted]
            )
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = body["alerts"]
        .as_array()
        .map(|alerts| alerts.iter().filter_map(|a| a["type"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(types, vec!["expiring"]);
}
