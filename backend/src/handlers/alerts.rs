//! HTTP handlers for alert endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{AlertFilter, StockAlert};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::alerts::{AcknowledgeSummary, AlertCount, AlertService};
use crate::AppState;

/// List alerts matching the query filter, most urgent first
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> Json<Vec<StockAlert>> {
    let service = AlertService::new(state.store);
    Json(service.list(&filter))
}

/// Count unacknowledged alerts
pub async fn unacknowledged_count(State(state): State<AppState>) -> Json<AlertCount> {
    let service = AlertService::new(state.store);
    Json(service.unacknowledged_count())
}

/// Acknowledge a single alert
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = AlertService::new(state.store);
    service.acknowledge(alert_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Acknowledge every open alert of a product
pub async fn acknowledge_product_alerts(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Json<AcknowledgeSummary> {
    let service = AlertService::new(state.store);
    Json(service.acknowledge_product(product_id))
}
