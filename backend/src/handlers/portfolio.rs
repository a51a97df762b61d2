//! HTTP handlers for portfolio metrics

use axum::{extract::State, Json};
use shared::PortfolioMetrics;

use crate::error::AppResult;
use crate::services::portfolio::{PortfolioInput, PortfolioService};
use crate::AppState;

/// Recompute submitted products and aggregate their statuses
pub async fn portfolio_metrics(
    State(state): State<AppState>,
    Json(input): Json<PortfolioInput>,
) -> AppResult<Json<PortfolioMetrics>> {
    let service = PortfolioService::new(state.engines, state.store);
    let metrics = service.metrics(input)?;
    Ok(Json(metrics))
}
