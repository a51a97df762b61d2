//! HTTP handlers for consumption analysis, forecasting and recompute endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{ConsumptionAnalysis, ForecastResult, Product, StockStatus};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::analytics::{AnalyticsService, ProductForecastInput, RecomputeOutcome};
use crate::AppState;

fn service(state: &AppState) -> AnalyticsService {
    AnalyticsService::new(state.engines.clone(), state.store.clone())
}

/// Analyze consumption for a submitted product
pub async fn analyze_consumption(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> AppResult<Json<ConsumptionAnalysis>> {
    let analysis = service(&state).analyze_consumption(product)?;
    Ok(Json(analysis))
}

/// Forecast demand for a submitted product
pub async fn generate_forecast(
    State(state): State<AppState>,
    Json(input): Json<ProductForecastInput>,
) -> AppResult<Json<ForecastResult>> {
    let forecast = service(&state).forecast(input)?;
    Ok(Json(forecast))
}

/// Run the full pipeline and store the resulting status and alerts
pub async fn recompute_product(
    State(state): State<AppState>,
    Json(input): Json<ProductForecastInput>,
) -> AppResult<Json<RecomputeOutcome>> {
    let outcome = service(&state).recompute(input)?;
    Ok(Json(outcome))
}

/// Get the latest stored stock status for a product
pub async fn get_stock_status(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<StockStatus>> {
    let status = service(&state).status(product_id)?;
    Ok(Json(status))
}
