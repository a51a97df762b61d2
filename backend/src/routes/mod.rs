//! Route definitions for the stock analytics server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/analysis", analysis_routes())
        .nest("/products", product_routes())
        .merge(alert_routes())
        .route("/portfolio/metrics", post(handlers::portfolio_metrics))
}

/// Stateless analysis routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/consumption", post(handlers::analyze_consumption))
        .route("/forecast", post(handlers::generate_forecast))
}

/// Per-product recompute and status routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/recompute", post(handlers::recompute_product))
        .route("/:id/status", get(handlers::get_stock_status))
        .route("/:id/alerts/acknowledge", post(handlers::acknowledge_product_alerts))
}

/// Alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(handlers::list_alerts))
        .route("/alerts/unacknowledged/count", get(handlers::unacknowledged_count))
        .route("/alerts/:id/acknowledge", post(handlers::acknowledge_alert))
}
