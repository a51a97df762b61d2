//! Pharmaceutical Stock Analytics - Backend Service
//!
//! Runs the consumption, forecasting, stock status and alert engines over
//! submitted product snapshots and keeps the latest statuses and alerts in
//! memory.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::Engines;
pub use store::AnalyticsStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engines: Arc<Engines>,
    pub store: Arc<AnalyticsStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            engines: Arc::new(Engines::from_config(&config)),
            store: Arc::new(AnalyticsStore::new(config.alerts.retention())),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Pharmaceutical Stock Analytics API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
