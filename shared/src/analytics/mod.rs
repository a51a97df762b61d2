//! Analytics engines
//!
//! Pipeline for one product: `ConsumptionAnalyzer` → `ForecastingEngine` →
//! `StockStatusEvaluator` → `AlertEngine`. `MetricsAggregator` fans in over
//! a portfolio. Everything here is synchronous and pure.

pub mod alerts;
pub mod consumption;
pub mod forecasting;
pub mod portfolio;
pub mod stats;
pub mod stock_status;
pub mod thresholds;

pub use alerts::AlertEngine;
pub use consumption::ConsumptionAnalyzer;
pub use forecasting::ForecastingEngine;
pub use portfolio::MetricsAggregator;
pub use stock_status::{ProductEvaluation, StockStatusEvaluator};
pub use thresholds::{AlertThresholds, AnalysisThresholds, ForecastDefaults, StockThresholds};
