//! WebAssembly module for Pharmaceutical Stock Analytics
//!
//! Provides client-side computation for:
//! - Consumption analysis and forecasting
//! - Stock status classification
//! - Safety stock sizing
//! - Offline period validation

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{ConsumptionAnalyzer, ForecastingEngine, StockStatusEvaluator};

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_product(product_json: &str) -> Result<Product, JsValue> {
    serde_json::from_str(product_json).map_err(|e| js_error("Invalid product JSON", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

/// Analyze a product's consumption history, returning `ConsumptionAnalysis` JSON
#[wasm_bindgen]
pub fn analyze_consumption(product_json: &str) -> Result<String, JsValue> {
    let product = parse_product(product_json)?;
    to_json(&ConsumptionAnalyzer::default().analyze_product(&product))
}

/// Forecast a product, returning `ForecastResult` JSON
///
/// `params_json` may be empty to use the defaults.
#[wasm_bindgen]
pub fn forecast_product(product_json: &str, params_json: &str) -> Result<String, JsValue> {
    let product = parse_product(product_json)?;
    let params: ForecastParams = if params_json.trim().is_empty() {
        ForecastParams::default()
    } else {
        serde_json::from_str(params_json).map_err(|e| js_error("Invalid params JSON", e))?
    };

    to_json(&ForecastingEngine::default().generate_forecast(&product, &params))
}

/// Classify stock health from stock on hand and AAMC
#[wasm_bindgen]
pub fn classify_stock_status(current_stock: f64, aamc: f64) -> String {
    let evaluator = StockStatusEvaluator::default();
    let days = evaluator.days_of_stock(current_stock, aamc);
    format!("{}", evaluator.classify(current_stock, days))
}

/// Safety stock for a consumption series
#[wasm_bindgen]
pub fn calculate_safety_stock(consumption: &[f64], lead_time_days: f64, service_level: f64) -> f64 {
    ForecastingEngine::default().calculate_safety_stock(consumption, lead_time_days, service_level)
}

/// Flat moving-average forecast
#[wasm_bindgen]
pub fn moving_average_forecast(consumption: &[f64], window: usize, horizon: usize) -> Vec<f64> {
    ForecastingEngine::default().moving_average_forecast(consumption, window, horizon)
}

#[derive(Serialize)]
struct PeriodValidation {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate one period record before it is queued for sync
///
/// Returns `{"valid": true}` or `{"valid": false, "error": "..."}`.
#[wasm_bindgen]
pub fn validate_period_json(period_json: &str, frequency: &str) -> String {
    let result = serde_json::from_str::<PeriodRecord>(period_json)
        .map_err(|e| format!("Invalid period JSON: {}", e))
        .and_then(|period| {
            let frequency: ReportingFrequency =
                serde_json::from_value(serde_json::Value::String(frequency.to_string()))
                    .map_err(|_| format!("Unknown reporting frequency: {}", frequency))?;
            validate_period_record(&period, frequency).map_err(|e| e.to_string())
        });

    let validation = match result {
        Ok(()) => PeriodValidation {
            valid: true,
            error: None,
        },
        Err(error) => PeriodValidation {
            valid: false,
            error: Some(error),
        },
    };

    serde_json::to_string(&validation).unwrap_or_else(|_| r#"{"valid":false}"#.to_string())
}
