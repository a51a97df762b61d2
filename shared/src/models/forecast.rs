//! Demand forecast models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Forecasting algorithm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    MovingAverage,
    #[default]
    ExponentialSmoothing,
    HoltWinters,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::ExponentialSmoothing => "exponential_smoothing",
            ForecastMethod::HoltWinters => "holt_winters",
        }
    }
}

/// Caller-supplied forecast options; unset fields take engine defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastParams {
    pub method: Option<ForecastMethod>,
    pub horizon: Option<usize>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub season_length: Option<usize>,
    pub window: Option<usize>,
    pub lead_time_days: Option<f64>,
    pub service_level: Option<f64>,
}

/// Parameters actually used to produce a forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastParameters {
    pub method: ForecastMethod,
    pub horizon: usize,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub season_length: usize,
    pub window: usize,
    pub lead_time_days: f64,
    pub service_level: f64,
}

/// Forecast with derived replenishment levels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub product_id: Uuid,
    pub method: ForecastMethod,
    /// One value per future period
    pub predicted_consumption: Vec<f64>,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub max_stock: f64,
    pub forecast_accuracy: f64,
    pub confidence: f64,
    pub parameters: ForecastParameters,
    pub generated_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Mean predicted consumption per period, 0 for an empty horizon
    pub fn average_forecast(&self) -> f64 {
        crate::analytics::stats::mean(&self.predicted_consumption)
    }
}
