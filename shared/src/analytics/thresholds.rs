//! Tunable thresholds for the analytics engines
//!
//! Defaults match the values used in facility reporting; the backend config
//! layer deserializes overrides into these structs.

use serde::{Deserialize, Serialize};

use crate::models::ForecastMethod;

/// Consumption pattern classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisThresholds {
    /// Coefficient of variation (%) above which consumption is irregular
    pub irregular_variability_pct: f64,
    /// |trend| (%/period) below which consumption is stable
    pub stable_trend_pct: f64,
    /// trend (%/period) beyond which consumption is increasing/decreasing
    pub directional_trend_pct: f64,
    /// Half-length-lag autocorrelation above which consumption is seasonal
    pub seasonal_autocorrelation: f64,
    /// Seasonality index above which seasonal forecasting is recommended
    pub seasonality_index_recommendation: f64,
    /// |trend| (%/period) that triggers safety-stock/stock-level advice
    pub steep_trend_pct: f64,
    pub min_pattern_points: usize,
    pub min_seasonality_points: usize,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            irregular_variability_pct: 50.0,
            stable_trend_pct: 5.0,
            directional_trend_pct: 5.0,
            seasonal_autocorrelation: 0.6,
            seasonality_index_recommendation: 0.3,
            steep_trend_pct: 20.0,
            min_pattern_points: 3,
            min_seasonality_points: 4,
        }
    }
}

/// Days-of-stock bands for status classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StockThresholds {
    pub low_days: f64,
    pub excess_days: f64,
    /// Days represented by one AAMC unit
    pub days_per_month: f64,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            low_days: 30.0,
            excess_days: 180.0,
            days_per_month: 30.0,
        }
    }
}

/// Alert triggers outside the stock-level chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertThresholds {
    /// Variability (%) that raises a consumption anomaly alert
    pub anomaly_variability_pct: f64,
    /// Latest-period wastage rate (%) that raises an expiry alert
    pub expiry_wastage_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            anomaly_variability_pct: 50.0,
            expiry_wastage_pct: 10.0,
        }
    }
}

/// Defaults applied to unset [`crate::models::ForecastParams`] fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastDefaults {
    pub method: ForecastMethod,
    pub horizon: usize,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub window: usize,
    pub lead_time_days: f64,
}

impl Default for ForecastDefaults {
    fn default() -> Self {
        Self {
            method: ForecastMethod::ExponentialSmoothing,
            horizon: 12,
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.1,
            window: 3,
            lead_time_days: 30.0,
        }
    }
}
