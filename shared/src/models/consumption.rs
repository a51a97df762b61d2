//! Consumption profile models

use serde::{Deserialize, Serialize};

/// Shape of a product's consumption history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPattern {
    Stable,
    Increasing,
    Decreasing,
    Seasonal,
    Irregular,
}

impl std::fmt::Display for ConsumptionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumptionPattern::Stable => write!(f, "stable"),
            ConsumptionPattern::Increasing => write!(f, "increasing"),
            ConsumptionPattern::Decreasing => write!(f, "decreasing"),
            ConsumptionPattern::Seasonal => write!(f, "seasonal"),
            ConsumptionPattern::Irregular => write!(f, "irregular"),
        }
    }
}

/// Derived consumption statistics, recomputed from period history on demand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionMetrics {
    pub aamc: f64,
    pub amc: f64,
    pub pattern: ConsumptionPattern,
    pub seasonality_index: f64,
    /// Coefficient of variation, percent
    pub variability_coefficient: f64,
    /// Regression slope as percent of mean, per period
    pub trend: f64,
}

/// Trend/variability portion of [`ConsumptionMetrics`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PatternAnalysis {
    pub pattern: ConsumptionPattern,
    pub trend: f64,
    pub variability: f64,
}

impl PatternAnalysis {
    /// Result used when there are too few data points to analyse
    pub fn insufficient() -> Self {
        Self {
            pattern: ConsumptionPattern::Irregular,
            trend: 0.0,
            variability: 100.0,
        }
    }
}

/// Actionable advice attached to a consumption analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    HighVariability { variability: f64 },
    RaiseSafetyStock { trend: f64 },
    ReviewStockLevels { trend: f64 },
    SeasonalForecasting { seasonality_index: f64 },
    StockOutPeriods { count: usize },
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::HighVariability { variability } => write!(
                f,
                "High consumption variability ({:.1}%) - review ordering patterns",
                variability
            ),
            Recommendation::RaiseSafetyStock { trend } => write!(
                f,
                "Consumption rising {:.1}% per period - consider raising safety stock",
                trend
            ),
            Recommendation::ReviewStockLevels { trend } => write!(
                f,
                "Consumption falling {:.1}% per period - review stock levels to avoid expiry",
                trend.abs()
            ),
            Recommendation::SeasonalForecasting { seasonality_index } => write!(
                f,
                "Seasonal consumption detected (index {:.2}) - use seasonal forecasting",
                seasonality_index
            ),
            Recommendation::StockOutPeriods { count } => {
                write!(f, "{} period(s) with stock-outs recorded", count)
            }
        }
    }
}

/// Full output of analysing one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionAnalysis {
    pub metrics: ConsumptionMetrics,
    pub recommendations: Vec<Recommendation>,
    pub confidence: f64,
    /// Fraction of periods with positive consumption
    pub data_quality: f64,
}
