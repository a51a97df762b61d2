//! Stock alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an alert is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    StockOut,
    LowStock,
    OverStock,
    Expiring,
    Forecast,
    Consumption,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::StockOut => "stock_out",
            AlertType::LowStock => "low_stock",
            AlertType::OverStock => "over_stock",
            AlertType::Expiring => "expiring",
            AlertType::Forecast => "forecast",
            AlertType::Consumption => "consumption",
        }
    }

    /// Stock-level alerts are mutually exclusive within one cycle
    pub fn is_stock_level(&self) -> bool {
        matches!(
            self,
            AlertType::StockOut | AlertType::LowStock | AlertType::OverStock
        )
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl AlertLevel {
    /// Sort rank, higher is more urgent
    pub fn priority(&self) -> u8 {
        match self {
            AlertLevel::Critical => 3,
            AlertLevel::Warning => 2,
            AlertLevel::Info => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::Warning => "warning",
            AlertLevel::Info => "info",
        }
    }
}

/// An actionable stock alert for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub level: AlertLevel,
    pub message: String,
    pub current_stock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    pub recommendation: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
}

/// Retrieval filter; unset fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlertFilter {
    pub level: Option<AlertLevel>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub acknowledged: Option<bool>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &StockAlert) -> bool {
        self.level.map_or(true, |level| alert.level == level)
            && self.alert_type.map_or(true, |t| alert.alert_type == t)
            && self
                .acknowledged
                .map_or(true, |ack| alert.acknowledged == ack)
    }
}
