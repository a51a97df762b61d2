//! Stock health models

use serde::{Deserialize, Serialize};

/// Stock health bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Critical,
    Low,
    Adequate,
    Excess,
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockLevel::Critical => write!(f, "critical"),
            StockLevel::Low => write!(f, "low"),
            StockLevel::Adequate => write!(f, "adequate"),
            StockLevel::Excess => write!(f, "excess"),
        }
    }
}

/// Current stock position of one product, superseded on every recompute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockStatus {
    pub current_stock: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub max_stock: f64,
    pub days_of_stock: f64,
    pub status: StockLevel,
}

impl StockStatus {
    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.reorder_point
    }
}
