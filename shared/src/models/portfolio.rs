//! Portfolio-level rollups

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product counts per stock level
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub critical: usize,
    pub low: usize,
    pub adequate: usize,
    pub excess: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.critical + self.low + self.adequate + self.excess
    }
}

/// Stock health across a product portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetrics {
    pub total_products: usize,
    pub status_counts: StatusCounts,
    pub total_inventory_value: Decimal,
    /// Annual consumption value over average inventory value
    pub turnover_rate: f64,
    /// Percent of reported periods with a stock-out
    pub stock_out_frequency: f64,
    pub products_below_reorder_point: usize,
}
