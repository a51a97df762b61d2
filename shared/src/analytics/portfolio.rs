//! Portfolio rollup of stock statuses

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::consumption::ConsumptionAnalyzer;
use super::stats::safe_ratio;
use crate::models::{PortfolioMetrics, Product, StatusCounts, StockLevel, StockStatus};

/// Pure aggregation over `(product, status)` pairs
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    analyzer: ConsumptionAnalyzer,
}

impl MetricsAggregator {
    pub fn new(analyzer: ConsumptionAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn aggregate<'a>(
        &self,
        portfolio: impl IntoIterator<Item = (&'a Product, &'a StockStatus)>,
    ) -> PortfolioMetrics {
        let mut status_counts = StatusCounts::default();
        let mut total_inventory_value = Decimal::ZERO;
        let mut annual_consumption_value = 0.0;
        let mut stock_out_periods = 0usize;
        let mut total_periods = 0usize;
        let mut products_below_reorder_point = 0usize;

        for (product, status) in portfolio {
            match status.status {
                StockLevel::Critical => status_counts.critical += 1,
                StockLevel::Low => status_counts.low += 1,
                StockLevel::Adequate => status_counts.adequate += 1,
                StockLevel::Excess => status_counts.excess += 1,
            }

            if status.needs_reorder() {
                products_below_reorder_point += 1;
            }

            total_inventory_value = saturating_add(
                total_inventory_value,
                stock_value(status.current_stock, product.unit_price),
            );

            let unit_price = product.unit_price.to_f64().unwrap_or(0.0);
            let aamc = self.analyzer.calculate_aamc(&product.periods);
            annual_consumption_value +=
                aamc * product.frequency.periods_per_year() as f64 * unit_price;

            stock_out_periods += product.periods.iter().filter(|p| p.has_stock_out()).count();
            total_periods += product.periods.len();
        }

        let average_inventory_value = total_inventory_value.to_f64().unwrap_or(0.0) / 2.0;

        PortfolioMetrics {
            total_products: status_counts.total(),
            status_counts,
            total_inventory_value,
            turnover_rate: safe_ratio(annual_consumption_value, average_inventory_value),
            stock_out_frequency: safe_ratio(stock_out_periods as f64, total_periods as f64) * 100.0,
            products_below_reorder_point,
        }
    }
}

/// `stock × unit_price`, clamped to `Decimal::MAX` when it does not fit
fn stock_value(current_stock: f64, unit_price: Decimal) -> Decimal {
    let value = Decimal::try_from(current_stock)
        .ok()
        .and_then(|stock| stock.checked_mul(unit_price));

    value.unwrap_or_else(|| {
        tracing::warn!(current_stock, %unit_price, "Inventory value overflowed, saturating");
        Decimal::MAX
    })
}

fn saturating_add(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        tracing::warn!(%total, %value, "Portfolio inventory value overflowed, saturating");
        Decimal::MAX
    })
}
