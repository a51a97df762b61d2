//! Portfolio metrics tests
//!
//! Tests for the portfolio rollup including:
//! - Status bucket counts and reorder flags
//! - Inventory value, turnover and stock-out frequency

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    ConsumptionAnalyzer, ForecastParams, ForecastingEngine, MetricsAggregator, PeriodRecord,
    Product, ProductEvaluation, ReportingFrequency, StockStatusEvaluator,
};

fn product(price: Decimal, entries: &[(f64, u32)], closing: f64) -> Product {
    let mut product = Product::new("Zinc sulfate 20mg", "tablet", price);
    let last = entries.len().saturating_sub(1);
    product.periods = entries
        .iter()
        .enumerate()
        .map(|(i, &(c, stock_out_days))| {
            let opening = if i == last { closing + c } else { c };
            PeriodRecord::new(i as u32 + 1, format!("M{}", i + 1))
                .with_opening(opening, 0.0)
                .with_consumption(c)
                .with_stock_out_days(stock_out_days)
                .with_derived_balance()
        })
        .collect();
    product
}

fn evaluate(product: &Product) -> ProductEvaluation {
    StockStatusEvaluator::default().evaluate_product(
        &ConsumptionAnalyzer::default(),
        &ForecastingEngine::default(),
        product,
        &ForecastParams::default(),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use shared::StockLevel;

    /// Two products, one stocked out
    #[test]
    fn test_portfolio_rollup() {
        let stocked = product(Decimal::new(150, 2), &[(100.0, 0), (100.0, 0), (100.0, 0)], 300.0);
        let empty = product(Decimal::new(400, 2), &[(50.0, 0), (50.0, 0), (50.0, 10)], 0.0);

        let stocked_status = evaluate(&stocked).status;
        let empty_status = evaluate(&empty).status;
        assert_eq!(stocked_status.status, StockLevel::Adequate);
        assert_eq!(empty_status.status, StockLevel::Critical);

        let metrics = MetricsAggregator::default()
            .aggregate(vec![(&stocked, &stocked_status), (&empty, &empty_status)]);

        assert_eq!(metrics.total_products, 2);
        assert_eq!(metrics.status_counts.adequate, 1);
        assert_eq!(metrics.status_counts.critical, 1);
        assert_eq!(metrics.products_below_reorder_point, 1);
        assert_eq!(metrics.total_inventory_value, Decimal::new(450, 0));
        assert!((metrics.stock_out_frequency - 100.0 / 6.0).abs() < 1e-9);

        // 100*12*1.5 + 50*12*4 = 4200 per year over 225 average inventory
        assert!((metrics.turnover_rate - 4200.0 / 225.0).abs() < 1e-9);
    }

    /// Weekly reporters annualize over 52 periods
    #[test]
    fn test_turnover_uses_reporting_frequency() {
        let weekly = product(Decimal::ONE, &[(10.0, 0), (10.0, 0)], 20.0)
            .with_frequency(ReportingFrequency::Weekly);
        let status = evaluate(&weekly).status;

        let metrics = MetricsAggregator::default().aggregate(vec![(&weekly, &status)]);

        assert!((metrics.turnover_rate - 520.0 / 10.0).abs() < 1e-9);
    }

    /// Nothing on hand means no turnover rather than a division error
    #[test]
    fn test_zero_inventory_turnover() {
        let empty = product(Decimal::TEN, &[(10.0, 0)], 0.0);
        let status = evaluate(&empty).status;

        let metrics = MetricsAggregator::default().aggregate(vec![(&empty, &status)]);

        assert_eq!(metrics.total_inventory_value, Decimal::ZERO);
        assert_eq!(metrics.turnover_rate, 0.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn entry_strategy() -> impl Strategy<Value = (f64, u32)> {
        ((1u32..=400u32).prop_map(f64::from), prop_oneof![Just(0u32), 1u32..=30u32])
    }

    fn product_strategy() -> impl Strategy<Value = Product> {
        (
            (1i64..=10000i64).prop_map(|n| Decimal::new(n, 2)),
            prop::collection::vec(entry_strategy(), 1..12),
            (0u32..=3000u32).prop_map(f64::from),
        )
            .prop_map(|(price, entries, closing)| product(price, &entries, closing))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Bucket counts always add up to the product count
        #[test]
        fn prop_counts_add_up(products in prop::collection::vec(product_strategy(), 0..8)) {
            let statuses: Vec<_> = products.iter().map(|p| evaluate(p).status).collect();
            let metrics = MetricsAggregator::default()
                .aggregate(products.iter().zip(statuses.iter()));

            prop_assert_eq!(metrics.total_products, products.len());
            prop_assert_eq!(metrics.status_counts.total(), products.len());
            prop_assert!(metrics.products_below_reorder_point <= products.len());
            prop_assert!((0.0..=100.0).contains(&metrics.stock_out_frequency));
            prop_assert!(metrics.turnover_rate >= 0.0);
        }
    }
}
