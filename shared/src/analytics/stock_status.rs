//! Stock status classification

use super::consumption::ConsumptionAnalyzer;
use super::forecasting::ForecastingEngine;
use super::stats::safe_ratio;
use super::thresholds::StockThresholds;
use crate::models::{
    ConsumptionAnalysis, ForecastParams, ForecastResult, Product, StockLevel, StockStatus,
};

/// Stateless stock health classifier
#[derive(Debug, Clone, Default)]
pub struct StockStatusEvaluator {
    thresholds: StockThresholds,
}

/// Everything one recompute produces for a product
#[derive(Debug, Clone)]
pub struct ProductEvaluation {
    pub analysis: ConsumptionAnalysis,
    pub forecast: ForecastResult,
    pub status: StockStatus,
}

impl StockStatusEvaluator {
    pub fn new(thresholds: StockThresholds) -> Self {
        Self { thresholds }
    }

    /// Days the current stock lasts at AAMC, 0 without consumption history
    pub fn days_of_stock(&self, current_stock: f64, aamc: f64) -> f64 {
        if aamc <= 0.0 {
            return 0.0;
        }
        safe_ratio(current_stock, aamc) * self.thresholds.days_per_month
    }

    pub fn classify(&self, current_stock: f64, days_of_stock: f64) -> StockLevel {
        if current_stock <= 0.0 || days_of_stock == 0.0 {
            StockLevel::Critical
        } else if days_of_stock < self.thresholds.low_days {
            StockLevel::Low
        } else if days_of_stock > self.thresholds.excess_days {
            StockLevel::Excess
        } else {
            StockLevel::Adequate
        }
    }

    pub fn evaluate(
        &self,
        current_stock: f64,
        aamc: f64,
        forecast: &ForecastResult,
    ) -> StockStatus {
        let days_of_stock = self.days_of_stock(current_stock, aamc);

        StockStatus {
            current_stock,
            safety_stock: forecast.safety_stock,
            reorder_point: forecast.reorder_point,
            max_stock: forecast.max_stock,
            days_of_stock,
            status: self.classify(current_stock, days_of_stock),
        }
    }

    /// Run analyzer, forecast and classification for one product
    pub fn evaluate_product(
        &self,
        analyzer: &ConsumptionAnalyzer,
        engine: &ForecastingEngine,
        product: &Product,
        params: &ForecastParams,
    ) -> ProductEvaluation {
        let analysis = analyzer.analyze_product(product);
        let forecast = engine.generate_forecast(product, params);
        let status = self.evaluate(product.current_stock(), analysis.metrics.aamc, &forecast);

        ProductEvaluation {
            analysis,
            forecast,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodRecord;
    use rust_decimal::Decimal;

    #[test]
    fn test_days_of_stock() {
        let evaluator = StockStatusEvaluator::default();
        assert_eq!(evaluator.days_of_stock(200.0, 100.0), 60.0);
        assert_eq!(evaluator.days_of_stock(200.0, 0.0), 0.0);
    }

    #[test]
    fn test_classification_bands() {
        let evaluator = StockStatusEvaluator::default();
        assert_eq!(evaluator.classify(0.0, 45.0), StockLevel::Critical);
        assert_eq!(evaluator.classify(50.0, 0.0), StockLevel::Critical);
        assert_eq!(evaluator.classify(50.0, 15.0), StockLevel::Low);
        assert_eq!(evaluator.classify(50.0, 30.0), StockLevel::Adequate);
        assert_eq!(evaluator.classify(50.0, 180.0), StockLevel::Adequate);
        assert_eq!(evaluator.classify(50.0, 181.0), StockLevel::Excess);
    }

    #[test]
    fn test_evaluate_product_pipeline() {
        let mut product = Product::new("Ceftriaxone 1g", "vial", Decimal::new(320, 2));
        for (i, c) in [100.0, 110.0, 95.0].iter().enumerate() {
            product
                .append_period(
                    PeriodRecord::new(i as u32 + 1, format!("M{}", i + 1))
                        .with_opening(400.0, 0.0)
                        .with_consumption(*c)
                        .with_derived_balance(),
                )
                .unwrap();
        }

        let evaluation = StockStatusEvaluator::default().evaluate_product(
            &ConsumptionAnalyzer::default(),
            &ForecastingEngine::default(),
            &product,
            &ForecastParams::default(),
        );

        // 305 units at ~101.67/month is ~90 days
        assert_eq!(evaluation.status.current_stock, 305.0);
        assert!((evaluation.status.days_of_stock - 90.0).abs() < 0.1);
        assert_eq!(evaluation.status.status, StockLevel::Adequate);
        assert_eq!(evaluation.status.reorder_point, evaluation.forecast.reorder_point);
    }
}
