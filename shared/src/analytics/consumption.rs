//! Consumption analysis
//!
//! Derives AAMC/AMC, trend, variability and seasonality from a product's
//! period history. Short histories never fail: they fall back to the
//! conservative defaults of [`PatternAnalysis::insufficient`] and zero.

use tracing::debug;

use super::stats::{lagged_correlation, linear_slope, mean, population_std_dev, safe_ratio};
use super::thresholds::AnalysisThresholds;
use crate::models::{
    ConsumptionAnalysis, ConsumptionMetrics, ConsumptionPattern, PatternAnalysis, PeriodRecord,
    Product, Recommendation,
};
use crate::types::Analysis;

/// Consumption profile calculator
#[derive(Debug, Clone, Default)]
pub struct ConsumptionAnalyzer {
    thresholds: AnalysisThresholds,
}

/// Positive consumption values in chronological order
fn positive_consumption(periods: &[PeriodRecord]) -> Vec<f64> {
    periods
        .iter()
        .filter(|p| p.has_consumption())
        .map(|p| p.consumption_or_issue)
        .collect()
}

impl ConsumptionAnalyzer {
    pub fn new(thresholds: AnalysisThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AnalysisThresholds {
        &self.thresholds
    }

    /// Mean consumption over periods with consumption and no stock-out
    pub fn try_aamc(&self, periods: &[PeriodRecord]) -> Analysis<f64> {
        let qualifying: Vec<f64> = periods
            .iter()
            .filter(|p| p.has_consumption() && !p.has_stock_out())
            .map(|p| p.consumption_or_issue)
            .collect();

        Analysis::require(1, qualifying.len(), || mean(&qualifying))
    }

    pub fn calculate_aamc(&self, periods: &[PeriodRecord]) -> f64 {
        self.try_aamc(periods).unwrap_or_default()
    }

    /// Mean consumption over every period with recorded consumption
    pub fn try_amc(&self, periods: &[PeriodRecord]) -> Analysis<f64> {
        let values = positive_consumption(periods);
        Analysis::require(1, values.len(), || mean(&values))
    }

    pub fn calculate_amc(&self, periods: &[PeriodRecord]) -> f64 {
        self.try_amc(periods).unwrap_or_default()
    }

    /// Classify the consumption pattern from trend and variability
    pub fn analyze_consumption_pattern(&self, periods: &[PeriodRecord]) -> PatternAnalysis {
        let values = positive_consumption(periods);
        if values.len() < self.thresholds.min_pattern_points {
            debug!(
                points = values.len(),
                required = self.thresholds.min_pattern_points,
                "Too few consumption points for pattern analysis"
            );
            return PatternAnalysis::insufficient();
        }

        let avg = mean(&values);
        let trend = safe_ratio(linear_slope(&values), avg) * 100.0;
        let variability = safe_ratio(population_std_dev(&values), avg) * 100.0;

        let pattern = self.classify(&values, trend, variability);

        PatternAnalysis {
            pattern,
            trend,
            variability,
        }
    }

    fn classify(&self, values: &[f64], trend: f64, variability: f64) -> ConsumptionPattern {
        let t = &self.thresholds;

        if variability > t.irregular_variability_pct {
            ConsumptionPattern::Irregular
        } else if trend.abs() < t.stable_trend_pct {
            ConsumptionPattern::Stable
        } else if trend > t.directional_trend_pct {
            ConsumptionPattern::Increasing
        } else if trend < -t.directional_trend_pct {
            ConsumptionPattern::Decreasing
        } else if lagged_correlation(values, values.len() / 2) > t.seasonal_autocorrelation {
            ConsumptionPattern::Seasonal
        } else {
            ConsumptionPattern::Stable
        }
    }

    /// Mean relative deviation from the mean over positive values
    pub fn try_seasonality_index(&self, periods: &[PeriodRecord]) -> Analysis<f64> {
        let values = positive_consumption(periods);
        Analysis::require(self.thresholds.min_seasonality_points, values.len(), || {
            let avg = mean(&values);
            let deviations: Vec<f64> = values
                .iter()
                .map(|v| safe_ratio((v - avg).abs(), avg))
                .collect();
            mean(&deviations)
        })
    }

    pub fn calculate_seasonality_index(&self, periods: &[PeriodRecord]) -> f64 {
        self.try_seasonality_index(periods).unwrap_or_default()
    }

    /// Fraction of periods with positive consumption
    pub fn data_quality(&self, periods: &[PeriodRecord]) -> f64 {
        let with_consumption = periods.iter().filter(|p| p.has_consumption()).count();
        safe_ratio(with_consumption as f64, periods.len() as f64)
    }

    pub fn consumption_metrics(&self, periods: &[PeriodRecord]) -> ConsumptionMetrics {
        let pattern = self.analyze_consumption_pattern(periods);

        ConsumptionMetrics {
            aamc: self.calculate_aamc(periods),
            amc: self.calculate_amc(periods),
            pattern: pattern.pattern,
            seasonality_index: self.calculate_seasonality_index(periods),
            variability_coefficient: pattern.variability,
            trend: pattern.trend,
        }
    }

    /// Full consumption profile with recommendations and confidence
    pub fn analyze_product(&self, product: &Product) -> ConsumptionAnalysis {
        let metrics = self.consumption_metrics(&product.periods);
        let data_quality = self.data_quality(&product.periods);
        let confidence =
            (data_quality * (1.0 - metrics.variability_coefficient / 100.0)).clamp(0.0, 1.0);
        let recommendations = self.recommendations(&metrics, &product.periods);

        debug!(
            product_id = %product.id,
            pattern = %metrics.pattern,
            aamc = metrics.aamc,
            confidence,
            "Analyzed consumption"
        );

        ConsumptionAnalysis {
            metrics,
            recommendations,
            confidence,
            data_quality,
        }
    }

    fn recommendations(
        &self,
        metrics: &ConsumptionMetrics,
        periods: &[PeriodRecord],
    ) -> Vec<Recommendation> {
        let t = &self.thresholds;
        let mut recommendations = Vec::new();

        if metrics.variability_coefficient > t.irregular_variability_pct {
            recommendations.push(Recommendation::HighVariability {
                variability: metrics.variability_coefficient,
            });
        }

        if metrics.pattern == ConsumptionPattern::Increasing && metrics.trend > t.steep_trend_pct {
            recommendations.push(Recommendation::RaiseSafetyStock {
                trend: metrics.trend,
            });
        }

        if metrics.pattern == ConsumptionPattern::Decreasing && metrics.trend < -t.steep_trend_pct
        {
            recommendations.push(Recommendation::ReviewStockLevels {
                trend: metrics.trend,
            });
        }

        if metrics.seasonality_index > t.seasonality_index_recommendation {
            recommendations.push(Recommendation::SeasonalForecasting {
                seasonality_index: metrics.seasonality_index,
            });
        }

        let stock_outs = periods.iter().filter(|p| p.has_stock_out()).count();
        if stock_outs > 0 {
            recommendations.push(Recommendation::StockOutPeriods { count: stock_outs });
        }

        recommendations
    }
}
