//! Demand forecasting
//!
//! Three forecasting methods over a product's consumption series:
//!
//! - **Moving average**: flat average of the last `window` usable values
//! - **Exponential smoothing**: single smoothing, held flat over the horizon
//! - **Holt-Winters**: additive level/trend, multiplicative seasonality
//!
//! Plus safety-stock sizing and the reorder/max levels derived from them.
//! Short or empty histories produce zeros or a simpler method, never an error.

use chrono::Utc;
use tracing::debug;

use super::consumption::ConsumptionAnalyzer;
use super::stats::{mean, sample_std_dev};
use super::thresholds::ForecastDefaults;
use crate::models::{ForecastMethod, ForecastParameters, ForecastParams, ForecastResult, Product};
use crate::types::Analysis;

/// Confidence when the product has a usable AAMC
const CONFIDENCE_WITH_HISTORY: f64 = 0.8;
/// Confidence when it does not
const CONFIDENCE_WITHOUT_HISTORY: f64 = 0.3;
/// Days in the base period used to scale lead time
const LEAD_TIME_BASE_DAYS: f64 = 30.0;

/// Finite, non-negative values in their original order
fn usable(data: &[f64]) -> Vec<f64> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect()
}

/// Three-tier z-score for a service level
pub fn z_score(service_level: f64) -> f64 {
    if service_level >= 0.99 {
        2.326
    } else if service_level >= 0.95 {
        1.645
    } else {
        1.282
    }
}

/// Forecast and replenishment calculator
#[derive(Debug, Clone, Default)]
pub struct ForecastingEngine {
    defaults: ForecastDefaults,
    analyzer: ConsumptionAnalyzer,
}

impl ForecastingEngine {
    pub fn new(defaults: ForecastDefaults, analyzer: ConsumptionAnalyzer) -> Self {
        Self { defaults, analyzer }
    }

    pub fn defaults(&self) -> &ForecastDefaults {
        &self.defaults
    }

    pub fn analyzer(&self) -> &ConsumptionAnalyzer {
        &self.analyzer
    }

    /// Flat average of the last `window` usable values
    ///
    /// Returns zeros when fewer than `window` values are usable; partial
    /// windows are never averaged.
    pub fn moving_average_forecast(&self, data: &[f64], window: usize, horizon: usize) -> Vec<f64> {
        let values = usable(data);
        if window == 0 || values.len() < window {
            debug!(
                usable = values.len(),
                window, "Moving average window not filled, forecasting zero"
            );
            return vec![0.0; horizon];
        }

        let average = mean(&values[values.len() - window..]);
        vec![average; horizon]
    }

    /// Final smoothed level of `data`, seeded at the first usable value
    fn smoothed_level(values: &[f64], alpha: f64) -> Option<f64> {
        let (&first, rest) = values.split_first()?;
        Some(
            rest.iter()
                .fold(first, |level, &value| alpha * value + (1.0 - alpha) * level),
        )
    }

    /// Single exponential smoothing held flat across the horizon
    pub fn exponential_smoothing_forecast(
        &self,
        data: &[f64],
        alpha: f64,
        horizon: usize,
    ) -> Vec<f64> {
        let values = usable(data);
        let level = Self::smoothed_level(&values, alpha).unwrap_or(0.0);
        vec![level; horizon]
    }

    /// Triple exponential smoothing
    ///
    /// Needs two full seasons of usable data; otherwise degrades to
    /// [`Self::exponential_smoothing_forecast`] with the same `alpha`.
    pub fn holt_winters_forecast(
        &self,
        data: &[f64],
        alpha: f64,
        beta: f64,
        gamma: f64,
        season_length: usize,
        horizon: usize,
    ) -> Vec<f64> {
        let values = usable(data);
        if season_length == 0 || values.len() < 2 * season_length {
            debug!(
                usable = values.len(),
                season_length, "Not enough seasons for Holt-Winters, using exponential smoothing"
            );
            return self.exponential_smoothing_forecast(&values, alpha, horizon);
        }

        let l = season_length;
        let first_season = mean(&values[..l]);
        let second_season = mean(&values[l..2 * l]);

        let mut level = first_season;
        let mut trend = (second_season - first_season) / l as f64;
        let mut seasonal = Self::initial_seasonal_indices(&values, l);

        for (t, &value) in values.iter().enumerate() {
            let slot = t % l;
            let season = seasonal[slot];
            let previous_level = level;

            let deseasonalized = if season > 0.0 { value / season } else { value };
            level = alpha * deseasonalized + (1.0 - alpha) * (level + trend);
            trend = beta * (level - previous_level) + (1.0 - beta) * trend;
            if level > 0.0 {
                seasonal[slot] = gamma * (value / level) + (1.0 - gamma) * season;
            }
        }

        let n = values.len();
        (0..horizon)
            .map(|i| {
                let index = seasonal[(n + i) % l];
                ((level + (i + 1) as f64 * trend) * index).max(0.0)
            })
            .collect()
    }

    /// Average ratio of each slot to its season mean over complete seasons
    fn initial_seasonal_indices(values: &[f64], season_length: usize) -> Vec<f64> {
        let seasons: Vec<&[f64]> = values
            .chunks_exact(season_length)
            .filter(|season| mean(season) > 0.0)
            .collect();

        if seasons.is_empty() {
            return vec![1.0; season_length];
        }

        (0..season_length)
            .map(|slot| {
                let ratios: Vec<f64> = seasons
                    .iter()
                    .map(|season| season[slot] / mean(season))
                    .collect();
                mean(&ratios)
            })
            .collect()
    }

    /// z × sample stdev × sqrt(lead time / 30), or insufficient below two points
    pub fn try_safety_stock(
        &self,
        data: &[f64],
        lead_time_days: f64,
        service_level: f64,
    ) -> Analysis<f64> {
        let values = usable(data);
        Analysis::require(2, values.len(), || {
            let lead_factor = (lead_time_days.max(0.0) / LEAD_TIME_BASE_DAYS).sqrt();
            z_score(service_level) * sample_std_dev(&values) * lead_factor
        })
    }

    pub fn calculate_safety_stock(
        &self,
        data: &[f64],
        lead_time_days: f64,
        service_level: f64,
    ) -> f64 {
        self.try_safety_stock(data, lead_time_days, service_level)
            .unwrap_or_default()
    }

    /// Fill unset params from engine defaults and the product's catalog data
    pub fn resolve_parameters(
        &self,
        product: &Product,
        params: &ForecastParams,
    ) -> ForecastParameters {
        let d = &self.defaults;
        ForecastParameters {
            method: params.method.unwrap_or(d.method),
            horizon: params.horizon.unwrap_or(d.horizon),
            alpha: params.alpha.unwrap_or(d.alpha),
            beta: params.beta.unwrap_or(d.beta),
            gamma: params.gamma.unwrap_or(d.gamma),
            season_length: params
                .season_length
                .unwrap_or_else(|| product.frequency.default_season_length()),
            window: params.window.unwrap_or(d.window),
            lead_time_days: params.lead_time_days.unwrap_or(d.lead_time_days),
            service_level: params
                .service_level
                .unwrap_or_else(|| product.classification.default_service_level()),
        }
    }

    /// Forecast a product and derive its replenishment levels
    pub fn generate_forecast(&self, product: &Product, params: &ForecastParams) -> ForecastResult {
        let parameters = self.resolve_parameters(product, params);
        let data = product.consumption_series();

        let predicted_consumption = match parameters.method {
            ForecastMethod::MovingAverage => {
                self.moving_average_forecast(&data, parameters.window, parameters.horizon)
            }
            ForecastMethod::ExponentialSmoothing => {
                self.exponential_smoothing_forecast(&data, parameters.alpha, parameters.horizon)
            }
            ForecastMethod::HoltWinters => self.holt_winters_forecast(
                &data,
                parameters.alpha,
                parameters.beta,
                parameters.gamma,
                parameters.season_length,
                parameters.horizon,
            ),
        };

        let average_forecast = mean(&predicted_consumption);
        let safety_stock =
            self.calculate_safety_stock(&data, parameters.lead_time_days, parameters.service_level);
        let reorder_point = average_forecast + safety_stock;
        let max_stock = reorder_point + 2.0 * average_forecast;

        let pattern = self.analyzer.analyze_consumption_pattern(&product.periods);
        let data_quality = self.analyzer.data_quality(&product.periods);
        let forecast_accuracy =
            ((data_quality + (1.0 - pattern.variability / 100.0)) / 2.0).clamp(0.0, 1.0);

        let aamc = self.analyzer.calculate_aamc(&product.periods);
        let confidence = if aamc > 0.0 {
            CONFIDENCE_WITH_HISTORY
        } else {
            CONFIDENCE_WITHOUT_HISTORY
        };

        debug!(
            product_id = %product.id,
            method = parameters.method.as_str(),
            average_forecast,
            safety_stock,
            reorder_point,
            "Generated forecast"
        );

        ForecastResult {
            product_id: product.id,
            method: parameters.method,
            predicted_consumption,
            safety_stock,
            reorder_point,
            max_stock,
            forecast_accuracy,
            confidence,
            parameters,
            generated_at: Utc::now(),
        }
    }
}
