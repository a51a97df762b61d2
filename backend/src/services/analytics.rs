//! Per-product analysis service: consumption, forecast and recompute cycles

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{
    AlertEngine, ConsumptionAnalysis, ConsumptionAnalyzer, ForecastMethod, ForecastParams,
    ForecastResult, ForecastingEngine, MetricsAggregator, Product, StockAlert, StockStatus,
    StockStatusEvaluator,
};
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::AnalyticsStore;

/// The analytics engines, configured once at startup
#[derive(Debug, Clone, Default)]
pub struct Engines {
    pub analyzer: ConsumptionAnalyzer,
    pub forecaster: ForecastingEngine,
    pub evaluator: StockStatusEvaluator,
    pub alerts: AlertEngine,
    pub aggregator: MetricsAggregator,
}

impl Engines {
    pub fn from_config(config: &Config) -> Self {
        let analyzer = ConsumptionAnalyzer::new(config.analysis.clone());
        Self {
            forecaster: ForecastingEngine::new(config.forecast.clone(), analyzer.clone()),
            evaluator: StockStatusEvaluator::new(config.stock.clone()),
            alerts: AlertEngine::new(config.alerts.thresholds()),
            aggregator: MetricsAggregator::new(analyzer.clone()),
            analyzer,
        }
    }
}

/// Forecast options accepted over HTTP
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ForecastOptions {
    pub method: Option<ForecastMethod>,
    #[validate(range(min = 1, max = 120))]
    pub horizon: Option<u32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub alpha: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub beta: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub gamma: Option<f64>,
    #[validate(range(min = 1, max = 52))]
    pub season_length: Option<u32>,
    #[validate(range(min = 1, max = 60))]
    pub window: Option<u32>,
    #[validate(range(min = 0.0, max = 365.0))]
    pub lead_time_days: Option<f64>,
    pub service_level: Option<f64>,
}

impl ForecastOptions {
    /// Validate and convert into engine params
    pub fn into_params(self) -> AppResult<ForecastParams> {
        self.validate()?;

        // z-score lookup only makes sense strictly inside (0, 1)
        if let Some(level) = self.service_level {
            if level <= 0.0 || level >= 1.0 {
                return Err(AppError::Validation {
                    field: "service_level".to_string(),
                    message: format!("Service level must be between 0 and 1, got {}", level),
                });
            }
        }

        Ok(ForecastParams {
            method: self.method,
            horizon: self.horizon.map(|v| v as usize),
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            season_length: self.season_length.map(|v| v as usize),
            window: self.window.map(|v| v as usize),
            lead_time_days: self.lead_time_days,
            service_level: self.service_level,
        })
    }
}

/// Input for forecast and recompute requests
#[derive(Debug, Deserialize)]
pub struct ProductForecastInput {
    pub product: Product,
    #[serde(default)]
    pub options: ForecastOptions,
}

/// Everything a recompute cycle produced for one product
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeOutcome {
    pub product_id: Uuid,
    pub analysis: ConsumptionAnalysis,
    pub forecast: ForecastResult,
    pub status: StockStatus,
    /// The product's alerts after the cycle, most urgent first
    pub alerts: Vec<StockAlert>,
}

/// Analysis service over the shared engines and store
#[derive(Clone)]
pub struct AnalyticsService {
    engines: Arc<Engines>,
    store: Arc<AnalyticsStore>,
}

impl AnalyticsService {
    pub fn new(engines: Arc<Engines>, store: Arc<AnalyticsStore>) -> Self {
        Self { engines, store }
    }

    /// Consumption profile for a submitted product
    pub fn analyze_consumption(&self, product: Product) -> AppResult<ConsumptionAnalysis> {
        let product = validated(product)?;
        let analysis = self.engines.analyzer.analyze_product(&product);

        tracing::info!(
            product_id = %product.id,
            pattern = %analysis.metrics.pattern,
            confidence = analysis.confidence,
            "Consumption analyzed"
        );

        Ok(analysis)
    }

    /// Forecast without touching the store
    pub fn forecast(&self, input: ProductForecastInput) -> AppResult<ForecastResult> {
        let params = input.options.into_params()?;
        let product = validated(input.product)?;
        let forecast = self.engines.forecaster.generate_forecast(&product, &params);

        tracing::info!(
            product_id = %product.id,
            method = forecast.method.as_str(),
            reorder_point = forecast.reorder_point,
            "Forecast generated"
        );

        Ok(forecast)
    }

    /// Full pipeline for one product; replaces its stored status and alerts
    pub fn recompute(&self, input: ProductForecastInput) -> AppResult<RecomputeOutcome> {
        let params = input.options.into_params()?;
        let product = validated(input.product)?;
        Ok(self.recompute_validated(&product, &params))
    }

    pub(crate) fn recompute_validated(
        &self,
        product: &Product,
        params: &ForecastParams,
    ) -> RecomputeOutcome {
        let engines = &self.engines;
        let evaluation = engines.evaluator.evaluate_product(
            &engines.analyzer,
            &engines.forecaster,
            product,
            params,
        );

        let fresh = engines.alerts.generate_alerts(
            product.id,
            &evaluation.status,
            &evaluation.analysis.metrics,
            product.latest_period(),
        );
        let alerts = self
            .store
            .record_cycle(product.id, evaluation.status.clone(), fresh, Utc::now());

        tracing::info!(
            product_id = %product.id,
            status = %evaluation.status.status,
            alerts = alerts.len(),
            "Product recomputed"
        );

        RecomputeOutcome {
            product_id: product.id,
            analysis: evaluation.analysis,
            forecast: evaluation.forecast,
            status: evaluation.status,
            alerts,
        }
    }

    /// Status from the latest recompute
    pub fn status(&self, product_id: Uuid) -> AppResult<StockStatus> {
        self.store
            .status(product_id)
            .ok_or_else(|| AppError::NotFound(format!("Stock status for product {}", product_id)))
    }
}

/// Re-append every period so ordering and balance checks run on submitted data
///
/// Wastage is recomputed from the reported quantities rather than trusted.
pub(crate) fn validated(mut product: Product) -> AppResult<Product> {
    let periods = std::mem::take(&mut product.periods);
    for mut period in periods {
        period.wastage_rate = period.derive_wastage_rate();
        product.append_period(period)?;
    }
    Ok(product)
}
