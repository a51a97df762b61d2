//! Portfolio metrics across submitted products

use std::sync::Arc;

use serde::Deserialize;
use shared::{PortfolioMetrics, Product};

use crate::error::AppResult;
use crate::services::analytics::{validated, AnalyticsService, Engines, ForecastOptions};
use crate::store::AnalyticsStore;

/// Input for a portfolio rollup
#[derive(Debug, Deserialize)]
pub struct PortfolioInput {
    pub products: Vec<Product>,
    #[serde(default)]
    pub options: ForecastOptions,
}

#[derive(Clone)]
pub struct PortfolioService {
    engines: Arc<Engines>,
    analytics: AnalyticsService,
}

impl PortfolioService {
    pub fn new(engines: Arc<Engines>, store: Arc<AnalyticsStore>) -> Self {
        Self {
            analytics: AnalyticsService::new(engines.clone(), store),
            engines,
        }
    }

    /// Recompute every product, then aggregate the fresh statuses
    pub fn metrics(&self, input: PortfolioInput) -> AppResult<PortfolioMetrics> {
        let params = input.options.into_params()?;
        let products = input
            .products
            .into_iter()
            .map(validated)
            .collect::<AppResult<Vec<_>>>()?;

        let statuses: Vec<_> = products
            .iter()
            .map(|product| self.analytics.recompute_validated(product, &params).status)
            .collect();

        let metrics = self
            .engines
            .aggregator
            .aggregate(products.iter().zip(statuses.iter()));

        tracing::info!(
            products = metrics.total_products,
            critical = metrics.status_counts.critical,
            below_reorder = metrics.products_below_reorder_point,
            "Portfolio metrics computed"
        );

        Ok(metrics)
    }
}
