//! Alert retrieval and acknowledgement

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{AlertFilter, StockAlert};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::AnalyticsStore;

#[derive(Debug, Clone, Serialize)]
pub struct AlertCount {
    pub unacknowledged: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcknowledgeSummary {
    pub product_id: Uuid,
    pub acknowledged: usize,
}

#[derive(Clone)]
pub struct AlertService {
    store: Arc<AnalyticsStore>,
}

impl AlertService {
    pub fn new(store: Arc<AnalyticsStore>) -> Self {
        Self { store }
    }

    pub fn list(&self, filter: &AlertFilter) -> Vec<StockAlert> {
        self.store.alerts(filter)
    }

    pub fn unacknowledged_count(&self) -> AlertCount {
        AlertCount {
            unacknowledged: self.store.unacknowledged_count(),
        }
    }

    pub fn acknowledge(&self, alert_id: Uuid) -> AppResult<()> {
        if !self.store.acknowledge(alert_id, Utc::now()) {
            return Err(AppError::NotFound(format!("Alert {}", alert_id)));
        }

        tracing::info!(%alert_id, "Alert acknowledged");
        Ok(())
    }

    pub fn acknowledge_product(&self, product_id: Uuid) -> AcknowledgeSummary {
        let acknowledged = self.store.acknowledge_product(product_id, Utc::now());
        tracing::info!(%product_id, acknowledged, "Product alerts acknowledged");

        AcknowledgeSummary {
            product_id,
            acknowledged,
        }
    }
}
