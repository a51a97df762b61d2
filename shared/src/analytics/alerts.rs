//! Alert generation and bookkeeping
//!
//! [`AlertEngine::generate_alerts`] turns one product's stock status and
//! consumption metrics into alerts. The free functions below implement the
//! replace/acknowledge/query rules on a caller-owned alert list.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::thresholds::AlertThresholds;
use crate::models::{
    AlertFilter, AlertLevel, AlertType, ConsumptionMetrics, PeriodRecord, StockAlert, StockLevel,
    StockStatus,
};

/// Fixed recommendation text per alert type
pub fn recommendation_for(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::StockOut => {
            "Place an emergency order and check for redistribution from nearby facilities"
        }
        AlertType::LowStock => {
            "Place a replenishment order now to restore stock above the reorder point"
        }
        AlertType::OverStock => {
            "Hold further orders and consider redistributing surplus before expiry"
        }
        AlertType::Expiring => "Review expiry dates and apply first-expiry-first-out issuing",
        AlertType::Forecast => "Review the demand forecast and adjust the next order quantity",
        AlertType::Consumption => "Investigate irregular consumption and verify reported issues",
    }
}

/// Alert generator
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    fn alert(
        product_id: Uuid,
        alert_type: AlertType,
        level: AlertLevel,
        message: String,
        current_stock: f64,
        threshold: Option<f64>,
        now: DateTime<Utc>,
    ) -> StockAlert {
        StockAlert {
            id: Uuid::new_v4(),
            product_id,
            alert_type,
            level,
            message,
            current_stock,
            threshold,
            recommendation: recommendation_for(alert_type).to_string(),
            timestamp: now,
            acknowledged: false,
            acknowledged_at: None,
        }
    }

    /// At most one stock-level alert, first match wins
    fn stock_level_alert(
        &self,
        product_id: Uuid,
        status: &StockStatus,
        now: DateTime<Utc>,
    ) -> Option<StockAlert> {
        let stock = status.current_stock;

        if stock <= 0.0 {
            return Some(Self::alert(
                product_id,
                AlertType::StockOut,
                AlertLevel::Critical,
                "Product is out of stock".to_string(),
                stock,
                None,
                now,
            ));
        }

        if status.status == StockLevel::Critical || stock <= status.reorder_point {
            return Some(Self::alert(
                product_id,
                AlertType::LowStock,
                AlertLevel::Critical,
                format!(
                    "Stock {:.0} is at or below the reorder point {:.0}",
                    stock, status.reorder_point
                ),
                stock,
                Some(status.reorder_point),
                now,
            ));
        }

        match status.status {
            StockLevel::Low => Some(Self::alert(
                product_id,
                AlertType::LowStock,
                AlertLevel::Warning,
                format!("Only {:.0} days of stock remaining", status.days_of_stock),
                stock,
                Some(status.safety_stock),
                now,
            )),
            StockLevel::Excess => Some(Self::alert(
                product_id,
                AlertType::OverStock,
                AlertLevel::Info,
                format!(
                    "{:.0} days of stock on hand exceeds the maximum level {:.0}",
                    status.days_of_stock, status.max_stock
                ),
                stock,
                Some(status.max_stock),
                now,
            )),
            StockLevel::Critical | StockLevel::Adequate => None,
        }
    }

    /// Alerts for one product in one recompute cycle
    pub fn generate_alerts(
        &self,
        product_id: Uuid,
        status: &StockStatus,
        metrics: &ConsumptionMetrics,
        latest_period: Option<&PeriodRecord>,
    ) -> Vec<StockAlert> {
        let now = Utc::now();
        let mut alerts: Vec<StockAlert> = self
            .stock_level_alert(product_id, status, now)
            .into_iter()
            .collect();

        if metrics.variability_coefficient > self.thresholds.anomaly_variability_pct {
            alerts.push(Self::alert(
                product_id,
                AlertType::Consumption,
                AlertLevel::Warning,
                format!(
                    "Consumption variability {:.1}% is unusually high",
                    metrics.variability_coefficient
                ),
                status.current_stock,
                Some(self.thresholds.anomaly_variability_pct),
                now,
            ));
        }

        if let Some(period) = latest_period {
            if period.wastage_rate > self.thresholds.expiry_wastage_pct {
                alerts.push(Self::alert(
                    product_id,
                    AlertType::Expiring,
                    AlertLevel::Warning,
                    format!(
                        "{:.1}% of available stock expired or damaged in {}",
                        period.wastage_rate, period.label
                    ),
                    status.current_stock,
                    Some(self.thresholds.expiry_wastage_pct),
                    now,
                ));
            }
        }

        tracing::debug!(%product_id, count = alerts.len(), "Generated alerts");
        alerts
    }
}

/// Replace a product's alert set with a fresh cycle
///
/// Unacknowledged alerts are dropped. Acknowledged alerts stay until they are
/// older than `retention`.
pub fn replace_cycle(
    existing: &mut Vec<StockAlert>,
    fresh: Vec<StockAlert>,
    retention: Duration,
    now: DateTime<Utc>,
) {
    existing.retain(|alert| alert.acknowledged && now - alert.timestamp <= retention);
    existing.extend(fresh);
}

/// Acknowledge the alert with `id`; false if no such alert
pub fn acknowledge(alerts: &mut [StockAlert], id: Uuid, now: DateTime<Utc>) -> bool {
    match alerts.iter_mut().find(|alert| alert.id == id) {
        Some(alert) => {
            if !alert.acknowledged {
                alert.acknowledged = true;
                alert.acknowledged_at = Some(now);
            }
            true
        }
        None => false,
    }
}

/// Most urgent first, then newest first
pub fn sort_by_priority(alerts: &mut [StockAlert]) {
    alerts.sort_by(|a, b| {
        b.level
            .priority()
            .cmp(&a.level.priority())
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
}

/// Matching alerts in priority order
pub fn query<'a>(
    alerts: impl IntoIterator<Item = &'a StockAlert>,
    filter: &AlertFilter,
) -> Vec<StockAlert> {
    let mut matching: Vec<StockAlert> = alerts
        .into_iter()
        .filter(|alert| filter.matches(alert))
        .cloned()
        .collect();
    sort_by_priority(&mut matching);
    matching
}
