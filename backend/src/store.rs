//! In-memory alert and status store
//!
//! One entry per product. A recompute cycle holds the product's entry lock
//! while it swaps the status and alert set, so concurrent recomputes for the
//! same product serialize and different products do not contend.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use shared::{alerts, AlertFilter, StockAlert, StockStatus};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct ProductEntry {
    status: Option<StockStatus>,
    alerts: Vec<StockAlert>,
}

/// Latest statuses and live alerts, keyed by product id
#[derive(Debug)]
pub struct AnalyticsStore {
    products: DashMap<Uuid, ProductEntry>,
    retention: Duration,
}

impl AnalyticsStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            products: DashMap::new(),
            retention,
        }
    }

    /// Record one recompute cycle and return the product's alerts afterwards
    pub fn record_cycle(
        &self,
        product_id: Uuid,
        status: StockStatus,
        fresh: Vec<StockAlert>,
        now: DateTime<Utc>,
    ) -> Vec<StockAlert> {
        let mut entry = self.products.entry(product_id).or_default();
        entry.status = Some(status);
        alerts::replace_cycle(&mut entry.alerts, fresh, self.retention, now);

        let mut current = entry.alerts.clone();
        alerts::sort_by_priority(&mut current);
        current
    }

    pub fn status(&self, product_id: Uuid) -> Option<StockStatus> {
        self.products
            .get(&product_id)
            .and_then(|entry| entry.status.clone())
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Alerts across all products matching `filter`, most urgent first
    pub fn alerts(&self, filter: &AlertFilter) -> Vec<StockAlert> {
        let mut matching: Vec<StockAlert> = self
            .products
            .iter()
            .flat_map(|entry| alerts::query(&entry.alerts, filter))
            .collect();
        alerts::sort_by_priority(&mut matching);
        matching
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.products
            .iter()
            .map(|entry| entry.alerts.iter().filter(|a| !a.acknowledged).count())
            .sum()
    }

    /// Acknowledge one alert wherever it lives; false if the id is unknown
    pub fn acknowledge(&self, alert_id: Uuid, now: DateTime<Utc>) -> bool {
        self.products
            .iter_mut()
            .any(|mut entry| alerts::acknowledge(&mut entry.alerts, alert_id, now))
    }

    /// Acknowledge every open alert of a product, returning how many changed
    pub fn acknowledge_product(&self, product_id: Uuid, now: DateTime<Utc>) -> usize {
        let Some(mut entry) = self.products.get_mut(&product_id) else {
            return 0;
        };

        let mut changed = 0;
        for alert in entry.alerts.iter_mut().filter(|a| !a.acknowledged) {
            alert.acknowledged = true;
            alert.acknowledged_at = Some(now);
            changed += 1;
        }
        changed
    }
}

impl Default for AnalyticsStore {
    fn default() -> Self {
        Self::new(Duration::days(30))
    }
}
