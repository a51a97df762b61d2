//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PeriodRecord, ReportingFrequency};
use crate::validation::{validate_period_record, PeriodValidationError};

/// VEN criticality classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VenClass {
    Vital,
    #[default]
    Essential,
    NonEssential,
}

impl VenClass {
    /// Service level used to size safety stock when the caller gives none
    pub fn default_service_level(&self) -> f64 {
        match self {
            VenClass::Vital => 0.99,
            VenClass::Essential => 0.95,
            VenClass::NonEssential => 0.90,
        }
    }
}

impl std::fmt::Display for VenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenClass::Vital => write!(f, "Vital"),
            VenClass::Essential => write!(f, "Essential"),
            VenClass::NonEssential => write!(f, "Non-essential"),
        }
    }
}

/// A pharmaceutical product with its reporting history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub classification: VenClass,
    #[serde(default)]
    pub frequency: ReportingFrequency,
    /// Chronological, append-only
    #[serde(default)]
    pub periods: Vec<PeriodRecord>,
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit: unit.into(),
            unit_price,
            classification: VenClass::default(),
            frequency: ReportingFrequency::default(),
            periods: Vec::new(),
        }
    }

    pub fn with_classification(mut self, classification: VenClass) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_frequency(mut self, frequency: ReportingFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Validate and append a period after the current history
    pub fn append_period(&mut self, period: PeriodRecord) -> Result<(), PeriodValidationError> {
        validate_period_record(&period, self.frequency)?;

        if let Some(last) = self.periods.last() {
            if period.index <= last.index {
                return Err(PeriodValidationError::OutOfOrder {
                    previous: last.index,
                    index: period.index,
                });
            }
        }

        self.periods.push(period);
        Ok(())
    }

    /// Stock on hand: ending balance of the latest period
    pub fn current_stock(&self) -> f64 {
        self.periods.last().map(|p| p.ending_balance).unwrap_or(0.0)
    }

    pub fn latest_period(&self) -> Option<&PeriodRecord> {
        self.periods.last()
    }

    /// Consumption values in chronological order
    pub fn consumption_series(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.consumption_or_issue).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(index: u32, consumption: f64) -> PeriodRecord {
        PeriodRecord::new(index, format!("P{}", index))
            .with_opening(500.0, 0.0)
            .with_consumption(consumption)
            .with_derived_balance()
    }

    #[test]
    fn test_append_keeps_chronological_order() {
        let mut product = Product::new("Amoxicillin 500mg", "capsule", Decimal::new(150, 2));
        assert!(product.append_period(period(1, 100.0)).is_ok());
        assert!(product.append_period(period(2, 120.0)).is_ok());

        let err = product.append_period(period(2, 90.0)).unwrap_err();
        assert!(matches!(err, PeriodValidationError::OutOfOrder { previous: 2, index: 2 }));
        assert_eq!(product.periods.len(), 2);
    }

    #[test]
    fn test_current_stock_from_latest_period() {
        let mut product = Product::new("Paracetamol 500mg", "tablet", Decimal::ONE);
        assert_eq!(product.current_stock(), 0.0);

        product.append_period(period(1, 100.0)).unwrap();
        product.append_period(period(2, 300.0)).unwrap();
        assert_eq!(product.current_stock(), 200.0);
        assert_eq!(product.consumption_series(), vec![100.0, 300.0]);
    }

    #[test]
    fn test_ven_service_levels() {
        assert!(
            VenClass::Vital.default_service_level() > VenClass::Essential.default_service_level()
        );
        assert!(
            VenClass::Essential.default_service_level()
                > VenClass::NonEssential.default_service_level()
        );
    }
}
