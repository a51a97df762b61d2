//! Validation utilities for period records
//!
//! The analytics engines assume validated, non-negative input. Import
//! collaborators run these checks before handing records over.

use thiserror::Error;

use crate::models::{PeriodRecord, ReportingFrequency};

/// Tolerance when comparing a reported ending balance to the derived one
pub const BALANCE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PeriodValidationError {
    #[error("{field} must be a finite, non-negative quantity (got {value})")]
    NegativeQuantity { field: &'static str, value: f64 },

    #[error("stock-out days {days} exceed the {limit}-day reporting period")]
    StockOutDaysExceeded { days: u32, limit: u32 },

    #[error("ending balance {reported} does not match derived balance {derived}")]
    EndingBalanceMismatch { reported: f64, derived: f64 },

    #[error("period {index} does not follow period {previous}")]
    OutOfOrder { previous: u32, index: u32 },
}

// ============================================================================
// Period Record Validations
// ============================================================================

/// Validate all quantities of a period are finite and non-negative
pub fn validate_quantities(period: &PeriodRecord) -> Result<(), PeriodValidationError> {
    let fields = [
        ("beginning_balance", period.beginning_balance),
        ("received", period.received),
        ("positive_adjustment", period.positive_adjustment),
        ("negative_adjustment", period.negative_adjustment),
        ("ending_balance", period.ending_balance),
        ("expired_or_damaged", period.expired_or_damaged),
        ("consumption_or_issue", period.consumption_or_issue),
    ];

    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(PeriodValidationError::NegativeQuantity { field, value });
        }
    }
    Ok(())
}

/// Validate stock-out days fit in the reporting period
pub fn validate_stock_out_days(
    days: u32,
    frequency: ReportingFrequency,
) -> Result<(), PeriodValidationError> {
    let limit = frequency.days_in_period();
    if days > limit {
        return Err(PeriodValidationError::StockOutDaysExceeded { days, limit });
    }
    Ok(())
}

/// Validate the reported ending balance matches the period's movements
pub fn validate_ending_balance(period: &PeriodRecord) -> Result<(), PeriodValidationError> {
    let derived = period.derive_ending_balance();
    if (period.ending_balance - derived).abs() > BALANCE_TOLERANCE {
        return Err(PeriodValidationError::EndingBalanceMismatch {
            reported: period.ending_balance,
            derived,
        });
    }
    Ok(())
}

/// Run every period check
pub fn validate_period_record(
    period: &PeriodRecord,
    frequency: ReportingFrequency,
) -> Result<(), PeriodValidationError> {
    validate_quantities(period)?;
    validate_stock_out_days(period.stock_out_days, frequency)?;
    validate_ending_balance(period)
}
