//! Periodic inventory report models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a facility reports stock for a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportingFrequency {
    Weekly,
    #[default]
    Monthly,
    Bimonthly,
    Quarterly,
    Biannual,
    Annual,
}

impl ReportingFrequency {
    /// Calendar length of one reporting period, in days
    pub fn days_in_period(&self) -> u32 {
        match self {
            ReportingFrequency::Weekly => 7,
            ReportingFrequency::Monthly => 30,
            ReportingFrequency::Bimonthly => 60,
            ReportingFrequency::Quarterly => 90,
            ReportingFrequency::Biannual => 180,
            ReportingFrequency::Annual => 365,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            ReportingFrequency::Weekly => 52,
            ReportingFrequency::Monthly => 12,
            ReportingFrequency::Bimonthly => 6,
            ReportingFrequency::Quarterly => 4,
            ReportingFrequency::Biannual => 2,
            ReportingFrequency::Annual => 1,
        }
    }

    /// One year of periods, used as the Holt-Winters season length
    pub fn default_season_length(&self) -> usize {
        self.periods_per_year() as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingFrequency::Weekly => "weekly",
            ReportingFrequency::Monthly => "monthly",
            ReportingFrequency::Bimonthly => "bimonthly",
            ReportingFrequency::Quarterly => "quarterly",
            ReportingFrequency::Biannual => "biannual",
            ReportingFrequency::Annual => "annual",
        }
    }
}

/// One reporting interval for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PeriodRecord {
    /// Chronological ordinal within the product history
    pub index: u32,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub beginning_balance: f64,
    pub received: f64,
    pub positive_adjustment: f64,
    pub negative_adjustment: f64,
    pub ending_balance: f64,
    /// Bounded by the period's calendar length (e.g. 90 for a quarter)
    pub stock_out_days: u32,
    pub expired_or_damaged: f64,
    pub consumption_or_issue: f64,
    /// AAMC reported for this period
    #[serde(default)]
    pub aamc: f64,
    /// Percentage of available stock lost to expiry or damage
    #[serde(default)]
    pub wastage_rate: f64,
}

impl PeriodRecord {
    pub fn new(index: u32, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            ..Default::default()
        }
    }

    /// Closing balance implied by the period's movements, never negative
    pub fn derive_ending_balance(&self) -> f64 {
        let balance = self.beginning_balance + self.received + self.positive_adjustment
            - self.negative_adjustment
            - self.consumption_or_issue
            - self.expired_or_damaged;
        balance.max(0.0)
    }

    /// Stock available for issue during the period
    pub fn available_stock(&self) -> f64 {
        (self.beginning_balance + self.received + self.positive_adjustment
            - self.negative_adjustment)
            .max(0.0)
    }

    /// Expired or damaged stock as a percentage of available stock
    pub fn derive_wastage_rate(&self) -> f64 {
        let available = self.available_stock();
        if available > 0.0 {
            self.expired_or_damaged / available * 100.0
        } else {
            0.0
        }
    }

    /// Store the derived ending balance and wastage rate
    pub fn with_derived_balance(mut self) -> Self {
        self.ending_balance = self.derive_ending_balance();
        self.wastage_rate = self.derive_wastage_rate();
        self
    }

    pub fn with_opening(mut self, beginning_balance: f64, received: f64) -> Self {
        self.beginning_balance = beginning_balance;
        self.received = received;
        self
    }

    pub fn with_consumption(mut self, consumption: f64) -> Self {
        self.consumption_or_issue = consumption;
        self
    }

    pub fn with_stock_out_days(mut self, days: u32) -> Self {
        self.stock_out_days = days;
        self
    }

    pub fn with_losses(mut self, expired_or_damaged: f64) -> Self {
        self.expired_or_damaged = expired_or_damaged;
        self
    }

    pub fn with_adjustments(mut self, positive: f64, negative: f64) -> Self {
        self.positive_adjustment = positive;
        self.negative_adjustment = negative;
        self
    }

    pub fn has_stock_out(&self) -> bool {
        self.stock_out_days > 0
    }

    pub fn has_consumption(&self) -> bool {
        self.consumption_or_issue > 0.0
    }
}
