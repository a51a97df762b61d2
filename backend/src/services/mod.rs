//! Business logic services for the stock analytics server

pub mod alerts;
pub mod analytics;
pub mod portfolio;

pub use alerts::AlertService;
pub use analytics::{AnalyticsService, Engines};
pub use portfolio::PortfolioService;
