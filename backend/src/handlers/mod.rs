//! HTTP handlers for the stock analytics server

pub mod alerts;
pub mod analytics;
pub mod health;
pub mod portfolio;

pub use alerts::*;
pub use analytics::*;
pub use health::*;
pub use portfolio::*;
