//! Shared types, models and analytics engines for pharmaceutical stock analytics
//!
//! This crate contains everything that does not touch I/O: the period and
//! product model, validation, and the consumption/forecast/status/alert/
//! portfolio engines used by the backend service and the WASM bindings.

pub mod analytics;
pub mod models;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use models::*;
pub use types::*;
pub use validation::*;
