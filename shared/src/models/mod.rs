//! Domain models for pharmaceutical stock analytics

mod alert;
mod consumption;
mod forecast;
mod period;
mod portfolio;
mod product;
mod stock;

pub use alert::*;
pub use consumption::*;
pub use forecast::*;
pub use period::*;
pub use portfolio::*;
pub use product::*;
pub use stock::*;
