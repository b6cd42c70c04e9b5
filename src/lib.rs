//! meal_weather library
//!
//! Weather forecasts for meal dates behind a date-keyed, TTL-bounded
//! in-memory cache. Forecasts come from the IPMA open-data API or from a
//! deterministic generator, and every failure degrades to a usable forecast.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
