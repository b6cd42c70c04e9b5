//! In-memory forecast cache
//!
//! One entry per calendar date, checked for freshness on read. There is no
//! background sweep: a stale entry stays in place until the next lookup for
//! its date replaces it.
//!
//! # Module Organization
//!
//! - [`config`] - TTL and horizon settings
//! - [`store`] - Thread-safe date-keyed entry map
//! - [`stats`] - Hit/miss counters and the statistics report
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use meal_weather::app::cache::ForecastStore;
//! use meal_weather::app::models::Forecast;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = ForecastStore::new();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! store.put(date, Forecast::new("Sunny", 16.0, 22.0, "1%")).await;
//! assert!(store.get(date).await.is_some());
//! # }
//! ```

pub mod config;
pub mod stats;
pub mod store;

// Re-export main public API
pub use config::CacheConfig;
pub use stats::{CacheStatistics, LookupCounters};
pub use store::ForecastStore;
