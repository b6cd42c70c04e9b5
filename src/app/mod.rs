//! Core forecast cache logic
//!
//! This module contains the forecast models, the date-keyed cache, the
//! forecast providers, the clock, and the cache-aside service that ties them
//! together.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use meal_weather::app::{CacheConfig, MockProvider, WeatherCacheService};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let service = WeatherCacheService::new(Arc::new(MockProvider::new()), CacheConfig::default());
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let forecast = service.get_forecast(date).await;
//! println!("{}: {}", date, forecast.description);
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod clock;
pub mod models;
pub mod provider;
pub mod service;

// Re-export main public API
pub use cache::{CacheConfig, CacheStatistics, ForecastStore};
pub use client::{ClientConfig, HttpHandler};
pub use clock::{Clock, ManualClock, SystemClock};
pub use models::{CacheEntry, Forecast};
pub use provider::{
    build_provider, ForecastProvider, IpmaProvider, IpmaSettings, MockProvider, ProviderKind,
};
pub use service::WeatherCacheService;
