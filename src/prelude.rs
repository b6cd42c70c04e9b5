//! Prelude module for meal_weather
//!
//! Re-exports the items needed for typical usage with a single
//! `use meal_weather::prelude::*;` statement.
//!
//! ```rust,no_run
//! use meal_weather::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let service = WeatherCacheService::from_settings(
//!         config.weather.provider,
//!         &config.ipma_settings(),
//!         config.cache_config(),
//!     )?;
//!
//!     let forecasts = service.get_forecasts_for_days(3).await;
//!     println!("{} forecasts, {:?}", forecasts.len(), service.get_statistics().await);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Service and its collaborators
pub use crate::app::{
    CacheConfig, CacheStatistics, Forecast, ForecastProvider, MockProvider, ProviderKind,
    WeatherCacheService,
};

// Configuration
pub use crate::config::AppConfig;
