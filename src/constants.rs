//! Application constants for meal_weather
//!
//! This module centralizes the constants used throughout the crate,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Base URL of the daily forecast endpoint
    pub const API_URL: &str = "MEAL_WEATHER_API_URL";

    /// Location code appended to the base URL
    pub const LOCATION: &str = "MEAL_WEATHER_LOCATION";

    /// Cache TTL in milliseconds
    pub const CACHE_TTL_MS: &str = "MEAL_WEATHER_CACHE_TTL_MS";

    /// Provider selection (`mock` or `ipma`)
    pub const PROVIDER: &str = "MEAL_WEATHER_PROVIDER";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "meal-weather/0.1.0 (Meal booking forecasts)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Default rate limit towards the forecast endpoint (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
}

/// IPMA open-data endpoint defaults
pub mod ipma {
    /// Daily forecast base URL; the location code and `.json` are appended
    pub const BASE_URL: &str = "https://api.ipma.pt/open-data/forecast/meteorology/cities/daily";

    /// Default location code (Aveiro)
    pub const DEFAULT_LOCATION_CODE: &str = "1010500";

    /// Date format of the `forecastDate` field
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Forecast cache defaults
pub mod cache {
    /// Default entry time-to-live in milliseconds (one hour)
    pub const DEFAULT_TTL_MS: u64 = 3_600_000;

    /// Days ahead of today for which live data exists
    pub const DEFAULT_HORIZON_DAYS: i64 = 5;
}

/// Fixed forecasts returned outside the normal provider path
pub mod sentinel {
    /// Description of the long-range prediction forecast
    pub const PREDICTION_DESCRIPTION: &str = "Forecast: Partly cloudy";
    pub const PREDICTION_MIN_TEMPERATURE: f64 = 18.0;
    pub const PREDICTION_MAX_TEMPERATURE: f64 = 26.0;
    pub const PREDICTION_PRECIPITATION: &str = "20%";

    /// Description used when the live endpoint could not be reached
    pub const UNAVAILABLE_DESCRIPTION: &str = "Weather data unavailable";
    pub const UNAVAILABLE_PRECIPITATION: &str = "N/A";
}

/// Command-line boundary limits
pub mod cli {
    /// Maximum number of days accepted by `forecast --days`
    pub const MAX_FORECAST_DAYS: u32 = 10;

    /// Defaults for the `cache-check` demonstration
    pub const CACHE_CHECK_TTL_MS: u64 = 200;
    pub const CACHE_CHECK_FIRST_WAIT_MS: u64 = 100;
    pub const CACHE_CHECK_SECOND_WAIT_MS: u64 = 150;
}

/// Configuration file locations
pub mod files {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "meal-weather.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "meal-weather";

    /// Configuration file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants at the top level
pub use cache::DEFAULT_TTL_MS;
pub use http::USER_AGENT;
pub use ipma::DEFAULT_LOCATION_CODE;
