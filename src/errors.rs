//! Error types for meal_weather
//!
//! Failures inside the forecast core are recovered into best-effort forecasts,
//! so these types surface mostly at startup (configuration, HTTP client
//! construction) and inside the live provider before it degrades.

use std::path::PathBuf;
use thiserror::Error;

/// Live forecast provider errors
///
/// These never reach callers of the cache service; the provider turns them
/// into a fallback forecast.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request error, including timeouts
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned error status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// Invalid URL built from the configured base URL and location
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode forecast response")]
    Decode(#[from] serde_json::Error),

    /// Rate limiter could not be configured
    #[error("Rate limit must be non-zero")]
    RateLimiterConfig,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Provider error
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Provider(_) => "provider",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Provider result type alias
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
