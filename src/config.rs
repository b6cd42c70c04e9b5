//! Configuration management for meal_weather
//!
//! Configuration is read once at startup with the following precedence:
//! 1. Default values
//! 2. Config file (explicit path, or the first standard location that exists)
//! 3. Environment variables (a `.env` file is honoured by the binary)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::provider::{IpmaSettings, ProviderKind};
use crate::app::{CacheConfig, ClientConfig};
use crate::constants::{cache, env, files, http, ipma};
use crate::errors::{ConfigError, ConfigResult, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Forecast source settings
    pub weather: WeatherConfigToml,
    /// Cache settings
    pub cache: CacheConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly forecast source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfigToml {
    /// Which provider answers cache misses
    pub provider: ProviderKind,
    /// Daily forecast endpoint; `/{location_code}.json` is appended
    pub base_url: String,
    /// IPMA location code
    pub location_code: String,
}

impl Default for WeatherConfigToml {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            base_url: ipma::BASE_URL.to_string(),
            location_code: ipma::DEFAULT_LOCATION_CODE.to_string(),
        }
    }
}

/// TOML-friendly cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfigToml {
    /// Entry time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Days ahead served by the provider; later dates get a fixed prediction
    pub horizon_days: i64,
}

impl Default for CacheConfigToml {
    fn default() -> Self {
        Self {
            ttl_ms: cache::DEFAULT_TTL_MS,
            horizon_days: cache::DEFAULT_HORIZON_DAYS,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_ms: http::DEFAULT_TIMEOUT.as_millis() as u64,
            connect_timeout_ms: http::CONNECT_TIMEOUT.as_millis() as u64,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            rate_limit_rps: http::DEFAULT_RATE_LIMIT_RPS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file does not exist, if a file cannot be
    /// parsed, or if the resulting configuration does not validate
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path }.into());
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for the `config` commands
    ///
    /// Never fails. A missing or unparsable file falls back to defaults, a
    /// bad environment override is skipped, and validation problems are
    /// reported instead of rejected. Every problem is returned alongside.
    pub async fn load_lenient(config_file_override: Option<PathBuf>) -> (Self, Vec<String>) {
        Self::load_lenient_with(config_file_override, |key| std::env::var(key).ok()).await
    }

    async fn load_lenient_with<F>(
        config_file_override: Option<PathBuf>,
        lookup: F,
    ) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => {
                problems.push(ConfigError::NotFound { path }.to_string());
                None
            }
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => match Self::load_from_file(&path).await {
                Ok(config) => config,
                Err(e) => {
                    problems.push(format!("{}: {}", path.display(), e));
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Err(e) = config.apply_env_overrides(lookup) {
            problems.push(e.to_string());
        }
        if let Err(e) = config.validate() {
            problems.push(e.to_string());
        }

        (config, problems)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::API_URL) {
            debug!("Overriding base_url from {}", env::API_URL);
            self.weather.base_url = url;
        }

        if let Some(location) = lookup(env::LOCATION) {
            debug!("Overriding location_code from {}", env::LOCATION);
            self.weather.location_code = location;
        }

        if let Some(raw) = lookup(env::CACHE_TTL_MS) {
            self.cache.ttl_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: env::CACHE_TTL_MS.to_string(),
                value: raw.clone(),
                reason: "Expected a whole number of milliseconds".to_string(),
            })?;
        }

        if let Some(raw) = lookup(env::PROVIDER) {
            self.weather.provider =
                raw.parse()
                    .map_err(|reason: String| ConfigError::InvalidValue {
                        field: env::PROVIDER.to_string(),
                        value: raw.clone(),
                        reason,
                    })?;
        }

        Ok(())
    }

    /// Check values that would otherwise fail late
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = url::Url::parse(&self.weather.base_url) {
            errors.push(format!("weather.base_url '{}' is invalid: {}", self.weather.base_url, e));
        }
        if self.weather.location_code.trim().is_empty() {
            errors.push("weather.location_code must not be empty".to_string());
        }
        if self.client.request_timeout_ms == 0 {
            errors.push("client.request_timeout_ms must be greater than zero".to_string());
        }
        if self.client.rate_limit_rps == 0 {
            errors.push("client.rate_limit_rps must be greater than zero".to_string());
        }
        if self.cache.horizon_days < 0 {
            errors.push("cache.horizon_days must not be negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }

    /// Runtime cache configuration
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::with_ttl(Duration::from_millis(self.cache.ttl_ms))
            .with_horizon_days(self.cache.horizon_days)
    }

    /// Runtime settings for the live provider
    pub fn ipma_settings(&self) -> IpmaSettings {
        IpmaSettings {
            base_url: self.weather.base_url.clone(),
            location_code: self.weather.location_code.clone(),
            client: self.client.to_runtime_config(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default config file if none exists yet
    ///
    /// Returns the path and whether a file was created.
    pub async fn initialize(path: Option<PathBuf>) -> Result<(PathBuf, bool)> {
        let config_path = match path {
            Some(path) => path,
            None => Self::get_default_config_path()?,
        };

        if config_path.exists() {
            debug!("Config file already exists: {}", config_path.display());
            return Ok((config_path, false));
        }

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&config_path, Self::default_config_content()).await?;

        info!("Created default configuration file: {}", config_path.display());
        Ok((config_path, true))
    }

    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", files::LOCAL_CONFIG_FILE))];
        match Self::get_default_config_path() {
            Ok(path) => search_paths.push(path),
            Err(e) => warn!("{}", e),
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    fn get_default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::errors::AppError::generic("Could not determine user config directory")
        })?;

        Ok(config_dir
            .join(files::CONFIG_DIR_NAME)
            .join(files::CONFIG_FILE_NAME))
    }

    async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::InvalidFormat)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Default configuration content with comments
    pub fn default_config_content() -> String {
        format!(
            r#"# meal_weather configuration

[weather]
# Forecast source for cache misses: "ipma" or "mock"
provider = "ipma"
base_url = "{}"
location_code = "{}"

[cache]
# Entry time-to-live in milliseconds
ttl_ms = {}
# Dates further ahead than this get a fixed prediction
horizon_days = {}

[client]
request_timeout_ms = {}
connect_timeout_ms = {}
pool_idle_timeout_secs = {}
rate_limit_rps = {}

[logging]
level = "info"  # error, warn, info, debug, trace
"#,
            ipma::BASE_URL,
            ipma::DEFAULT_LOCATION_CODE,
            cache::DEFAULT_TTL_MS,
            cache::DEFAULT_HORIZON_DAYS,
            http::DEFAULT_TIMEOUT.as_millis(),
            http::CONNECT_TIMEOUT.as_millis(),
            http::POOL_IDLE_TIMEOUT.as_secs(),
            http::DEFAULT_RATE_LIMIT_RPS,
        )
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            rate_limit_rps: self.rate_limit_rps,
        }
    }
}
