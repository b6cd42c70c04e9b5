//! Forecast providers
//!
//! A provider produces a [`Forecast`] for a date when the cache has no fresh
//! entry. Providers are infallible by signature: any failure is recovered
//! into a best-effort forecast before it reaches the cache.
//!
//! - `mock`: deterministic generator, no I/O
//! - `ipma`: IPMA open-data endpoint with fallbacks

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::client::{ClientConfig, HttpHandler};
use crate::app::models::Forecast;
use crate::errors::ProviderResult;

pub mod ipma;
pub mod mock;

pub use ipma::IpmaProvider;
pub use mock::MockProvider;

/// Source of forecasts for cache misses
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Produce a forecast for `date`
    async fn fetch(&self, date: NaiveDate) -> Forecast;
}

/// Provider selection, fixed at service construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mock,
    #[default]
    Ipma,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Mock => write!(f, "mock"),
            ProviderKind::Ipma => write!(f, "ipma"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "ipma" | "live" => Ok(ProviderKind::Ipma),
            other => Err(format!("unknown provider '{}', expected 'mock' or 'ipma'", other)),
        }
    }
}

/// Settings for the live provider
#[derive(Debug, Clone)]
pub struct IpmaSettings {
    pub base_url: String,
    pub location_code: String,
    pub client: ClientConfig,
}

/// Build the provider selected by `kind`
///
/// # Errors
///
/// Returns `ProviderError` if the live provider's HTTP client or URL cannot
/// be built
pub fn build_provider(
    kind: ProviderKind,
    settings: &IpmaSettings,
) -> ProviderResult<Arc<dyn ForecastProvider>> {
    match kind {
        ProviderKind::Mock => Ok(Arc::new(MockProvider::new())),
        ProviderKind::Ipma => {
            let client = settings.client.build_http_client()?;
            let http_handler = HttpHandler::new(client, settings.client.rate_limit_rps)?;
            let provider =
                IpmaProvider::new(http_handler, &settings.base_url, &settings.location_code)?;
            Ok(Arc::new(provider))
        }
    }
}
