//! Live forecasts from the IPMA open-data daily endpoint
//!
//! `GET {base_url}/{location_code}.json` returns the next few days for one
//! location. A failed request yields [`Forecast::unavailable`]; a response
//! without a record for the requested date falls back to the mock generator.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{error, info, warn};
use url::Url;

use crate::app::client::HttpHandler;
use crate::app::models::Forecast;
use crate::constants::ipma;
use crate::errors::{ProviderError, ProviderResult};

use super::{ForecastProvider, MockProvider};

/// Top-level IPMA response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpmaResponse {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<IpmaDailyRecord>>,
}

impl IpmaResponse {
    /// Find the record whose `forecastDate` equals `date`
    pub fn record_for(&self, date: NaiveDate) -> Option<&IpmaDailyRecord> {
        let target = date.format(ipma::DATE_FORMAT).to_string();
        self.data
            .as_deref()?
            .iter()
            .find(|record| record.forecast_date == target)
    }
}

/// One day of an IPMA forecast
///
/// IPMA mixes string and numeric encodings between fields and over time,
/// so every field is normalized to a string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpmaDailyRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub precipita_prob: String,
    #[serde(default, rename = "tMin", deserialize_with = "string_or_number")]
    pub t_min: String,
    #[serde(default, rename = "tMax", deserialize_with = "string_or_number")]
    pub t_max: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_weather_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub forecast_date: String,
}

impl IpmaDailyRecord {
    pub fn to_forecast(&self) -> Forecast {
        Forecast::new(
            describe_weather_type(&self.id_weather_type),
            parse_temperature(&self.t_min),
            parse_temperature(&self.t_max),
            format!("{}%", self.precipita_prob),
        )
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parse a temperature field, treating anything non-numeric as 0.0
pub fn parse_temperature(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable temperature value '{}': {}", raw, e);
            0.0
        }
    }
}

/// Map an IPMA weather type code to a description
pub fn describe_weather_type(code: &str) -> &'static str {
    match code.trim() {
        "1" => "Clear sky",
        "2" | "3" => "Partly cloudy",
        "4" | "5" => "Cloudy",
        "6" | "7" => "Overcast",
        "8" | "9" => "Light rain",
        "10" | "11" => "Moderate rain",
        "12" | "13" => "Heavy rain",
        "14" | "15" => "Showers",
        "16" | "17" => "Thunderstorm",
        "18" => "Fog",
        "19" => "Mist",
        _ => "Unknown weather conditions",
    }
}

/// Build `{base_url}/{location_code}.json`
pub fn forecast_url(base_url: &str, location_code: &str) -> ProviderResult<Url> {
    let raw = format!("{}/{}.json", base_url.trim_end_matches('/'), location_code);
    Url::parse(&raw).map_err(|e| ProviderError::InvalidUrl {
        url: raw.clone(),
        error: e.to_string(),
    })
}

/// Forecast provider backed by the IPMA API
#[derive(Debug)]
pub struct IpmaProvider {
    http_handler: HttpHandler,
    url: Url,
    fallback: MockProvider,
}

impl IpmaProvider {
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidUrl` if the base URL and location code
    /// do not form a valid URL
    pub fn new(
        http_handler: HttpHandler,
        base_url: &str,
        location_code: &str,
    ) -> ProviderResult<Self> {
        let url = forecast_url(base_url, location_code)?;
        info!("Created IPMA provider for {}", url);

        Ok(Self {
            http_handler,
            url,
            fallback: MockProvider::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch_daily(&self) -> ProviderResult<IpmaResponse> {
        info!("Fetching weather data from IPMA: {}", self.url);
        self.http_handler.get_json(&self.url).await
    }
}

#[async_trait]
impl ForecastProvider for IpmaProvider {
    fn name(&self) -> &'static str {
        "ipma"
    }

    async fn fetch(&self, date: NaiveDate) -> Forecast {
        let response = match self.fetch_daily().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching weather data from IPMA for {}: {}", date, e);
                return Forecast::unavailable();
            }
        };

        if response.data.is_none() {
            warn!("Empty or invalid response from IPMA, using generated forecast");
            return self.fallback.fetch(date).await;
        }

        match response.record_for(date) {
            Some(record) => {
                info!("Fetched IPMA forecast for {}", date);
                record.to_forecast()
            }
            None => {
                warn!("No forecast for {} in IPMA response, using generated forecast", date);
                self.fallback.fetch(date).await
            }
        }
    }
}
