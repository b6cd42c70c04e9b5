//! Data models for forecasts and cache entries

use serde::{Deserialize, Serialize};

use crate::constants::sentinel;

/// Daily weather forecast for a single calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Human-readable weather description
    pub description: String,
    /// Minimum temperature in °C
    pub min_temperature: f64,
    /// Maximum temperature in °C
    pub max_temperature: f64,
    /// Precipitation probability as a percentage string, e.g. "20%"
    pub precipitation_probability: String,
}

impl Forecast {
    pub fn new(
        description: impl Into<String>,
        min_temperature: f64,
        max_temperature: f64,
        precipitation_probability: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            min_temperature,
            max_temperature,
            precipitation_probability: precipitation_probability.into(),
        }
    }

    /// Fixed forecast for dates beyond the live-data horizon
    pub fn long_range_prediction() -> Self {
        Self::new(
            sentinel::PREDICTION_DESCRIPTION,
            sentinel::PREDICTION_MIN_TEMPERATURE,
            sentinel::PREDICTION_MAX_TEMPERATURE,
            sentinel::PREDICTION_PRECIPITATION,
        )
    }

    /// Fixed forecast used when the live endpoint failed
    pub fn unavailable() -> Self {
        Self::new(
            sentinel::UNAVAILABLE_DESCRIPTION,
            0.0,
            0.0,
            sentinel::UNAVAILABLE_PRECIPITATION,
        )
    }

    /// Mean of the minimum and maximum temperature
    pub fn average_temperature(&self) -> f64 {
        (self.min_temperature + self.max_temperature) / 2.0
    }
}

/// A cached forecast together with the time it was stored
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub forecast: Forecast,
    pub inserted_at_epoch_millis: i64,
}

impl CacheEntry {
    pub fn with_timestamp(forecast: Forecast, inserted_at_epoch_millis: i64) -> Self {
        Self {
            forecast,
            inserted_at_epoch_millis,
        }
    }

    /// Milliseconds elapsed between insertion and `now_ms`
    pub fn age_millis(&self, now_ms: i64) -> i64 {
        now_ms - self.inserted_at_epoch_millis
    }

    /// An entry is fresh while its age does not exceed the TTL
    ///
    /// A TTL beyond `i64::MAX` milliseconds never expires anything.
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: u64) -> bool {
        i64::try_from(ttl_ms).map_or(true, |ttl| self.age_millis(now_ms) <= ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let entry = CacheEntry::with_timestamp(Forecast::unavailable(), 1_000);

        assert!(entry.is_fresh(1_000, 100));
        assert!(entry.is_fresh(1_100, 100)); // age == ttl is still fresh
        assert!(!entry.is_fresh(1_101, 100));
        assert_eq!(entry.age_millis(1_130), 130);
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let entry = CacheEntry::with_timestamp(Forecast::unavailable(), 1_000);

        assert!(entry.is_fresh(1_000, u64::MAX));
        assert!(entry.is_fresh(i64::MAX, u64::MAX));
        assert!(entry.is_fresh(i64::MAX, i64::MAX as u64 + 1));
        assert!(!entry.is_fresh(i64::MAX, 1_000));
    }

    #[test]
    fn test_sentinels() {
        let prediction = Forecast::long_range_prediction();
        assert_eq!(prediction.description, "Forecast: Partly cloudy");
        assert_eq!(prediction.precipitation_probability, "20%");
        assert_eq!(prediction.average_temperature(), 22.0);

        let unavailable = Forecast::unavailable();
        assert_eq!(unavailable.min_temperature, 0.0);
        assert_eq!(unavailable.max_temperature, 0.0);
        assert_eq!(unavailable.precipitation_probability, "N/A");
    }

    #[test]
    fn test_forecast_serializes_camel_case() {
        let forecast = Forecast::new("Sunny", 16.0, 22.0, "1%");
        let json = serde_json::to_value(&forecast).unwrap();

        assert_eq!(json["minTemperature"], 16.0);
        assert_eq!(json["maxTemperature"], 22.0);
        assert_eq!(json["precipitationProbability"], "1%");
    }
}
