//! Deterministic forecast generator
//!
//! Everything derives from the day of the month, so the same date always
//! yields the same forecast regardless of month or year.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::app::models::Forecast;

use super::ForecastProvider;

const DESCRIPTIONS: [&str; 8] = [
    "Sunny",
    "Partly cloudy",
    "Cloudy",
    "Light rain",
    "Thunderstorm",
    "Clear sky",
    "Foggy",
    "Windy",
];

/// Provider that synthesizes forecasts without any I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`ForecastProvider::fetch`]
    pub fn generate(date: NaiveDate) -> Forecast {
        let day = date.day();

        let description = DESCRIPTIONS[day as usize % DESCRIPTIONS.len()];
        let min_temperature = f64::from(15 + day % 10);
        let max_temperature = min_temperature + f64::from(5 + day % 5);
        let precipitation = format!("{}%", day % 100);

        Forecast::new(description, min_temperature, max_temperature, precipitation)
    }
}

#[async_trait]
impl ForecastProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, date: NaiveDate) -> Forecast {
        Self::generate(date)
    }
}
