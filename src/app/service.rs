//! Cache-aside forecast service
//!
//! [`WeatherCacheService`] is the single entry point for forecast lookups.
//! A lookup reads the store; a fresh entry is a hit, anything else is a miss
//! that asks the provider and replaces the entry.
//!
//! Concurrent misses on the same date are not coalesced: each caller invokes
//! the provider and counts its own miss, and the last write wins.
//!
//! Entry timestamps, freshness checks and "today" all come from the
//! [`Clock`] the service was built with.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use futures::future::join_all;
use tracing::{debug, info};

use crate::app::cache::{CacheConfig, CacheStatistics, ForecastStore, LookupCounters};
use crate::app::clock::{system_clock, Clock};
use crate::app::models::Forecast;
use crate::app::provider::{build_provider, ForecastProvider, IpmaSettings, ProviderKind};
use crate::errors::ProviderResult;

/// Forecast lookups with a date-keyed TTL cache and hit/miss accounting
pub struct WeatherCacheService {
    provider: Arc<dyn ForecastProvider>,
    store: ForecastStore,
    counters: LookupCounters,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl WeatherCacheService {
    /// Service on the system clock
    pub fn new(provider: Arc<dyn ForecastProvider>, config: CacheConfig) -> Self {
        Self::with_clock(provider, config, system_clock())
    }

    pub fn with_clock(
        provider: Arc<dyn ForecastProvider>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(
            "Created weather cache service (provider: {}, ttl: {}ms, horizon: {} days)",
            provider.name(),
            config.ttl_millis(),
            config.horizon_days
        );

        Self {
            provider,
            store: ForecastStore::with_clock(clock.clone()),
            counters: LookupCounters::new(),
            config,
            clock,
        }
    }

    /// Build the provider selected by `kind` and wrap it in a new service
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the live provider cannot be constructed
    pub fn from_settings(
        kind: ProviderKind,
        settings: &IpmaSettings,
        config: CacheConfig,
    ) -> ProviderResult<Self> {
        Ok(Self::new(build_provider(kind, settings)?, config))
    }

    /// Forecast for one date, from cache when fresh
    pub async fn get_forecast(&self, date: NaiveDate) -> Forecast {
        let ttl_ms = self.config.ttl_millis();

        if let Some(entry) = self.store.get(date).await {
            let now = self.clock.now_millis();
            let age = entry.age_millis(now);
            debug!(
                "Cache entry for {} found. Age: {}ms, TTL: {}ms",
                date, age, ttl_ms
            );

            if entry.is_fresh(now, ttl_ms) {
                self.counters.record_hit();
                debug!("Cache hit for {}", date);
                return entry.forecast;
            }
            debug!("Cache expired for {} ({}ms > {}ms)", date, age, ttl_ms);
        }

        self.counters.record_miss();
        info!("Cache miss for {}, fetching from {}", date, self.provider.name());

        let forecast = self.resolve(date).await;
        self.store.put(date, forecast.clone()).await;
        forecast
    }

    /// Forecasts for a set of dates, one entry per input date
    pub async fn get_forecasts(&self, dates: &HashSet<NaiveDate>) -> HashMap<NaiveDate, Forecast> {
        debug!("Fetching forecasts for {} dates", dates.len());

        join_all(
            dates
                .iter()
                .map(|&date| async move { (date, self.get_forecast(date).await) }),
        )
        .await
        .into_iter()
        .collect()
    }

    /// Forecasts for `days` consecutive dates starting today
    ///
    /// Stops early at the last representable calendar date.
    pub async fn get_forecasts_for_days(&self, days: u32) -> BTreeMap<NaiveDate, Forecast> {
        let today = self.clock.today();
        let dates: HashSet<NaiveDate> = (0..u64::from(days))
            .map_while(|offset| today.checked_add_days(Days::new(offset)))
            .collect();

        self.get_forecasts(&dates).await.into_iter().collect()
    }

    /// Counters plus a fresh/stale classification of every entry
    pub async fn get_statistics(&self) -> CacheStatistics {
        let snapshot = self.store.snapshot().await;
        let stats = CacheStatistics::from_snapshot(
            &self.counters,
            &snapshot,
            self.clock.now_millis(),
            self.config.ttl_millis(),
        );
        debug!("Cache stats: {:?}", stats);
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Today's date according to the service clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    async fn resolve(&self, date: NaiveDate) -> Forecast {
        let days_ahead = (date - self.clock.today()).num_days();
        if days_ahead > self.config.horizon_days {
            info!(
                "{} is {} days ahead, beyond the {}-day horizon; returning prediction",
                date, days_ahead, self.config.horizon_days
            );
            return Forecast::long_range_prediction();
        }

        self.provider.fetch(date).await
    }
}

impl fmt::Debug for WeatherCacheService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherCacheService")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .field("hits", &self.counters.hits())
            .field("misses", &self.counters.misses())
            .finish()
    }
}
