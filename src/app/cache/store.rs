//! Date-keyed forecast store
//!
//! Holds at most one [`CacheEntry`] per calendar date. The store never
//! expires anything itself; freshness is decided by the reader against
//! the insertion timestamp.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::app::clock::{system_clock, Clock};
use crate::app::models::{CacheEntry, Forecast};

/// Thread-safe map from calendar date to cached forecast
#[derive(Debug, Clone)]
pub struct ForecastStore {
    entries: Arc<RwLock<HashMap<NaiveDate, CacheEntry>>>,
    clock: Arc<dyn Clock>,
}

impl Default for ForecastStore {
    fn default() -> Self {
        Self::with_clock(system_clock())
    }
}

impl ForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `put` timestamps come from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Look up the entry for a date, fresh or not
    pub async fn get(&self, date: NaiveDate) -> Option<CacheEntry> {
        self.entries.read().await.get(&date).cloned()
    }

    /// Store a forecast stamped with the clock's time, replacing any prior entry
    pub async fn put(&self, date: NaiveDate, forecast: Forecast) {
        self.put_at(date, forecast, self.clock.now_millis()).await;
    }

    /// Store a forecast with an explicit insertion timestamp
    pub async fn put_at(&self, date: NaiveDate, forecast: Forecast, inserted_at_epoch_millis: i64) {
        let entry = CacheEntry::with_timestamp(forecast, inserted_at_epoch_millis);
        let replaced = self.entries.write().await.insert(date, entry).is_some();
        debug!("Stored forecast for {} (replaced: {})", date, replaced);
    }

    /// Point-in-time copy of every entry
    pub async fn snapshot(&self) -> Vec<(NaiveDate, CacheEntry)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(date, entry)| (*date, entry.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
