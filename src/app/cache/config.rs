//! Cache configuration types and defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Configuration for the forecast cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time after which an entry is stale
    pub ttl: Duration,
    /// Dates further than this many days ahead get the long-range prediction
    pub horizon_days: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(cache::DEFAULT_TTL_MS),
            horizon_days: cache::DEFAULT_HORIZON_DAYS,
        }
    }
}

impl CacheConfig {
    /// Create a cache configuration with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Default::default()
        }
    }

    /// Set the live-data horizon in days
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// TTL in whole milliseconds, saturating at `u64::MAX`
    pub fn ttl_millis(&self) -> u64 {
        u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX)
    }
}
