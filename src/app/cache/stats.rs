//! Cache statistics and hit/miss counters
//!
//! Counters are process-lifetime and monotonically increasing. The
//! statistics report is computed on demand from a store snapshot, so entry
//! counts reflect the TTL at the moment the report is taken.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::models::CacheEntry;

/// Hit and miss counters shared by all callers of one service instance
#[derive(Debug, Default)]
pub struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LookupCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Point-in-time cache report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatistics {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that went to the provider
    pub misses: u64,
    /// Entries currently held, fresh or stale
    pub total_entries: usize,
    /// Entries within the TTL
    pub valid_entries: usize,
    /// Entries past the TTL, awaiting replacement
    pub expired_entries: usize,
    /// TTL the entries were classified against
    pub ttl_millis: u64,
}

impl CacheStatistics {
    /// Build a report by classifying every snapshot entry against `ttl_millis`
    pub fn from_snapshot(
        counters: &LookupCounters,
        snapshot: &[(NaiveDate, CacheEntry)],
        now_ms: i64,
        ttl_millis: u64,
    ) -> Self {
        let valid_entries = snapshot
            .iter()
            .filter(|(_, entry)| entry.is_fresh(now_ms, ttl_millis))
            .count();

        Self {
            hits: counters.hits(),
            misses: counters.misses(),
            total_entries: snapshot.len(),
            valid_entries,
            expired_entries: snapshot.len() - valid_entries,
            ttl_millis,
        }
    }

    /// Number of completed single-date lookups
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage of all lookups
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            return 0.0;
        }
        (self.hits as f64 / total as f64) * 100.0
    }
}
