//! Time source for cache timestamps and the forecast horizon
//!
//! The service and store read the time only through [`Clock`], so expiry and
//! horizon behaviour can be driven deterministically with [`ManualClock`].

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};

/// Source of wall-clock millis and the local calendar date
pub trait Clock: Send + Sync + fmt::Debug {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// The current local calendar date
    fn today(&self) -> NaiveDate;
}

/// System time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Shared handle to the system clock
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
    today: RwLock<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate, now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
            today: RwLock::new(today),
        }
    }

    /// Move the millisecond time forward; the calendar date is left alone
    pub fn advance(&self, by: Duration) {
        let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        // Saturate instead of wrapping
        let _ = self
            .now_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(by))
            });
    }

    pub fn set_today(&self, today: NaiveDate) {
        match self.today.write() {
            Ok(mut guard) => *guard = today,
            Err(poisoned) => *poisoned.into_inner() = today,
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_when_advanced() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let clock = ManualClock::new(date, 1_000);
        assert_eq!(clock.now_millis(), 1_000);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now_millis(), 1_250);
        assert_eq!(clock.today(), date);

        clock.advance(Duration::MAX);
        assert_eq!(clock.now_millis(), i64::MAX);

        let next = date.succ_opt().unwrap();
        clock.set_today(next);
        assert_eq!(clock.today(), next);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now_millis() > 0);
    }
}
