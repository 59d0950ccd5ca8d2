//! Time sources.
//!
//! Relevance depends on "now". Stores never read the wall clock directly;
//! they ask the [`Clock`] they were built with.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Supplies the current timestamp.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Simulated time, advanced explicitly by the world loop.
///
/// Shared behind an `Arc` between the driver and every store. It only moves
/// forward, so record ages seen by a store are never negative.
#[derive(Debug)]
pub struct SimClock {
    now: RwLock<DateTime<Utc>>,
}

impl SimClock {
    /// A clock frozen at `start` until advanced.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Move forward by `by`. Negative durations are ignored.
    pub fn advance(&self, by: Duration) {
        if by > Duration::zero() {
            let mut now = self.now.write();
            *now = *now + by;
        }
    }

    /// Move forward by whole simulated hours.
    pub fn advance_hours(&self, hours: u32) {
        self.advance(Duration::hours(i64::from(hours)));
    }

    /// Move forward by whole simulated days.
    pub fn advance_days(&self, days: u32) {
        self.advance(Duration::days(i64::from(days)));
    }
}

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
