//! Clocks that stamp new records
//!
//! A store never derives a record's timestamp from its payload. It asks its
//! [`Clock`] instead:
//! - [`SystemClock`]: wall clock that never runs backwards (default)
//! - [`ManualClock`]: externally driven, for tests and replays

use crate::types::Timestamp;
use chrono::Utc;
use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Source of record timestamps
///
/// Implementations must be cheap and callable from many threads at once.
pub trait Clock: Send + Sync + Debug {
    /// The instant to assign to a record created now
    fn now(&self) -> Timestamp;
}

/// Wall clock clamped to be non-decreasing
///
/// If the system clock steps backwards (NTP adjustment, manual change), the
/// clock keeps returning the latest instant it has handed out until real time
/// catches up, so timestamps from one instance never decrease.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_nanos: AtomicI64,
}

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Utc::now();
        let Some(nanos) = wall.timestamp_nanos_opt() else {
            return Timestamp::from(wall);
        };
        let previous = self.last_nanos.fetch_max(nanos, Ordering::AcqRel);
        Timestamp::from_unix_nanos(previous.max(nanos))
    }
}

/// Clock that only moves when told to
///
/// # Example
///
/// ```
/// use chronolog_core::clock::{Clock, ManualClock};
/// use chronolog_core::Timestamp;
///
/// let clock = ManualClock::at_unix_nanos(10);
/// assert_eq!(clock.now(), Timestamp::from_unix_nanos(10));
///
/// clock.set_unix_nanos(20);
/// assert_eq!(clock.now(), Timestamp::from_unix_nanos(20));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    nanos: AtomicI64,
}

impl ManualClock {
    /// Start the clock at the given instant
    ///
    /// Instants outside the nanosecond-representable range are clamped to
    /// its bounds.
    pub fn new(start: Timestamp) -> Self {
        Self::at_unix_nanos(start.unix_nanos().unwrap_or_else(|| {
            if start.unix_millis() < 0 {
                i64::MIN
            } else {
                i64::MAX
            }
        }))
    }

    /// Start the clock at `nanos` since the Unix epoch
    pub fn at_unix_nanos(nanos: i64) -> Self {
        Self {
            nanos: AtomicI64::new(nanos),
        }
    }

    /// Jump to `nanos` since the Unix epoch (backwards jumps are allowed)
    pub fn set_unix_nanos(&self, nanos: i64) {
        self.nanos.store(nanos, Ordering::Release);
    }

    /// Jump to the given instant
    pub fn set(&self, ts: Timestamp) {
        if let Some(nanos) = ts.unix_nanos() {
            self.set_unix_nanos(nanos);
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let step = i64::try_from(by.as_nanos()).unwrap_or(i64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_add(step))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_nanos(self.nanos.load(Ordering::Acquire))
    }
}
