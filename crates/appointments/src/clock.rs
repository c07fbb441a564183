//! Injectable time source.
//!
//! Schedules never read the system clock directly. They hold a [`Clock`] and
//! ask it for "now" exactly once per query, so a single consistent instant
//! flows through each computation and tests can freeze time with
//! [`FixedClock`].

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant.
///
/// Used for deterministic evaluation (e.g. replaying a schedule against a
/// recorded point in time) and throughout the test suite.
///
/// # Examples
///
/// ```
/// use appointments::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2019, 1, 1, 17, 0, 0).unwrap());
/// assert_eq!(clock.now(), Utc.with_ymd_and_hms(2019, 1, 1, 17, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
