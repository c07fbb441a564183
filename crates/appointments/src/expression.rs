//! The schedule expression contract and the pieces shared by every
//! expression type.
//!
//! An *expression* is one recurrence pattern (daily, weekly, monthly, ...)
//! that can report its occurrence instants and due-status. Only the daily
//! expression ships today; the trait, the week-of-month constants, and the
//! input validators here are the surface sibling expression types build on.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, ScheduleError};

pub use chrono::Weekday;

/// The operation set every schedule expression provides.
///
/// Occurrence instants are reported in the expression's configured timezone.
/// Implementations read their [`Clock`](crate::Clock) once per call, so each
/// query sees a single consistent "now".
pub trait Expression {
    /// The first occurrence: the anchor resolved in the configured timezone.
    fn first_appointment(&self) -> DateTime<Tz>;

    /// The most recent occurrence at or before now.
    ///
    /// For a schedule whose anchor is still in the future this returns the
    /// first occurrence as a sentinel; callers must not read that as evidence
    /// of a past run. `iterations` is reserved and currently ignored.
    fn last_appointment(&self, iterations: u32) -> DateTime<Tz>;

    /// The occurrence `iterations` periods after the next one.
    ///
    /// `iterations = 0` is the very next occurrence strictly after now,
    /// `iterations = 1` the one after that, and so on.
    fn next_appointment(&self, iterations: u32) -> DateTime<Tz>;

    /// Whether the next or the last occurrence lies within `within_seconds`
    /// of now (absolute difference, either side sufficing).
    fn is_due_now(&self, within_seconds: u32) -> bool;

    /// The expression's configuration as a structured record.
    fn to_record(&self) -> ScheduleRecord;
}

/// A schedule's configuration, for inspection or persistence.
///
/// `start_from` is the first occurrence as RFC 3339 in the schedule timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub start_from: String,
    pub timezone: String,
    pub interval_days: u32,
}

// ── Week-of-month ordinals ──────────────────────────────────────────────────

/// Which week of a month an occurrence falls in, counted from either end.
///
/// Used by month-based expression types ("the second Tuesday", "the last
/// Friday"). Negative indices count backwards from the end of the month,
/// `Last` being the final week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i8)]
pub enum WeekOrdinal {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    FourthToLast = -4,
    ThirdToLast = -3,
    SecondToLast = -2,
    Last = -1,
}

impl WeekOrdinal {
    /// The signed week index: 1-based from the start of the month, or
    /// negative 1-based from the end.
    pub fn index(self) -> i8 {
        self as i8
    }

    /// Whether this ordinal counts from the end of the month.
    pub fn counts_from_month_end(self) -> bool {
        self.index() < 0
    }
}

// ── Input validation ────────────────────────────────────────────────────────
//
// Shared by the expression builders. Every failure here is a configuration
// error; a built expression never re-validates.

/// Validate a day interval. Intervals are whole days, at least one.
pub(crate) fn parse_interval(interval: u32) -> Result<u32> {
    if interval < 1 {
        return Err(ScheduleError::InvalidInterval(format!(
            "{interval}; intervals must be at least 1 day"
        )));
    }
    Ok(interval)
}

/// Resolve an IANA timezone name into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(format!("'{s}'")))
}

/// Parse a wall-clock datetime with a chrono format string.
pub(crate) fn parse_start_format(format: &str, input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, format).map_err(|e| {
        ScheduleError::InvalidDatetime(format!("'{input}' does not match '{format}': {e}"))
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_ordinal_indices() {
        assert_eq!(WeekOrdinal::First.index(), 1);
        assert_eq!(WeekOrdinal::Fourth.index(), 4);
        assert_eq!(WeekOrdinal::Last.index(), -1);
        assert_eq!(WeekOrdinal::FourthToLast.index(), -4);
    }

    #[test]
    fn test_week_ordinal_direction() {
        assert!(!WeekOrdinal::Second.counts_from_month_end());
        assert!(WeekOrdinal::SecondToLast.counts_from_month_end());
    }

    #[test]
    fn test_parse_interval_accepts_positive() {
        assert_eq!(parse_interval(1).unwrap(), 1);
        assert_eq!(parse_interval(365).unwrap(), 365);
    }

    #[test]
    fn test_parse_interval_rejects_zero() {
        let err = parse_interval(0).unwrap_err().to_string();
        assert!(err.contains("Invalid interval"), "got: {err}");
    }

    #[test]
    fn test_parse_timezone_resolves_iana_name() {
        let tz = parse_timezone("America/New_York").unwrap();
        assert_eq!(tz.name(), "America/New_York");
    }

    #[test]
    fn test_parse_timezone_rejects_unknown_name() {
        let err = parse_timezone("Mars/Olympus_Mons").unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_parse_start_format_round_trips() {
        let parsed = parse_start_format("%Y-%m-%d %H:%M:%S", "2019-01-01 12:00:00").unwrap();
        assert_eq!(parsed.to_string(), "2019-01-01 12:00:00");
    }

    #[test]
    fn test_parse_start_format_rejects_mismatch() {
        let err = parse_start_format("%Y-%m-%d %H:%M:%S", "01/01/2019")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid datetime"), "got: {err}");
    }
}
