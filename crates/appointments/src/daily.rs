//! Fixed-interval daily schedules.
//!
//! A [`Daily`] owns an anchor wall-clock datetime, an IANA timezone, and a
//! day interval, and derives occurrence instants from them: the first
//! occurrence, the most recent occurrence at or before now, the k-th future
//! occurrence, and a due-now predicate. Occurrence `k` is the anchor moved
//! `k * interval` calendar days forward in the schedule timezone, so a
//! schedule anchored at 12:00 fires at 12:00 local time on both sides of a
//! DST transition.
//!
//! Configuration happens once, through [`DailyBuilder`], which validates
//! every input eagerly. A built schedule is immutable and its queries cannot
//! fail.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::expression::{self, Expression, ScheduleRecord};

/// A recurring schedule that fires every `interval_days` calendar days,
/// starting from an anchor datetime in a configured timezone.
///
/// # Examples
///
/// ```
/// use appointments::{Daily, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2019, 1, 1, 17, 0, 0).unwrap();
/// let schedule = Daily::builder(1)
///     .start_since_format("%Y-%m-%d %H:%M:%S", "2019-01-01 12:00:00")?
///     .timezone("America/New_York")?
///     .clock(FixedClock::new(now))
///     .build()?;
///
/// // 12:00 Eastern is 17:00 UTC, so the schedule is due at this instant
/// // and the next run is tomorrow at the same wall-clock time.
/// assert!(schedule.is_due_now(0));
/// assert_eq!(
///     schedule.next_appointment(0).to_rfc3339(),
///     "2019-01-02T12:00:00-05:00"
/// );
/// # Ok::<(), appointments::ScheduleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Daily<C = SystemClock> {
    start_from: NaiveDateTime,
    timezone: Tz,
    interval_days: u32,
    clock: C,
}

impl Daily<SystemClock> {
    /// Start configuring a schedule that fires every `interval_days` days.
    ///
    /// The interval is validated by [`DailyBuilder::build`]; it must be at
    /// least one day.
    pub fn builder(interval_days: u32) -> DailyBuilder<SystemClock> {
        DailyBuilder {
            interval_days,
            start_from: None,
            timezone: chrono_tz::UTC,
            clock: SystemClock,
        }
    }
}

// ── Queries ─────────────────────────────────────────────────────────────────

impl<C: Clock> Daily<C> {
    /// The first occurrence: the anchor resolved in the schedule timezone.
    ///
    /// The anchor is a wall-clock reading. If DST makes it ambiguous the
    /// earlier instant wins; if DST skipped it, it rolls forward to the first
    /// wall-clock minute that exists again.
    pub fn first_appointment(&self) -> DateTime<Tz> {
        resolve_wall_clock(self.timezone, self.start_from)
    }

    /// The most recent occurrence at or before now.
    ///
    /// Projects now onto the anchor's arithmetic sequence by floor division:
    /// whole calendar days elapsed since the first occurrence, divided by the
    /// interval, gives the number of completed periods. When now lands
    /// exactly on an occurrence, that occurrence is returned.
    ///
    /// A schedule whose anchor is still in the future has no past run; the
    /// first occurrence is returned as a sentinel and callers must treat it
    /// as such.
    ///
    /// `iterations` is reserved for offsetting into the past and is currently
    /// ignored.
    pub fn last_appointment(&self, _iterations: u32) -> DateTime<Tz> {
        self.last_appointment_at(self.clock.now())
    }

    /// [`last_appointment`](Self::last_appointment) evaluated against an
    /// explicit instant instead of this schedule's clock.
    pub fn last_appointment_at(&self, now: DateTime<Utc>) -> DateTime<Tz> {
        let first = self.first_appointment();
        match self.completed_periods(&first, now) {
            Some(periods) => self.occurrence(periods * i64::from(self.interval_days)),
            None => first,
        }
    }

    /// The next occurrence strictly after now, skipped `iterations` periods
    /// further ahead.
    ///
    /// `iterations = 0` is the very next occurrence, `iterations = 1` the one
    /// after it, and so on. When now is exactly an occurrence instant the
    /// result is the following occurrence, never the current one.
    pub fn next_appointment(&self, iterations: u32) -> DateTime<Tz> {
        self.next_appointment_at(self.clock.now(), iterations)
    }

    /// [`next_appointment`](Self::next_appointment) evaluated against an
    /// explicit instant instead of this schedule's clock.
    pub fn next_appointment_at(&self, now: DateTime<Utc>, iterations: u32) -> DateTime<Tz> {
        let interval = i64::from(self.interval_days);
        let first = self.first_appointment();
        // A schedule that has not started gets a synthetic previous run one
        // interval before the anchor, so iterations = 0 lands on the anchor
        // itself.
        let last_offset = match self.completed_periods(&first, now) {
            Some(periods) => periods * interval,
            None => -interval,
        };
        self.occurrence(last_offset + interval * (i64::from(iterations) + 1))
    }

    /// Whether an occurrence lies within `within_seconds` of now.
    ///
    /// Checks both sides: a run about to happen (next occurrence approaching)
    /// and a run that just happened (last occurrence in the immediate past)
    /// both count, so callers need not know which side of an occurrence now
    /// falls on. With `within_seconds = 0` this is true exactly when now is
    /// an occurrence instant.
    pub fn is_due_now(&self, within_seconds: u32) -> bool {
        self.is_due_now_at(self.clock.now(), within_seconds)
    }

    /// [`is_due_now`](Self::is_due_now) evaluated against an explicit
    /// instant instead of this schedule's clock.
    pub fn is_due_now_at(&self, now: DateTime<Utc>, within_seconds: u32) -> bool {
        let within = i64::from(within_seconds);
        let next = self.next_appointment_at(now, 0);
        let last = self.last_appointment_at(now);
        next.signed_duration_since(now).num_seconds().abs() <= within
            || last.signed_duration_since(now).num_seconds().abs() <= within
    }

    /// The schedule's configuration as a structured record.
    pub fn to_record(&self) -> ScheduleRecord {
        ScheduleRecord {
            start_from: self.first_appointment().to_rfc3339(),
            timezone: self.timezone.name().to_string(),
            interval_days: self.interval_days,
        }
    }

    /// Days between occurrences.
    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// The timezone occurrences are reported in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Whole interval periods completed between the first occurrence and
    /// `now`, or `None` when the schedule has not started yet.
    fn completed_periods(&self, first: &DateTime<Tz>, now: DateTime<Utc>) -> Option<i64> {
        let local_now = now.with_timezone(&self.timezone);
        if *first > local_now {
            return None;
        }
        let days_elapsed = whole_days_between(self.start_from, &local_now);
        Some(days_elapsed.div_euclid(i64::from(self.interval_days)))
    }

    /// The occurrence `offset_days` calendar days after the anchor.
    fn occurrence(&self, offset_days: i64) -> DateTime<Tz> {
        let date = self.start_from.date() + Duration::days(offset_days);
        resolve_wall_clock(self.timezone, date.and_time(self.start_from.time()))
    }
}

impl<C: Clock> Expression for Daily<C> {
    fn first_appointment(&self) -> DateTime<Tz> {
        Daily::first_appointment(self)
    }

    fn last_appointment(&self, iterations: u32) -> DateTime<Tz> {
        Daily::last_appointment(self, iterations)
    }

    fn next_appointment(&self, iterations: u32) -> DateTime<Tz> {
        Daily::next_appointment(self, iterations)
    }

    fn is_due_now(&self, within_seconds: u32) -> bool {
        Daily::is_due_now(self, within_seconds)
    }

    fn to_record(&self) -> ScheduleRecord {
        Daily::to_record(self)
    }
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Configures and validates a [`Daily`] schedule.
///
/// Obtained from [`Daily::builder`]. Inputs are validated as they are set;
/// [`build`](Self::build) validates the interval and produces the immutable
/// schedule. The anchor defaults to the clock's current UTC wall clock and
/// the timezone to UTC.
#[derive(Debug, Clone)]
pub struct DailyBuilder<C = SystemClock> {
    interval_days: u32,
    start_from: Option<NaiveDateTime>,
    timezone: Tz,
    clock: C,
}

impl<C: Clock> DailyBuilder<C> {
    /// Anchor the schedule at a timestamp.
    ///
    /// The wall-clock reading of `instant` is kept and reinterpreted in the
    /// schedule timezone: anchoring at `2019-01-01 12:00` in any zone and
    /// configuring `America/New_York` puts the first occurrence at noon
    /// Eastern.
    pub fn start_since<T: TimeZone>(mut self, instant: DateTime<T>) -> Self {
        self.start_from = Some(instant.naive_local());
        self
    }

    /// Anchor the schedule by parsing `input` with a chrono `format` string.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidDatetime`](crate::ScheduleError::InvalidDatetime)
    /// if `input` does not match `format`.
    pub fn start_since_format(mut self, format: &str, input: &str) -> Result<Self> {
        self.start_from = Some(expression::parse_start_format(format, input)?);
        Ok(self)
    }

    /// Report occurrences in the zone named by an IANA identifier.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidTimezone`](crate::ScheduleError::InvalidTimezone)
    /// if the identifier cannot be resolved.
    pub fn timezone(mut self, id: &str) -> Result<Self> {
        self.timezone = expression::parse_timezone(id)?;
        Ok(self)
    }

    /// Report occurrences in an already-resolved zone.
    pub fn timezone_tz(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    /// Swap the time source. Defaults to [`SystemClock`].
    pub fn clock<C2: Clock>(self, clock: C2) -> DailyBuilder<C2> {
        DailyBuilder {
            interval_days: self.interval_days,
            start_from: self.start_from,
            timezone: self.timezone,
            clock,
        }
    }

    /// Validate the configuration and produce the schedule.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidInterval`](crate::ScheduleError::InvalidInterval)
    /// if the interval is zero.
    pub fn build(self) -> Result<Daily<C>> {
        let interval_days = expression::parse_interval(self.interval_days)?;
        let start_from = self
            .start_from
            .unwrap_or_else(|| self.clock.now().naive_utc());
        Ok(Daily {
            start_from,
            timezone: self.timezone,
            interval_days,
            clock: self.clock,
        })
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Whole calendar days from the anchor wall clock to `end`, flooring
/// partial days.
///
/// Comparing local dates and times (rather than dividing an elapsed
/// duration) keeps a DST-shortened or -lengthened day equal to one day.
/// The anchor's raw wall clock, not its resolved instant, carries the
/// sequence's time of day: a DST gap can push the resolved first occurrence
/// later than every other occurrence in the sequence.
fn whole_days_between(start: NaiveDateTime, end: &DateTime<Tz>) -> i64 {
    let mut days = (end.date_naive() - start.date()).num_days();
    if end.time() < start.time() {
        days -= 1;
    }
    days.max(0)
}

/// Resolve a wall-clock datetime in `tz` to an instant.
///
/// Ambiguous local times (DST fall-back) take the earlier instant. Local
/// times inside a DST gap roll forward, minute by minute, to the first
/// wall-clock time that exists again. Offset changes never skip more than
/// two days of wall-clock time, so the scan is bounded; past the bound the
/// reading is interpreted as UTC rather than failing.
fn resolve_wall_clock(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut probe = naive;
    for _ in 0..(48 * 60) {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => return dt,
            LocalResult::None => probe += Duration::minutes(1),
        }
    }
    tz.from_utc_datetime(&naive)
}

// ── Tests ───────────────────────────────────────────────────────────────────
