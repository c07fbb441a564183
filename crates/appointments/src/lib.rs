//! # appointments
//!
//! Deterministic recurring-appointment computation.
//!
//! Given an anchor datetime, an IANA timezone, and an interval in whole
//! days, a schedule expression answers four questions: when was the first
//! occurrence, when was the most recent occurrence, when is the k-th future
//! occurrence, and is the schedule due right now. All arithmetic steps in
//! calendar days in the configured timezone, so occurrences keep their
//! wall-clock time across DST transitions, and "now" always comes from an
//! injected [`Clock`] so evaluation is frozen-time testable.
//!
//! ## Modules
//!
//! - [`daily`]: fixed-interval daily schedules (the core arithmetic)
//! - [`expression`]: the operation contract shared by expression types,
//!   week-of-month constants, and input validation
//! - [`clock`]: the injectable time source
//! - [`error`]: configuration-time error types
//!
//! ## Example
//!
//! ```
//! use appointments::{Daily, FixedClock};
//! use chrono::{TimeZone, Utc};
//!
//! // A weekly schedule anchored at noon Eastern, evaluated a month later.
//! let now = Utc.with_ymd_and_hms(2019, 1, 31, 17, 0, 0).unwrap();
//! let schedule = Daily::builder(7)
//!     .start_since_format("%Y-%m-%d %H:%M:%S", "2019-01-01 12:00:00")?
//!     .timezone("America/New_York")?
//!     .clock(FixedClock::new(now))
//!     .build()?;
//!
//! assert_eq!(
//!     schedule.last_appointment(0).to_rfc3339(),
//!     "2019-01-29T12:00:00-05:00"
//! );
//! assert_eq!(
//!     schedule.next_appointment(0).to_rfc3339(),
//!     "2019-02-05T12:00:00-05:00"
//! );
//! assert!(!schedule.is_due_now(0));
//! # Ok::<(), appointments::ScheduleError>(())
//! ```

pub mod clock;
pub mod daily;
pub mod error;
pub mod expression;

pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::{Daily, DailyBuilder};
pub use error::ScheduleError;
pub use expression::{Expression, ScheduleRecord, WeekOrdinal};
