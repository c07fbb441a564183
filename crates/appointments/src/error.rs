//! Error types for schedule configuration.
//!
//! All variants are raised while a schedule is being configured, never by the
//! occurrence queries. A successfully built schedule answers every query
//! without failing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
