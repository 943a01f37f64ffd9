//! Error types for the scheduling core's boundary conversions.
//!
//! Gesture handling never fails; these errors only surface where outside
//! data (wire ranges, settings) is turned into core types.

use thiserror::Error;

use crate::models::interval::Timestamp;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
