// Interval module
// Absolute time ranges and their wire representation

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// Absolute instant in epoch milliseconds.
pub type Timestamp = i64;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Time range `[start, end]` between two absolute instants.
///
/// Invariant: `start <= end`. Constructors enforce it; code that builds the
/// struct literally is expected to uphold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "DateTimeRange", into = "DateTimeRange")]
pub struct TimeInterval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeInterval {
    /// Create a validated interval
    ///
    /// # Examples
    /// ```
    /// use booking_scheduler::models::interval::TimeInterval;
    ///
    /// let slot = TimeInterval::new(0, 30 * 60_000).unwrap();
    /// assert_eq!(slot.duration_minutes(), 30);
    /// assert!(TimeInterval::new(10, 0).is_err());
    /// ```
    pub fn new(start: Timestamp, end: Timestamp) -> SchedulerResult<Self> {
        if end < start {
            return Err(SchedulerError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Interval covering both endpoints regardless of argument order.
    pub fn spanning(a: Timestamp, b: Timestamp) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_ms() / MILLIS_PER_MINUTE
    }

    /// A single instant (`start == end`), the shape of a plain click.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive containment of an instant.
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Inclusive containment of a whole interval.
    pub fn contains_interval(&self, other: &TimeInterval) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}

/// Wire form of an interval: `{startDateTime, endDateTime}` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeRange {
    pub start_date_time: Timestamp,
    pub end_date_time: Timestamp,
}

impl From<TimeInterval> for DateTimeRange {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start_date_time: interval.start,
            end_date_time: interval.end,
        }
    }
}

impl TryFrom<DateTimeRange> for TimeInterval {
    type Error = SchedulerError;

    fn try_from(range: DateTimeRange) -> Result<Self, Self::Error> {
        TimeInterval::new(range.start_date_time, range.end_date_time)
    }
}
