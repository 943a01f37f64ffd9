// UI models module
// Calendar view vocabulary shared with the rendering layer

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::booking::CalendarEntry;
use crate::models::interval::{TimeInterval, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewType {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Month => "Month",
            ViewType::Week => "Week",
            ViewType::Day => "Day",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewType::Month),
            "week" => Ok(ViewType::Week),
            "day" => Ok(ViewType::Day),
            other => Err(format!("Unknown calendar view: {other}")),
        }
    }
}

/// The calendar's current view and the date it is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub view: ViewType,
    pub focused_date: DateTime<Tz>,
}

/// Inclusive, day-aligned window the calendar currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl VisibleRange {
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn as_interval(&self) -> TimeInterval {
        TimeInterval::spanning(self.start, self.end)
    }
}

/// How a slot gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotAction {
    Click,
    DoubleClick,
    Select,
}

/// A click or drag over calendar slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub start: Timestamp,
    pub end: Timestamp,
    pub action: SlotAction,
}

impl SlotInfo {
    pub fn range(&self) -> TimeInterval {
        TimeInterval::spanning(self.start, self.end)
    }
}

/// Toolbar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigateAction {
    Previous,
    Today,
    Next,
}

/// Report from the renderer that the displayed window changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeChange {
    /// Every visible cell date, as the month and week grids report them.
    Dates(Vec<Timestamp>),
    /// Explicit bounds, as list-style views report them.
    Bounds { start: Timestamp, end: Timestamp },
}

/// Everything the renderer needs to draw the booking calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub view: ViewType,
    pub focused_date: DateTime<Tz>,
    pub visible_range: VisibleRange,
    pub user: Option<String>,
    pub all_bookings: Vec<CalendarEntry>,
}
