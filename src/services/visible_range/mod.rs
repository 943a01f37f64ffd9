//! Visible-range windowing.
//!
//! Decides which window of existing bookings the calendar needs. The policy
//! is coarse: the stored window is only ever replaced, never trimmed, so a
//! refetch happens exactly when the new window pokes outside the old one.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::ui::{VisibleRange, ViewType};
use crate::utils::date::{
    date_end, date_start, first_day_of_month, get_week_end, get_week_start, last_day_of_month,
    to_timestamp,
};

/// Every grid week that a month view of `date`'s month shows, including the
/// leading and trailing days from neighbouring months.
pub fn visible_range_for_month(date: DateTime<Tz>, first_day_of_week: u8) -> VisibleRange {
    let tz = date.timezone();
    let day = date.date_naive();
    let first = get_week_start(first_day_of_month(day), first_day_of_week);
    let last = get_week_end(last_day_of_month(day), first_day_of_week);

    VisibleRange {
        start: to_timestamp(&date_start(first, tz)),
        end: to_timestamp(&date_end(last, tz)),
    }
}

pub fn visible_range_for_week(date: DateTime<Tz>, first_day_of_week: u8) -> VisibleRange {
    let tz = date.timezone();
    let day = date.date_naive();

    VisibleRange {
        start: to_timestamp(&date_start(get_week_start(day, first_day_of_week), tz)),
        end: to_timestamp(&date_end(get_week_end(day, first_day_of_week), tz)),
    }
}

pub fn visible_range_for_day(date: DateTime<Tz>) -> VisibleRange {
    let tz = date.timezone();
    let day = date.date_naive();

    VisibleRange {
        start: to_timestamp(&date_start(day, tz)),
        end: to_timestamp(&date_end(day, tz)),
    }
}

pub fn visible_range_for_view(
    view: ViewType,
    date: DateTime<Tz>,
    first_day_of_week: u8,
) -> VisibleRange {
    match view {
        ViewType::Month => visible_range_for_month(date, first_day_of_week),
        ViewType::Week => visible_range_for_week(date, first_day_of_week),
        ViewType::Day => visible_range_for_day(date),
    }
}

/// `false` only when both ends of `candidate` lie inside `current`.
pub fn should_refetch(current: &VisibleRange, candidate: &VisibleRange) -> bool {
    !(current.contains(candidate.start) && current.contains(candidate.end))
}
