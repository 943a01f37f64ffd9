// Date utility functions
// Day, week and month boundaries computed in an explicit time zone

use std::sync::Arc;

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;

use crate::models::interval::Timestamp;

/// Source of "now" for future-only checks and drill-down.
pub type NowProvider = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_now() -> NowProvider {
    Arc::new(Utc::now)
}

pub fn fixed_now(instant: DateTime<Utc>) -> NowProvider {
    Arc::new(move || instant)
}

pub fn to_timestamp<T: TimeZone>(date: &DateTime<T>) -> Timestamp {
    date.timestamp_millis()
}

/// Convert epoch milliseconds into `tz`.
///
/// Values outside chrono's representable range are clamped to its bounds.
pub fn from_timestamp(timestamp: Timestamp, tz: Tz) -> DateTime<Tz> {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp).unwrap_or(if timestamp < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    });
    utc.with_timezone(&tz)
}

/// Resolve a wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap move forward to the first valid instant after the gap.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(date) => date,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..4 {
                let Some(next) = probe.checked_add_signed(Duration::minutes(30)) else {
                    break;
                };
                probe = next;
                if let Some(date) = tz.from_local_datetime(&probe).earliest() {
                    return date;
                }
            }
            tz.from_utc_datetime(&naive)
        }
    }
}

pub fn is_same_day(date1: DateTime<Tz>, date2: DateTime<Tz>) -> bool {
    date1.date_naive() == date2.with_timezone(&date1.timezone()).date_naive()
}

pub fn start_of_day(date: DateTime<Tz>) -> DateTime<Tz> {
    date_start(date.date_naive(), date.timezone())
}

pub fn end_of_day(date: DateTime<Tz>) -> DateTime<Tz> {
    date_end(date.date_naive(), date.timezone())
}

/// First instant of `date` in `tz`.
pub fn date_start(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Last millisecond of `date` in `tz`.
pub fn date_end(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    resolve_local(tz, date.and_time(last_milli))
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date.checked_sub_days(Days::new(offset as u64))
        .unwrap_or(NaiveDate::MIN)
}

/// Last day of the week containing `date`, clamped to the calendar's range.
pub fn get_week_end(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    get_week_start(date, first_day_of_week)
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Move `current` by whole months, clamping the day to the target month's length.
pub fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) as u32 + 1;

    let Some(first) = NaiveDate::from_ymd_opt(new_year, new_month, 1) else {
        return current;
    };
    let max_day = last_day_of_month(first).day();
    first
        .with_day(current.day().min(max_day))
        .unwrap_or(first)
}

/// `date` at the wall-clock time of day of `clock`.
pub fn with_time_of_day(date: NaiveDate, clock: DateTime<Tz>) -> DateTime<Tz> {
    let time = clock.time();
    let time = NaiveTime::from_hms_milli_opt(
        time.hour(),
        time.minute(),
        time.second(),
        time.nanosecond() / 1_000_000 % 1_000,
    )
    .unwrap_or(NaiveTime::MIN);
    resolve_local(clock.timezone(), date.and_time(time))
}

/// Whether `date` lies before today in the zone of `now`.
pub fn is_past_day(date: NaiveDate, now: DateTime<Tz>) -> bool {
    date < now.date_naive()
}

/// Whether the slot starting at `instant` has already begun.
pub fn is_past_slot(instant: Timestamp, now: DateTime<Utc>) -> bool {
    instant < now.timestamp_millis()
}
