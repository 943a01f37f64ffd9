//! Pure operations over time intervals.
//!
//! Conflict checks and merging disagree about touching
//! intervals: `[0, 10]` and `[10, 20]` do not overlap (back-to-back bookings
//! are legal) but do merge into `[0, 20]` (consecutive selected slots form
//! one run).

use chrono::Duration;
use chrono_tz::Tz;

use crate::models::interval::{TimeInterval, Timestamp};
use crate::models::ui::VisibleRange;
use crate::utils::date::{date_end, date_start, from_timestamp, resolve_local, to_timestamp};

/// Options for [`overlaps`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapOptions {
    /// Count shared endpoints as overlap.
    pub inclusive: bool,
}

impl OverlapOptions {
    pub const EXCLUSIVE: OverlapOptions = OverlapOptions { inclusive: false };
    pub const INCLUSIVE: OverlapOptions = OverlapOptions { inclusive: true };
}

/// Whether two intervals share an instant.
///
/// With the default (exclusive) options, intervals that only touch at an
/// endpoint do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval, options: OverlapOptions) -> bool {
    if options.inclusive {
        a.start <= b.end && b.start <= a.end
    } else {
        a.start < b.end && b.start < a.end
    }
}

/// Canonical form of `intervals`: sorted by start, no two members
/// overlapping or touching, covering exactly the same instants.
pub fn merge<I>(intervals: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = TimeInterval>,
{
    let mut sorted: Vec<TimeInterval> = intervals.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(run) if interval.start <= run.end => {
                run.end = run.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Whether `intervals` is already in canonical form.
pub fn is_canonical(intervals: &[TimeInterval]) -> bool {
    intervals
        .windows(2)
        .all(|pair| pair[0].end < pair[1].start)
}

/// Whole-day window spanning `dates`: start of the earliest day to the end of
/// the latest. `None` when `dates` is empty.
pub fn bounding_range(dates: &[Timestamp], tz: Tz) -> Option<VisibleRange> {
    let earliest = *dates.iter().min()?;
    let latest = *dates.iter().max()?;

    let start = date_start(from_timestamp(earliest, tz).date_naive(), tz);
    let end = date_end(from_timestamp(latest, tz).date_naive(), tz);

    Some(VisibleRange {
        start: to_timestamp(&start),
        end: to_timestamp(&end),
    })
}

/// `occurrences` copies of `interval`, each one calendar week after the last.
///
/// The first copy is `interval` itself. Weeks are counted on the wall clock
/// of `tz`, so a 14:00 slot stays at 14:00 across a DST change. Copies that
/// would fall past the end of the calendar are not produced, so the result
/// may be shorter than `occurrences`.
pub fn repeated_ranges(interval: &TimeInterval, occurrences: u32, tz: Tz) -> Vec<TimeInterval> {
    let start = from_timestamp(interval.start, tz).naive_local();
    let end = from_timestamp(interval.end, tz).naive_local();

    (0..occurrences)
        .map_while(|week| {
            let shift = Duration::weeks(i64::from(week));
            let shifted_start = start.checked_add_signed(shift)?;
            let shifted_end = end.checked_add_signed(shift)?;
            Some(TimeInterval::spanning(
                to_timestamp(&resolve_local(tz, shifted_start)),
                to_timestamp(&resolve_local(tz, shifted_end)),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::{Europe::London, UTC};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn iv(start: Timestamp, end: Timestamp) -> TimeInterval {
        TimeInterval { start, end }
    }

    #[test_case(iv(0, 10), iv(10, 20), false, false ; "touching exclusive")]
    #[test_case(iv(0, 10), iv(10, 20), true, true ; "touching inclusive")]
    #[test_case(iv(0, 10), iv(5, 20), false, true ; "partial overlap")]
    #[test_case(iv(0, 30), iv(10, 20), false, true ; "containment")]
    #[test_case(iv(0, 10), iv(11, 20), true, false ; "disjoint inclusive")]
    #[test_case(iv(20, 30), iv(0, 10), false, false ; "disjoint reversed order")]
    fn test_overlaps(a: TimeInterval, b: TimeInterval, inclusive: bool, expected: bool) {
        let options = OverlapOptions { inclusive };
        assert_eq!(overlaps(&a, &b, options), expected);
        assert_eq!(overlaps(&b, &a, options), expected);
    }

    #[test]
    fn test_default_options_are_exclusive() {
        assert_eq!(OverlapOptions::default(), OverlapOptions::EXCLUSIVE);
    }

    #[test]
    fn test_merge_touching_intervals() {
        assert_eq!(merge(vec![iv(0, 10), iv(10, 20)]), vec![iv(0, 20)]);
    }

    #[test]
    fn test_merge_unordered_input() {
        let merged = merge(vec![iv(40, 50), iv(0, 10), iv(5, 15), iv(30, 35)]);
        assert_eq!(merged, vec![iv(0, 15), iv(30, 35), iv(40, 50)]);
        assert!(is_canonical(&merged));
    }

    #[test]
    fn test_merge_bridges_two_runs() {
        let merged = merge(vec![iv(0, 10), iv(20, 30), iv(10, 20)]);
        assert_eq!(merged, vec![iv(0, 30)]);
    }

    #[test]
    fn test_merge_keeps_contained_run_end() {
        assert_eq!(merge(vec![iv(0, 100), iv(10, 20)]), vec![iv(0, 100)]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_is_canonical_rejects_touching() {
        assert!(!is_canonical(&[iv(0, 10), iv(10, 20)]));
        assert!(is_canonical(&[iv(0, 10), iv(11, 20)]));
    }

    #[test]
    fn test_bounding_range_covers_whole_days() {
        let dates = vec![
            to_timestamp(&UTC.with_ymd_and_hms(2024, 10, 9, 0, 0, 0).unwrap()),
            to_timestamp(&UTC.with_ymd_and_hms(2024, 10, 6, 0, 0, 0).unwrap()),
            to_timestamp(&UTC.with_ymd_and_hms(2024, 10, 12, 0, 0, 0).unwrap()),
        ];
        let range = bounding_range(&dates, UTC).unwrap();
        assert_eq!(
            range.start,
            to_timestamp(&UTC.with_ymd_and_hms(2024, 10, 6, 0, 0, 0).unwrap())
        );
        assert_eq!(
            range.end,
            to_timestamp(&UTC.with_ymd_and_hms(2024, 10, 13, 0, 0, 0).unwrap()) - 1
        );
    }

    #[test]
    fn test_bounding_range_empty() {
        assert_eq!(bounding_range(&[], UTC), None);
    }

    #[test]
    fn test_repeated_ranges_weekly() {
        let start = UTC.with_ymd_and_hms(2024, 10, 5, 16, 0, 0).unwrap();
        let slot = iv(to_timestamp(&start), to_timestamp(&(start + Duration::hours(1))));
        let repeated = repeated_ranges(&slot, 3, UTC);

        let week_ms = Duration::weeks(1).num_milliseconds();
        assert_eq!(
            repeated,
            vec![
                slot,
                iv(slot.start + week_ms, slot.end + week_ms),
                iv(slot.start + 2 * week_ms, slot.end + 2 * week_ms),
            ]
        );
    }

    #[test]
    fn test_repeated_ranges_keep_wall_clock_across_dst() {
        // London leaves BST on 2024-10-27
        let start = London.with_ymd_and_hms(2024, 10, 21, 14, 0, 0).unwrap();
        let slot = iv(to_timestamp(&start), to_timestamp(&(start + Duration::hours(2))));
        let repeated = repeated_ranges(&slot, 2, London);

        let next = from_timestamp(repeated[1].start, London);
        assert_eq!(next, London.with_ymd_and_hms(2024, 10, 28, 14, 0, 0).unwrap());
        assert_eq!(repeated[1].duration_ms(), slot.duration_ms());
    }

    #[test]
    fn test_repeated_ranges_stop_at_calendar_end() {
        let last = iv(Timestamp::MAX - 15, Timestamp::MAX - 10);
        let repeated = repeated_ranges(&last, 3, UTC);
        assert_eq!(repeated.len(), 1);
        assert!(repeated[0].is_instant());
    }

    #[test]
    fn test_repeated_ranges_zero_occurrences() {
        assert!(repeated_ranges(&iv(0, 10), 0, UTC).is_empty());
    }
}
