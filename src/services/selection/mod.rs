//! Selection state machine for new booking intervals.
//!
//! Holds the time ranges a user is proposing to book. The list is kept in
//! canonical form after every operation: sorted, with no two selections
//! overlapping or touching. Invalid gestures are ignored rather than
//! reported.

use chrono_tz::Tz;

use crate::models::booking::{ExistingBooking, NewBookingSelection};
use crate::models::interval::{DateTimeRange, TimeInterval, Timestamp};
use crate::services::interval::{merge, overlaps, repeated_ranges, OverlapOptions};

/// Whether `candidate` may become a new booking.
///
/// Both ends must be strictly after `now`, and the range must not overlap
/// (touching is fine) any booking that blocks selection. Other pending
/// selections are not consulted; merging handles those.
pub fn is_selectable(
    candidate: &TimeInterval,
    existing_bookings: &[ExistingBooking],
    now: Timestamp,
) -> bool {
    candidate.start > now
        && candidate.end > now
        && !existing_bookings.iter().any(|booking| {
            booking.blocks_selection()
                && overlaps(candidate, &booking.interval, OverlapOptions::EXCLUSIVE)
        })
}

/// Result of a weekly repeat request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatOutcome {
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    new_bookings: Vec<NewBookingSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from previously confirmed periods, e.g. when resuming a draft.
    ///
    /// Reversed ranges are dropped; the rest are merged into canonical form.
    pub fn from_periods(periods: &[DateTimeRange]) -> Self {
        let intervals = periods.iter().filter_map(|period| {
            TimeInterval::try_from(*period)
                .map_err(|err| log::warn!("Dropping draft period: {}", err))
                .ok()
        });

        let mut state = Self::new();
        state.replace(merge(intervals));
        state
    }

    pub fn new_bookings(&self) -> &[NewBookingSelection] {
        &self.new_bookings
    }

    pub fn intervals(&self) -> Vec<TimeInterval> {
        self.new_bookings.iter().map(|booking| booking.interval).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.new_bookings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.new_bookings.len()
    }

    /// Add `candidate`, merging it with any selections it overlaps or touches.
    ///
    /// Returns `false` (and leaves the state untouched) when the candidate is
    /// a single instant or fails [`is_selectable`].
    pub fn select(
        &mut self,
        candidate: TimeInterval,
        existing_bookings: &[ExistingBooking],
        now: Timestamp,
    ) -> bool {
        if candidate.is_instant() {
            log::debug!("Ignoring zero-length selection at {}", candidate.start);
            return false;
        }

        if !is_selectable(&candidate, existing_bookings, now) {
            log::debug!(
                "Ignoring unavailable selection {}..{}",
                candidate.start,
                candidate.end
            );
            return false;
        }

        let merged = merge(self.intervals().into_iter().chain(std::iter::once(candidate)));
        self.replace(merged);
        true
    }

    /// Remove the selection exactly equal to `target`.
    ///
    /// Sub-ranges of a merged selection are not split out; such a request
    /// leaves the state unchanged and returns `false`.
    pub fn remove(&mut self, target: &TimeInterval) -> bool {
        let before = self.new_bookings.len();
        self.new_bookings
            .retain(|booking| booking.interval != *target);

        let removed = self.new_bookings.len() != before;
        if !removed {
            log::debug!("No selection matches {}..{}", target.start, target.end);
        }
        removed
    }

    /// Select `interval` and its weekly repeats, skipping unavailable weeks.
    ///
    /// Weeks past the end of the calendar count as skipped.
    pub fn repeat(
        &mut self,
        interval: TimeInterval,
        occurrences: u32,
        existing_bookings: &[ExistingBooking],
        now: Timestamp,
        tz: Tz,
    ) -> RepeatOutcome {
        let candidates = repeated_ranges(&interval, occurrences, tz);
        let out_of_range = (occurrences as usize).saturating_sub(candidates.len());
        let (accepted, skipped): (Vec<TimeInterval>, Vec<TimeInterval>) =
            candidates.into_iter().partition(|candidate| {
                !candidate.is_instant() && is_selectable(candidate, existing_bookings, now)
            });

        let outcome = RepeatOutcome {
            accepted: accepted.len(),
            skipped: skipped.len() + out_of_range,
        };

        if outcome.skipped > 0 {
            log::debug!(
                "Skipped {} unavailable weekly repeats of {}..{}",
                outcome.skipped,
                interval.start,
                interval.end
            );
        }

        if !accepted.is_empty() {
            let merged = merge(self.intervals().into_iter().chain(accepted));
            self.replace(merged);
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.new_bookings.clear();
    }

    /// Hand-off form submitted with the booking request.
    pub fn confirmed_periods(&self) -> Vec<DateTimeRange> {
        self.new_bookings
            .iter()
            .map(|booking| DateTimeRange::from(booking.interval))
            .collect()
    }

    fn replace(&mut self, intervals: Vec<TimeInterval>) {
        self.new_bookings = intervals.into_iter().map(NewBookingSelection::new).collect();
    }
}
