//! Calendar view adapter.
//!
//! Owns the current [`ViewState`] and applies the renderer's navigation
//! commands to it. Redundant commands are no-ops so that they do not trigger
//! downstream refetches.

use chrono::{DateTime, Days, Utc};
use chrono_tz::Tz;

use crate::models::booking::{BookingStatus, ExistingBooking};
use crate::models::interval::Timestamp;
use crate::models::ui::{NavigateAction, ViewState, ViewType};
use crate::utils::date::{
    date_start, from_timestamp, shift_month_preserving_day, start_of_day, with_time_of_day,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarViewState {
    state: ViewState,
}

impl CalendarViewState {
    pub fn new(view: ViewType, focused_date: DateTime<Tz>) -> Self {
        Self {
            state: ViewState { view, focused_date },
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn view(&self) -> ViewType {
        self.state.view
    }

    pub fn focused_date(&self) -> DateTime<Tz> {
        self.state.focused_date
    }

    pub fn time_zone(&self) -> Tz {
        self.state.focused_date.timezone()
    }

    pub fn on_view(&mut self, view: ViewType) {
        log::debug!("Calendar view {} -> {}", self.state.view, view);
        self.state.view = view;
    }

    /// Focus the start of `date`'s day. Returns `false` if already focused there.
    pub fn on_navigate(&mut self, date: DateTime<Tz>) -> bool {
        let target = start_of_day(date.with_timezone(&self.time_zone()));
        if target == self.state.focused_date {
            return false;
        }
        self.state.focused_date = target;
        true
    }

    /// Toolbar navigation: one view-sized step back or forward, or today.
    pub fn on_navigate_step(&mut self, action: NavigateAction, now: DateTime<Utc>) -> bool {
        let tz = self.time_zone();
        let current = self.state.focused_date.date_naive();
        let target = match (action, self.state.view) {
            (NavigateAction::Today, _) => Some(now.with_timezone(&tz).date_naive()),
            (NavigateAction::Previous, ViewType::Day) => current.checked_sub_days(Days::new(1)),
            (NavigateAction::Next, ViewType::Day) => current.checked_add_days(Days::new(1)),
            (NavigateAction::Previous, ViewType::Week) => current.checked_sub_days(Days::new(7)),
            (NavigateAction::Next, ViewType::Week) => current.checked_add_days(Days::new(7)),
            (NavigateAction::Previous, ViewType::Month) => {
                Some(shift_month_preserving_day(current, -1))
            }
            (NavigateAction::Next, ViewType::Month) => Some(shift_month_preserving_day(current, 1)),
        };
        let Some(target) = target else {
            log::debug!("Cannot step {:?} past the calendar's range", action);
            return false;
        };
        self.on_navigate(date_start(target, tz))
    }

    /// Open the day view for `date`, scrolled to the current time of day.
    pub fn on_drill_down(&mut self, date: DateTime<Tz>, now: DateTime<Utc>) {
        let tz = self.time_zone();
        let day = date.with_timezone(&tz).date_naive();
        self.state.view = ViewType::Day;
        self.state.focused_date = with_time_of_day(day, now.with_timezone(&tz));
    }

    /// Jump to an entry the user clicked.
    ///
    /// Already in the day view, the focus only moves when `force_jump` is set,
    /// so clicking an entry on the visible day keeps the scroll position.
    pub fn on_select_event(&mut self, entry_start: Timestamp, force_jump: bool) {
        if force_jump || self.state.view != ViewType::Day {
            self.state.focused_date = from_timestamp(entry_start, self.time_zone());
            self.state.view = ViewType::Day;
        }
    }
}

/// Which booking details a calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub show_venue_name: bool,
    pub show_booker: bool,
}

impl ProjectionOptions {
    /// The booking-creation calendar is already scoped to one venue.
    pub const CREATION: ProjectionOptions = ProjectionOptions {
        show_venue_name: false,
        show_booker: true,
    };
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            show_venue_name: true,
            show_booker: true,
        }
    }
}

/// Bookings as a calendar displays them: cancelled ones dropped and hidden
/// details blanked.
pub fn project_bookings(
    bookings: &[ExistingBooking],
    options: ProjectionOptions,
) -> Vec<ExistingBooking> {
    bookings
        .iter()
        .filter(|booking| booking.status != BookingStatus::Cancelled)
        .map(|booking| {
            let mut projected = booking.clone();
            if !options.show_venue_name {
                projected.venue_name = None;
            }
            if !options.show_booker {
                projected.booker_name.clear();
                projected.booker_email.clear();
            }
            projected
        })
        .collect()
}
