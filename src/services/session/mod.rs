//! Booking-creation session.
//!
//! One session per pass through the booking wizard's time-slot step. It owns
//! the view adapter, the selection state, the visible window and the
//! bookings fetched for it, and exposes the renderer's gestures as plain
//! command methods.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::error::SchedulerResult;
use crate::models::booking::{CalendarEntry, ExistingBooking, NewBookingSelection};
use crate::models::interval::{DateTimeRange, TimeInterval, Timestamp};
use crate::models::settings::Settings;
use crate::models::ui::{
    NavigateAction, RangeChange, SlotAction, SlotInfo, ViewSnapshot, ViewState, ViewType,
    VisibleRange,
};
use crate::services::calendar_view::{project_bookings, CalendarViewState, ProjectionOptions};
use crate::services::feed::FetchQuery;
use crate::services::interval::bounding_range;
use crate::services::selection::{is_selectable, RepeatOutcome, SelectionState};
use crate::services::visible_range::{should_refetch, visible_range_for_month, visible_range_for_view};
use crate::utils::date::{self, is_same_day, system_now, NowProvider};

pub struct BookingSession {
    settings: Settings,
    tz: Tz,
    venue_id: Option<i64>,
    user: Option<String>,
    view: CalendarViewState,
    selection: SelectionState,
    visible_range: VisibleRange,
    existing_bookings: Vec<ExistingBooking>,
    projection: ProjectionOptions,
    now_provider: NowProvider,
}

impl BookingSession {
    pub fn new(settings: Settings) -> SchedulerResult<Self> {
        Self::with_now_provider(settings, system_now())
    }

    /// Session whose clock is `now_provider`; the initial focus is "now".
    pub fn with_now_provider(settings: Settings, now_provider: NowProvider) -> SchedulerResult<Self> {
        settings.validate()?;
        let tz = settings.time_zone()?;
        let focused = now_provider().with_timezone(&tz);
        let visible_range = visible_range_for_month(focused, settings.first_day_of_week);

        Ok(Self {
            view: CalendarViewState::new(settings.default_view, focused),
            settings,
            tz,
            venue_id: None,
            user: None,
            selection: SelectionState::new(),
            visible_range,
            existing_bookings: Vec::new(),
            projection: ProjectionOptions::CREATION,
            now_provider,
        })
    }

    pub fn with_venue(mut self, venue_id: i64) -> Self {
        self.venue_id = Some(venue_id);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Booking details shown in [`Self::all_bookings`]; venue names are hidden by default.
    pub fn with_projection(mut self, projection: ProjectionOptions) -> Self {
        self.projection = projection;
        self
    }

    /// Resume previously confirmed periods.
    pub fn with_draft(mut self, periods: &[DateTimeRange]) -> Self {
        self.selection = SelectionState::from_periods(periods);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    pub fn existing_bookings(&self) -> &[ExistingBooking] {
        &self.existing_bookings
    }

    pub fn new_bookings(&self) -> &[NewBookingSelection] {
        self.selection.new_bookings()
    }

    /// Replace the fetched bookings wholesale.
    pub fn set_existing_bookings(&mut self, bookings: Vec<ExistingBooking>) {
        self.existing_bookings = bookings;
    }

    /// Query for the bookings covering the current window.
    pub fn fetch_query(&self) -> FetchQuery {
        FetchQuery::approved(self.venue_id, self.visible_range)
    }

    pub fn on_view(&mut self, view: ViewType) {
        self.view.on_view(view);
    }

    pub fn on_navigate(&mut self, date: DateTime<Tz>) -> bool {
        self.view.on_navigate(date)
    }

    pub fn on_navigate_step(&mut self, action: NavigateAction) -> bool {
        let now = self.now();
        self.view.on_navigate_step(action, now)
    }

    pub fn on_drill_down(&mut self, date: DateTime<Tz>) {
        let now = self.now();
        self.view.on_drill_down(date, now);
    }

    pub fn on_select_event(&mut self, entry: &CalendarEntry, force_jump: bool) {
        self.view.on_select_event(entry.interval().start, force_jump);
    }

    /// Whether a drag over `candidate` would be accepted.
    pub fn on_selecting(&self, candidate: &TimeInterval) -> bool {
        is_selectable(candidate, &self.existing_bookings, self.now_ms())
    }

    /// Dispatch a click or drag over calendar slots.
    ///
    /// Returns `true` when the selection list changed.
    pub fn on_select_slot(&mut self, slot: SlotInfo) -> bool {
        let range = slot.range();
        let start = date::from_timestamp(range.start, self.tz);
        let end = date::from_timestamp(range.end, self.tz);

        match self.view.view() {
            ViewType::Month => {
                if slot.action == SlotAction::Click {
                    self.on_drill_down(start);
                }
                false
            }
            ViewType::Week | ViewType::Day => {
                if slot.action == SlotAction::Click && range.is_instant() {
                    self.on_drill_down(start);
                    return false;
                }
                if !is_same_day(start, end) {
                    if slot.action == SlotAction::Click {
                        self.on_drill_down(start);
                    }
                    return false;
                }
                let now = self.now_ms();
                self.selection.select(range, &self.existing_bookings, now)
            }
        }
    }

    /// Record a new displayed window.
    ///
    /// Returns the query to run when the window is not covered by the one
    /// already fetched; otherwise keeps the stored window and returns `None`.
    pub fn on_range_change(&mut self, change: RangeChange) -> Option<FetchQuery> {
        let candidate = match change {
            RangeChange::Dates(dates) => bounding_range(&dates, self.tz)?,
            RangeChange::Bounds { start, end } => bounding_range(&[start, end], self.tz)?,
        };

        if !should_refetch(&self.visible_range, &candidate) {
            log::debug!(
                "Visible range {}..{} already covered",
                candidate.start,
                candidate.end
            );
            return None;
        }

        log::info!(
            "Visible range grew to {}..{}, refetch needed",
            candidate.start,
            candidate.end
        );
        self.visible_range = candidate;
        Some(self.fetch_query())
    }

    /// Report the window implied by the current view and focus.
    pub fn sync_visible_range(&mut self) -> Option<FetchQuery> {
        let state = self.view.state();
        let range =
            visible_range_for_view(state.view, state.focused_date, self.settings.first_day_of_week);
        self.on_range_change(RangeChange::Bounds {
            start: range.start,
            end: range.end,
        })
    }

    pub fn remove(&mut self, target: &TimeInterval) -> bool {
        self.selection.remove(target)
    }

    /// Remove a clicked entry. Only new selections can be removed.
    pub fn remove_entry(&mut self, entry: &CalendarEntry) -> bool {
        match entry {
            CalendarEntry::New(selection) => self.selection.remove(&selection.interval),
            CalendarEntry::Existing(_) => false,
        }
    }

    /// Select `interval` again in each of the following weeks.
    pub fn repeat_slot(&mut self, interval: TimeInterval, occurrences: u32) -> RepeatOutcome {
        let occurrences = occurrences.min(self.settings.max_repeat_occurrences);
        let now = self.now_ms();
        self.selection
            .repeat(interval, occurrences, &self.existing_bookings, now, self.tz)
    }

    pub fn reset(&mut self) {
        self.selection.reset();
    }

    pub fn confirmed_periods(&self) -> Vec<DateTimeRange> {
        self.selection.confirmed_periods()
    }

    /// Existing bookings, projected for display, followed by new selections.
    pub fn all_bookings(&self) -> Vec<CalendarEntry> {
        project_bookings(&self.existing_bookings, self.projection)
            .into_iter()
            .map(CalendarEntry::Existing)
            .chain(
                self.selection
                    .new_bookings()
                    .iter()
                    .copied()
                    .map(CalendarEntry::New),
            )
            .collect()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.view.state();
        ViewSnapshot {
            view: state.view,
            focused_date: state.focused_date,
            visible_range: self.visible_range,
            user: self.user.clone(),
            all_bookings: self.all_bookings(),
        }
    }

    pub fn is_past_day(&self, date: NaiveDate) -> bool {
        date::is_past_day(date, self.now().with_timezone(&self.tz))
    }

    pub fn is_past_slot(&self, instant: Timestamp) -> bool {
        date::is_past_slot(instant, self.now())
    }

    fn now(&self) -> DateTime<chrono::Utc> {
        (self.now_provider)()
    }

    fn now_ms(&self) -> Timestamp {
        date::to_timestamp(&self.now())
    }
}
