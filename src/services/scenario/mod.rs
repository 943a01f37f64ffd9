//! Scripted replay of a booking-creation session.
//!
//! A scenario file lists the bookings a feed would return, an optional
//! draft, and the gestures a user performs. Replaying it yields the
//! confirmed periods the wizard would submit.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::booking::ExistingBooking;
use crate::models::interval::{DateTimeRange, TimeInterval, Timestamp};
use crate::models::settings::Settings;
use crate::models::ui::{NavigateAction, SlotAction, SlotInfo, ViewType, VisibleRange};
use crate::services::feed::{refresh_existing_bookings, StaticBookingFeed};
use crate::services::session::BookingSession;
use crate::utils::date::{fixed_now, from_timestamp, system_now, to_timestamp};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Fixed clock; the system clock when absent.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue_id: Option<i64>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub existing_bookings: Vec<ExistingBooking>,
    #[serde(default)]
    pub draft: Vec<DateTimeRange>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    View { view: ViewType },
    Navigate { date: Timestamp },
    Step { action: NavigateAction },
    DrillDown { date: Timestamp },
    SelectSlot {
        start: Timestamp,
        end: Timestamp,
        action: SlotAction,
    },
    Remove { start: Timestamp, end: Timestamp },
    Repeat {
        start: Timestamp,
        end: Timestamp,
        occurrences: u32,
    },
    Reset,
}

impl Command {
    fn moves_view(&self) -> bool {
        matches!(
            self,
            Command::View { .. }
                | Command::Navigate { .. }
                | Command::Step { .. }
                | Command::DrillDown { .. }
                | Command::SelectSlot { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub view: ViewType,
    pub focused_date: Timestamp,
    pub visible_range: VisibleRange,
    pub fetches: usize,
    pub confirmed_periods: Vec<DateTimeRange>,
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse scenario in {}", path.display()))
}

/// Replay `scenario`. `fallback_settings` apply when the scenario has none.
pub fn run_scenario(scenario: Scenario, fallback_settings: Settings) -> Result<ScenarioReport> {
    let settings = scenario.settings.unwrap_or(fallback_settings);
    let now_provider = scenario.now.map(fixed_now).unwrap_or_else(system_now);

    let mut session = BookingSession::with_now_provider(settings, now_provider)
        .context("failed to start booking session")?
        .with_draft(&scenario.draft);
    if let Some(venue_id) = scenario.venue_id {
        session = session.with_venue(venue_id);
    }
    if let Some(user) = scenario.user {
        session = session.with_user(user);
    }

    let feed = StaticBookingFeed::new(scenario.existing_bookings);
    let initial_query = session.fetch_query();
    refresh_existing_bookings(&mut session, &feed, &initial_query)?;
    let mut fetches = 1;

    for command in scenario.commands {
        log::debug!("Applying {:?}", command);
        let moves_view = command.moves_view();
        apply_command(&mut session, command);

        if moves_view {
            if let Some(query) = session.sync_visible_range() {
                refresh_existing_bookings(&mut session, &feed, &query)?;
                fetches += 1;
            }
        }
    }

    let state = session.view_state();
    Ok(ScenarioReport {
        view: state.view,
        focused_date: to_timestamp(&state.focused_date),
        visible_range: session.visible_range(),
        fetches,
        confirmed_periods: session.confirmed_periods(),
    })
}

fn apply_command(session: &mut BookingSession, command: Command) {
    let tz = session.time_zone();
    match command {
        Command::View { view } => session.on_view(view),
        Command::Navigate { date } => {
            session.on_navigate(from_timestamp(date, tz));
        }
        Command::Step { action } => {
            session.on_navigate_step(action);
        }
        Command::DrillDown { date } => session.on_drill_down(from_timestamp(date, tz)),
        Command::SelectSlot { start, end, action } => {
            session.on_select_slot(SlotInfo { start, end, action });
        }
        Command::Remove { start, end } => match TimeInterval::new(start, end) {
            Ok(target) => {
                session.remove(&target);
            }
            Err(err) => log::warn!("Skipping remove: {}", err),
        },
        Command::Repeat {
            start,
            end,
            occurrences,
        } => match TimeInterval::new(start, end) {
            Ok(interval) => {
                let outcome = session.repeat_slot(interval, occurrences);
                log::debug!(
                    "Repeat accepted {} and skipped {} weeks",
                    outcome.accepted,
                    outcome.skipped
                );
            }
            Err(err) => log::warn!("Skipping repeat: {}", err),
        },
        Command::Reset => session.reset(),
    }
}
