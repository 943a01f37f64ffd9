// Booking scheduler
// Replays a booking scenario and prints the periods it would submit

use std::path::PathBuf;

use anyhow::{Context, Result};

use booking_scheduler::models::settings::Settings;
use booking_scheduler::services::draft::{load_draft, save_draft};
use booking_scheduler::services::scenario::{load_scenario, run_scenario};
use booking_scheduler::services::settings::SettingsService;

const USAGE: &str = "usage: booking-scheduler <scenario.json> [draft.json]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let scenario_path = args.next().context(USAGE)?;
    let draft_path = args.next();

    log::info!("Replaying booking scenario {}", scenario_path.display());

    let settings = SettingsService::at_default_location()
        .and_then(|service| service.get())
        .unwrap_or_else(|err| {
            log::warn!("Using default settings: {:#}", err);
            Settings::default()
        });

    let mut scenario = load_scenario(&scenario_path)?;
    if let Some(path) = &draft_path {
        if scenario.draft.is_empty() {
            scenario.draft = load_draft(path)?;
        }
    }

    let report = run_scenario(scenario, settings)?;

    if let Some(path) = &draft_path {
        save_draft(path, &report.confirmed_periods)?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
