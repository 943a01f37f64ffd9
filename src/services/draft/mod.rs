//! Draft persistence for in-progress selections.
//!
//! A draft is the list of confirmed periods saved as JSON so that a booking
//! wizard can resume at the time-slot step.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Error as SerdeError;

use crate::models::interval::DateTimeRange;

pub fn load_draft(path: &Path) -> Result<Vec<DateTimeRange>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft from {}", path.display()))?;
    let periods = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(periods)
}

pub fn save_draft(path: &Path, periods: &[DateTimeRange]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(periods)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write draft to {}", path.display()))?;
    log::info!("Saved {} draft periods to {}", periods.len(), path.display());
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize draft from {}",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_draft_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let draft = load_draft(&temp_dir.path().join("draft.json")).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_draft_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("drafts").join("draft.json");
        let periods = vec![
            DateTimeRange { start_date_time: 1_728_144_000_000, end_date_time: 1_728_147_600_000 },
            DateTimeRange { start_date_time: 1_728_748_800_000, end_date_time: 1_728_752_400_000 },
        ];

        save_draft(&path, &periods).unwrap();
        assert_eq!(load_draft(&path).unwrap(), periods);
    }

    #[test]
    fn test_corrupt_draft_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("draft.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_draft(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("draft.json"));
    }
}
