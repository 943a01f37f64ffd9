// Settings module
// Scheduling preferences loaded from the user's TOML settings file

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::ui::ViewType;

/// The weekly repeat input accepts at most two digits.
pub const MAX_REPEAT_OCCURRENCES: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IANA zone used for day, week and month boundaries.
    pub timezone: String,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub default_view: ViewType,
    pub max_repeat_occurrences: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            first_day_of_week: 0, // Sunday
            default_view: ViewType::Month,
            max_repeat_occurrences: MAX_REPEAT_OCCURRENCES,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> SchedulerResult<()> {
        self.time_zone()?;

        if self.first_day_of_week > 6 {
            return Err(SchedulerError::InvalidSettings(format!(
                "first_day_of_week must be between 0 and 6, got {}",
                self.first_day_of_week
            )));
        }

        if self.max_repeat_occurrences == 0 || self.max_repeat_occurrences > MAX_REPEAT_OCCURRENCES
        {
            return Err(SchedulerError::InvalidSettings(format!(
                "max_repeat_occurrences must be between 1 and {}, got {}",
                MAX_REPEAT_OCCURRENCES, self.max_repeat_occurrences
            )));
        }

        Ok(())
    }

    pub fn time_zone(&self) -> SchedulerResult<Tz> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| SchedulerError::UnknownTimeZone(self.timezone.clone()))
    }
}
