// Test fixtures - reusable test data
// Dates and bookings shared by the integration tests

#![allow(dead_code)]

use booking_scheduler::models::booking::{BookingStatus, ExistingBooking};
use booking_scheduler::models::interval::{TimeInterval, Timestamp};
use booking_scheduler::models::settings::Settings;
use booking_scheduler::services::session::BookingSession;
use booking_scheduler::utils::date::{fixed_now, to_timestamp};
use chrono::{DateTime, TimeZone, Utc};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Epoch ms for the given UTC wall-clock time
    pub fn utc_ms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
        to_timestamp(&utc(year, month, day, hour, minute))
    }

    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
    }

    /// Oct 1, 2024 at 09:00 UTC, before every October booking below
    pub fn october_morning() -> DateTime<Utc> {
        utc(2024, 10, 1, 9, 0)
    }
}

/// Sample bookings for testing
pub mod bookings {
    use super::*;

    pub fn approved(start: Timestamp, end: Timestamp) -> ExistingBooking {
        ExistingBooking::new(
            TimeInterval { start, end },
            "Residents' meeting",
            "Alex Tan",
            "alex@example.com",
        )
        .with_venue_name("Function Room")
    }

    pub fn with_status(start: Timestamp, end: Timestamp, status: BookingStatus) -> ExistingBooking {
        approved(start, end).with_status(status)
    }

    /// The Oct 5 afternoon booking, 14:00 to 16:00
    pub fn october_fifth_afternoon() -> ExistingBooking {
        approved(
            dates::utc_ms(2024, 10, 5, 14, 0),
            dates::utc_ms(2024, 10, 5, 16, 0),
        )
    }
}

/// Session in UTC with the clock pinned to `now`
pub fn session_at(now: DateTime<Utc>) -> BookingSession {
    BookingSession::with_now_provider(Settings::default(), fixed_now(now)).unwrap()
}
