// Booking module
// Approved reservations fetched for a venue and the user's proposed selections

use serde::{Deserialize, Serialize};

use crate::models::interval::TimeInterval;

/// Title shown for selections the user has not yet submitted.
pub const NEW_BOOKING_TITLE: &str = "New booking";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Only approved reservations make a time range unavailable.
    pub fn blocks_selection(self) -> bool {
        matches!(self, BookingStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Approved
    }
}

/// A reservation owned by the bookings feed. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBooking {
    #[serde(flatten)]
    pub interval: TimeInterval,
    pub title: String,
    pub booker_name: String,
    pub booker_email: String,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl ExistingBooking {
    pub fn new(
        interval: TimeInterval,
        title: impl Into<String>,
        booker_name: impl Into<String>,
        booker_email: impl Into<String>,
    ) -> Self {
        Self {
            interval,
            title: title.into(),
            booker_name: booker_name.into(),
            booker_email: booker_email.into(),
            venue_name: None,
            status: BookingStatus::Approved,
        }
    }

    pub fn with_venue_name(mut self, venue_name: impl Into<String>) -> Self {
        self.venue_name = Some(venue_name.into());
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn blocks_selection(&self) -> bool {
        self.status.blocks_selection()
    }
}

/// One interval the user is proposing to book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingSelection {
    #[serde(flatten)]
    pub interval: TimeInterval,
}

impl NewBookingSelection {
    pub fn new(interval: TimeInterval) -> Self {
        Self { interval }
    }

    pub fn is_new(&self) -> bool {
        true
    }
}

impl From<TimeInterval> for NewBookingSelection {
    fn from(interval: TimeInterval) -> Self {
        Self::new(interval)
    }
}

/// Anything the calendar renders: a fetched reservation or a pending selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarEntry {
    Existing(ExistingBooking),
    New(NewBookingSelection),
}

impl CalendarEntry {
    pub fn interval(&self) -> TimeInterval {
        match self {
            CalendarEntry::Existing(booking) => booking.interval,
            CalendarEntry::New(selection) => selection.interval,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarEntry::Existing(booking) => &booking.title,
            CalendarEntry::New(_) => NEW_BOOKING_TITLE,
        }
    }

    /// `None` for selections, which have no server-side status yet.
    pub fn status(&self) -> Option<BookingStatus> {
        match self {
            CalendarEntry::Existing(booking) => Some(booking.status),
            CalendarEntry::New(_) => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, CalendarEntry::New(_))
    }
}
