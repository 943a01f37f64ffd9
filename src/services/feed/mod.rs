//! Existing-bookings feed.
//!
//! The scheduling core never fetches on its own; it only hands out a
//! [`FetchQuery`] when the visible window grows. Callers run the query
//! against a [`BookingFeed`] and pass the result back in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingStatus, ExistingBooking};
use crate::models::interval::Timestamp;
use crate::models::ui::VisibleRange;
use crate::services::interval::{overlaps, OverlapOptions};
use crate::services::session::BookingSession;

/// Bookings request for one venue and window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchQuery {
    pub venue_id: Option<i64>,
    pub status: BookingStatus,
    pub visible_range_start: Timestamp,
    pub visible_range_end: Timestamp,
}

impl FetchQuery {
    pub fn approved(venue_id: Option<i64>, range: VisibleRange) -> Self {
        Self {
            venue_id,
            status: BookingStatus::Approved,
            visible_range_start: range.start,
            visible_range_end: range.end,
        }
    }

    pub fn range(&self) -> VisibleRange {
        VisibleRange {
            start: self.visible_range_start,
            end: self.visible_range_end,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait BookingFeed {
    fn fetch(&self, query: &FetchQuery) -> Result<Vec<ExistingBooking>>;
}

/// Feed over a fixed list of bookings, filtered per query.
#[derive(Debug, Clone, Default)]
pub struct StaticBookingFeed {
    bookings: Vec<ExistingBooking>,
}

impl StaticBookingFeed {
    pub fn new(bookings: Vec<ExistingBooking>) -> Self {
        Self { bookings }
    }
}

impl BookingFeed for StaticBookingFeed {
    fn fetch(&self, query: &FetchQuery) -> Result<Vec<ExistingBooking>> {
        let window = query.range().as_interval();
        Ok(self
            .bookings
            .iter()
            .filter(|booking| booking.status == query.status)
            .filter(|booking| overlaps(&booking.interval, &window, OverlapOptions::INCLUSIVE))
            .cloned()
            .collect())
    }
}

/// Run `query` against `feed` and replace the session's bookings with the result.
///
/// On failure the previous bookings stay in place.
pub fn refresh_existing_bookings(
    session: &mut BookingSession,
    feed: &dyn BookingFeed,
    query: &FetchQuery,
) -> Result<usize> {
    let bookings = feed
        .fetch(query)
        .map_err(|err| {
            log::error!("Failed to fetch bookings for {:?}: {:#}", query, err);
            err
        })
        .with_context(|| {
            format!(
                "failed to fetch bookings between {} and {}",
                query.visible_range_start, query.visible_range_end
            )
        })?;

    let count = bookings.len();
    session.set_existing_bookings(bookings);
    log::info!(
        "Loaded {} bookings for {}..{}",
        count,
        query.visible_range_start,
        query.visible_range_end
    );
    Ok(count)
}
