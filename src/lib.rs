// Booking scheduler library
// Time-slot selection core for the venue booking wizard

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{SchedulerError, SchedulerResult};
pub use models::interval::{DateTimeRange, TimeInterval, Timestamp};
pub use services::session::BookingSession;
