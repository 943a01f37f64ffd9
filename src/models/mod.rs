// Module exports for models

pub mod booking;
pub mod interval;
pub mod settings;
pub mod ui;
