// Service module exports

pub mod calendar_view;
pub mod draft;
pub mod feed;
pub mod interval;
pub mod scenario;
pub mod selection;
pub mod session;
pub mod settings;
pub mod visible_range;
