// Settings service module
// Loads and saves scheduling preferences as TOML

mod service;

pub use service::SettingsService;
