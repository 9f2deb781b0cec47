// Settings service module
// Reads and writes the single row of grid and theme preferences

mod mapper;
mod service;

pub use service::SettingsService;
