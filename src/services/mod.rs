// Service module exports
// Persistence, calendar sync and timeline logic

pub mod calendar_sync;
pub mod database;
pub mod entry_store;
pub mod habit;
pub mod settings;
pub mod timeline;
