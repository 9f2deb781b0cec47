// Module exports for models

pub mod daily_entry;
pub mod external_event;
pub mod habit;
pub mod settings;
pub mod timeline_event;
