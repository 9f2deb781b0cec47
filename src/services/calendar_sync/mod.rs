// Calendar sync module
// Fetching events from an external calendar and merging them into a day

pub mod client;
pub mod google;
pub mod merge;
pub mod worker;

pub use client::{DayRange, ExternalCalendarClient};
pub use google::{AuthError, GoogleCalendarClient};
pub use merge::{imported_count, map_external_in, merge_external, merge_external_in};
pub use worker::{SyncOutcome, SyncWorker};
