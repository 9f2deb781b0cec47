use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};

use crate::models::external_event::ExternalEvent;
use crate::utils::date::{next_day, start_of_day_in};

/// `[start, end)` of one calendar day, with the offsets in effect at each end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub date: NaiveDate,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DayRange {
    pub fn for_day_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start = start_of_day_in(date, tz).fixed_offset();
        let end = start_of_day_in(next_day(date), tz).fixed_offset();
        Self { date, start, end }
    }

    pub fn for_day(date: NaiveDate) -> Self {
        Self::for_day_in(date, &Local)
    }
}

/// Read-only access to a third-party calendar.
#[cfg_attr(test, mockall::automock)]
pub trait ExternalCalendarClient: Send + Sync {
    fn list_events(&self, range: &DayRange) -> Result<Vec<ExternalEvent>>;
}
