// Test fixtures - reusable test data
// Provides consistent days, time zones and events across integration tests

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use day_journal::models::external_event::{ExternalEvent, ExternalTime};
use day_journal::models::timeline_event::TimelineEvent;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 2nd 2026
    pub fn march_2_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    /// Feb 29, 2028 (leap year)
    pub fn leap_day_2028() -> NaiveDate {
        NaiveDate::from_ymd_opt(2028, 2, 29).unwrap()
    }

    pub fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }
}

/// UTC+10, used wherever a test needs a concrete local zone
pub fn brisbane() -> FixedOffset {
    FixedOffset::east_opt(10 * 3600).unwrap()
}

/// Sample timeline events
pub mod events {
    use super::dates::time;
    use super::*;

    pub fn local(id: &str, start: (u32, u32), end: (u32, u32)) -> TimelineEvent {
        TimelineEvent::new(id, time(start.0, start.1), time(end.0, end.1)).unwrap()
    }

    pub fn morning_run() -> TimelineEvent {
        local("local-run", (6, 30), (7, 15)).with_text("Morning run")
    }

    pub fn deep_work() -> TimelineEvent {
        local("local-deep", (9, 0), (11, 0)).with_text("Deep work")
    }
}

/// Records as an external calendar would deliver them
pub mod external {
    use super::*;

    /// Timed event on `date` in the Brisbane zone.
    pub fn timed(
        id: &str,
        title: Option<&str>,
        date: NaiveDate,
        start: (u32, u32),
        end: (u32, u32),
    ) -> ExternalEvent {
        let tz = brisbane();
        let at = |(h, m): (u32, u32)| {
            ExternalTime::At(
                tz.from_local_datetime(&date.and_hms_opt(h, m, 0).unwrap())
                    .unwrap(),
            )
        };
        ExternalEvent::new(id, title.map(str::to_string), at(start), at(end))
    }

    pub fn all_day(id: &str, title: &str, date: NaiveDate) -> ExternalEvent {
        ExternalEvent::new(
            id,
            Some(title.to_string()),
            ExternalTime::AllDay(date),
            ExternalTime::AllDay(date.succ_opt().unwrap()),
        )
    }
}
