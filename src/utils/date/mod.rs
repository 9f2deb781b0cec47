// Date utility functions

use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeZone};

/// Storage key for a calendar day (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Start of `date` in `tz`. Falls back to the earliest valid instant when
/// midnight does not exist (DST gap).
pub fn start_of_day_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz.from_utc_datetime(&midnight),
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    start_of_day_in(date, &Local)
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Human-readable heading for the day view, e.g. `Thursday, 15 October 2026`.
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
