//! Wall-clock time-of-day values stored as `"HH:MM"`.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time '{0}' is not in HH:MM format")]
    Format(String),
    #[error("time '{0}' is out of range")]
    Range(String),
}

/// Parse a 24-hour `"HH:MM"` string.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = value.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| TimeParseError::Format(value.to_string()))?;

    if hours.is_empty() || minutes.len() != 2 {
        return Err(TimeParseError::Format(value.to_string()));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| TimeParseError::Format(value.to_string()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| TimeParseError::Format(value.to_string()))?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| TimeParseError::Range(value.to_string()))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Builds a time from minutes since midnight, saturating at 23:59.
pub fn time_from_minutes(minutes: u32) -> NaiveTime {
    let minutes = minutes.min(MINUTES_PER_DAY - 1);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Serde adapter for `NaiveTime` fields persisted as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(de::Error::custom)
    }
}
