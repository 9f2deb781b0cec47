// External event module
// Narrow record for events fetched from a third-party calendar

use chrono::{DateTime, FixedOffset, NaiveDate};

/// A start or end value as delivered by the external calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTime {
    /// A specific instant with its original UTC offset.
    At(DateTime<FixedOffset>),
    /// A date without a time of day (all-day events).
    AllDay(NaiveDate),
}

/// An event as reported by the external calendar. Converted into a
/// `TimelineEvent` by the merge step and never stored directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEvent {
    pub id: String,
    pub title: Option<String>,
    pub start: ExternalTime,
    pub end: ExternalTime,
}

impl ExternalEvent {
    pub fn new(
        id: impl Into<String>,
        title: Option<String>,
        start: ExternalTime,
        end: ExternalTime,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            start,
            end,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("External event id cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.start, ExternalTime::AllDay(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_id() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let event = ExternalEvent::new(" ", None, ExternalTime::AllDay(date), ExternalTime::AllDay(date));
        assert!(event.validate().is_err());
        assert!(event.is_all_day());
    }

    #[test]
    fn test_timed_event_is_not_all_day() {
        let start = DateTime::parse_from_rfc3339("2026-03-02T09:00:00+01:00").unwrap();
        let end = DateTime::parse_from_rfc3339("2026-03-02T10:00:00+01:00").unwrap();
        let event = ExternalEvent::new(
            "abc",
            Some("Standup".to_string()),
            ExternalTime::At(start),
            ExternalTime::At(end),
        );
        assert!(event.validate().is_ok());
        assert!(!event.is_all_day());
    }
}
