// Timeline event module
// A single time-boxed entry on one day's schedule strip

pub mod wall_time;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use self::wall_time::{format_hhmm, hhmm, minutes_of};

/// Id prefix for events merged in from an external calendar.
pub const EXTERNAL_ID_PREFIX: &str = "google-";
/// Id prefix for events created on the strip.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    #[default]
    Local,
    External,
}

/// Muted palette used for event boxes. The value carries no meaning beyond
/// giving each event a stable visual identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    MutedBlue,
    MutedGreen,
    MutedPurple,
    MutedRose,
    MutedSlate,
    MutedOlive,
    MutedSand,
    MutedDust,
}

impl ColorToken {
    pub const ALL: [ColorToken; 8] = [
        ColorToken::MutedBlue,
        ColorToken::MutedGreen,
        ColorToken::MutedPurple,
        ColorToken::MutedRose,
        ColorToken::MutedSlate,
        ColorToken::MutedOlive,
        ColorToken::MutedSand,
        ColorToken::MutedDust,
    ];

    /// Palette entry at `index`, wrapping around the palette.
    pub fn cycled(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Hex colour for rendering
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::MutedBlue => "#748BA7",
            ColorToken::MutedGreen => "#8BA88B",
            ColorToken::MutedPurple => "#9B8BB1",
            ColorToken::MutedRose => "#B18B8B",
            ColorToken::MutedSlate => "#96A4B1",
            ColorToken::MutedOlive => "#A4B196",
            ColorToken::MutedSand => "#B1A496",
            ColorToken::MutedDust => "#A496B1",
        }
    }
}

/// One user-visible time-boxed entry on a day's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    #[serde(default)]
    pub source: SourceTag,
}

impl TimelineEvent {
    /// Create a locally sourced event.
    ///
    /// Fails when the id is blank or the interval is empty or inverted.
    pub fn new(
        id: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, String> {
        let event = Self {
            id: id.into(),
            start_time,
            end_time,
            text: String::new(),
            color: None,
            source: SourceTag::Local,
        };
        event.validate()?;
        Ok(event)
    }

    /// Build an externally sourced event. The id is derived from the external
    /// calendar's own identifier so repeated fetches map onto the same event.
    pub fn external(
        external_id: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        text: impl Into<String>,
        color: ColorToken,
    ) -> Self {
        Self {
            id: Self::external_id_for(external_id),
            start_time,
            end_time,
            text: text.into(),
            color: Some(color),
            source: SourceTag::External,
        }
    }

    pub fn external_id_for(external_id: &str) -> String {
        format!("{}{}", EXTERNAL_ID_PREFIX, external_id)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_color(mut self, color: ColorToken) -> Self {
        self.color = Some(color);
        self
    }

    /// Validate a locally created event. External events are rendered as
    /// delivered and are not held to these rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Timeline event id cannot be empty".to_string());
        }

        if self.is_external() {
            return Ok(());
        }

        if self.end_time <= self.start_time {
            return Err("Timeline event end time must be after start time".to_string());
        }

        Ok(())
    }

    pub fn is_external(&self) -> bool {
        self.source == SourceTag::External
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_of(self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_of(self.end_time)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes().saturating_sub(self.start_minutes())
    }

    /// `[start, end)` intersection test.
    pub fn overlaps(&self, other: &TimelineEvent) -> bool {
        self.start_minutes() < other.end_minutes() && other.start_minutes() < self.end_minutes()
    }

    /// Label shown on the event box, e.g. `09:00 - 10:30`.
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", format_hhmm(self.start_time), format_hhmm(self.end_time))
    }

    /// Text shown in the box; empty text renders as an edit hint.
    pub fn display_text(&self) -> &str {
        if self.text.trim().is_empty() {
            "(Click to edit)"
        } else {
            &self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_new_event_success() {
        let event = TimelineEvent::new("local-1", t(9, 0), t(10, 30)).unwrap();
        assert_eq!(event.id, "local-1");
        assert_eq!(event.source, SourceTag::Local);
        assert!(event.text.is_empty());
        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn test_new_event_rejects_inverted_times() {
        let result = TimelineEvent::new("local-1", t(10, 0), t(9, 0));
        assert_eq!(
            result.unwrap_err(),
            "Timeline event end time must be after start time"
        );
    }

    #[test]
    fn test_new_event_rejects_zero_length() {
        assert!(TimelineEvent::new("local-1", t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_new_event_rejects_blank_id() {
        assert!(TimelineEvent::new("  ", t(9, 0), t(9, 15)).is_err());
    }

    #[test]
    fn test_external_event_skips_interval_validation() {
        let event = TimelineEvent::external("abc", t(9, 0), t(9, 0), "Reminder", ColorToken::MutedBlue);
        assert_eq!(event.id, "google-abc");
        assert!(event.is_external());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_overlaps_is_half_open() {
        let a = TimelineEvent::new("a", t(9, 0), t(10, 0)).unwrap();
        let b = TimelineEvent::new("b", t(10, 0), t(11, 0)).unwrap();
        let c = TimelineEvent::new("c", t(9, 30), t(10, 15)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_display_text_placeholder() {
        let event = TimelineEvent::new("a", t(9, 0), t(10, 0)).unwrap();
        assert_eq!(event.display_text(), "(Click to edit)");
        assert_eq!(event.with_text("Write").display_text(), "Write");
    }

    #[test]
    fn test_serialized_shape() {
        let event = TimelineEvent::new("local-7", t(9, 0), t(10, 30))
            .unwrap()
            .with_text("Deep work")
            .with_color(ColorToken::MutedSand);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], "local-7");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:30");
        assert_eq!(json["text"], "Deep work");
        assert_eq!(json["color"], "muted-sand");
        assert_eq!(json["source"], "local");
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"id":"x1","startTime":"08:15","endTime":"09:00"}"#;
        let event: TimelineEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_time, t(8, 15));
        assert_eq!(event.color, None);
        assert_eq!(event.source, SourceTag::Local);
        assert_eq!(event.text, "");
    }

    #[test]
    fn test_deserialize_rejects_bad_time() {
        let json = r#"{"id":"x1","startTime":"8am","endTime":"09:00"}"#;
        assert!(serde_json::from_str::<TimelineEvent>(json).is_err());
    }

    #[test]
    fn test_color_cycled_wraps() {
        assert_eq!(ColorToken::cycled(0), ColorToken::MutedBlue);
        assert_eq!(ColorToken::cycled(8), ColorToken::MutedBlue);
        assert_eq!(ColorToken::cycled(9), ColorToken::MutedGreen);
    }
}
