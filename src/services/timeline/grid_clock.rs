//! Mapping between wall-clock times and vertical offsets on the timeline strip.
//!
//! The strip covers `[start_hour, end_hour)` with a fixed row height per hour.
//! Conversions never fail: inputs outside the visible range clamp to its
//! nearest edge, since pointer coordinates regularly leave the strip mid-drag.

use chrono::NaiveTime;
use thiserror::Error;

use crate::models::settings::Settings;
use crate::models::timeline_event::wall_time::{minutes_of, time_from_minutes};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridConfigError {
    #[error("visible range {start}:00-{end}:00 is empty or extends past 23:00")]
    Range { start: u32, end: u32 },
    #[error("hour height must be a positive number, got {0}")]
    HourHeight(f32),
    #[error("snap resolution of {0} minutes does not divide an hour")]
    Snap(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridClock {
    start_minutes: u32,
    end_minutes: u32,
    hour_height: f32,
    snap_minutes: u32,
}

impl GridClock {
    pub fn new(
        start_hour: u32,
        end_hour: u32,
        hour_height: f32,
        snap_minutes: u32,
    ) -> Result<Self, GridConfigError> {
        if start_hour >= end_hour || end_hour > 23 {
            return Err(GridConfigError::Range {
                start: start_hour,
                end: end_hour,
            });
        }
        if !(hour_height.is_finite() && hour_height > 0.0) {
            return Err(GridConfigError::HourHeight(hour_height));
        }
        if snap_minutes == 0 || 60 % snap_minutes != 0 {
            return Err(GridConfigError::Snap(snap_minutes));
        }

        Ok(Self {
            start_minutes: start_hour * 60,
            end_minutes: end_hour * 60,
            hour_height,
            snap_minutes,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GridConfigError> {
        Self::new(
            settings.day_start_hour,
            settings.day_end_hour,
            settings.hour_height,
            settings.snap_minutes,
        )
    }

    pub fn snap_minutes(&self) -> u32 {
        self.snap_minutes
    }

    pub fn hour_height(&self) -> f32 {
        self.hour_height
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    /// Latest time at which a new interval may start and still fit one snap
    /// increment before the end of the strip.
    pub fn latest_start_minutes(&self) -> u32 {
        self.end_minutes - self.snap_minutes
    }

    /// Hours that get a labelled row, e.g. `6..23`.
    pub fn visible_hours(&self) -> std::ops::Range<u32> {
        (self.start_minutes / 60)..(self.end_minutes / 60)
    }

    pub fn total_height(&self) -> f32 {
        (self.end_minutes - self.start_minutes) as f32 / 60.0 * self.hour_height
    }

    fn snap_height(&self) -> f32 {
        self.hour_height * self.snap_minutes as f32 / 60.0
    }

    pub fn minutes_to_offset(&self, minutes: u32) -> f32 {
        let clamped = minutes.clamp(self.start_minutes, self.end_minutes);
        (clamped - self.start_minutes) as f32 / 60.0 * self.hour_height
    }

    pub fn time_to_offset(&self, time: NaiveTime) -> f32 {
        self.minutes_to_offset(minutes_of(time))
    }

    /// Snapped minutes since midnight for a vertical offset: the hour comes
    /// from integer division by the row height, the remainder rounds down to
    /// the snap resolution.
    pub fn offset_to_minutes(&self, offset: f32) -> u32 {
        let offset = if offset.is_finite() {
            offset.clamp(0.0, self.total_height())
        } else {
            0.0
        };

        let hour_index = (offset / self.hour_height).floor() as u32;
        let within_hour = (offset - hour_index as f32 * self.hour_height).max(0.0);
        let snapped = (within_hour / self.snap_height()).floor() as u32 * self.snap_minutes;
        let snapped = snapped.min(60 - self.snap_minutes);

        (self.start_minutes + hour_index * 60 + snapped).min(self.end_minutes)
    }

    pub fn offset_to_time(&self, offset: f32) -> NaiveTime {
        time_from_minutes(self.offset_to_minutes(offset))
    }

    /// Height of the span between two times, zero if inverted.
    pub fn height_between(&self, start: NaiveTime, end: NaiveTime) -> f32 {
        (self.time_to_offset(end) - self.time_to_offset(start)).max(0.0)
    }
}

impl Default for GridClock {
    fn default() -> Self {
        Self {
            start_minutes: 6 * 60,
            end_minutes: 23 * 60,
            hour_height: 48.0,
            snap_minutes: 15,
        }
    }
}
