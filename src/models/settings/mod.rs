// Settings module
// Persisted user preferences for the timeline grid and theme

pub const THEME_SYSTEM: &str = "system";
pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub id: Option<i64>,
    /// `system`, `light` or `dark`
    pub theme: String,
    /// First visible hour on the timeline strip
    pub day_start_hour: u32,
    /// Hour at which the strip ends (exclusive)
    pub day_end_hour: u32,
    /// Row height of one hour, in points
    pub hour_height: f32,
    /// Snap resolution for drag-created events, in minutes
    pub snap_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            theme: THEME_SYSTEM.to_string(),
            day_start_hour: 6,
            day_end_hour: 23,
            hour_height: 48.0,
            snap_minutes: 15,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if ![THEME_SYSTEM, THEME_LIGHT, THEME_DARK].contains(&self.theme.as_str()) {
            return Err(format!("Unknown theme '{}'", self.theme));
        }

        if self.day_end_hour > 23 {
            return Err("Timeline must end at or before 23:00".to_string());
        }

        if self.day_start_hour >= self.day_end_hour {
            return Err("Timeline start hour must be before its end hour".to_string());
        }

        if !(self.hour_height.is_finite() && self.hour_height >= 12.0) {
            return Err("Hour height must be at least 12".to_string());
        }

        if self.snap_minutes == 0 || 60 % self.snap_minutes != 0 {
            return Err("Snap resolution must evenly divide an hour".to_string());
        }

        Ok(())
    }
}
