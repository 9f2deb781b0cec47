use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::{row_to_settings, SETTINGS_COLUMNS};

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                &format!("SELECT {} FROM settings WHERE id = 1", SETTINGS_COLUMNS),
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Load settings, falling back to defaults when the stored row is
    /// unreadable or fails validation.
    pub fn get_or_default(&self) -> Settings {
        match self.get() {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Stored settings are invalid ({}); using defaults", e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to load settings ({:#}); using defaults", e);
                Settings::default()
            }
        }
    }

    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET theme = ?1, \
                 day_start_hour = ?2, \
                 day_end_hour = ?3, \
                 hour_height = ?4, \
                 snap_minutes = ?5, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                &settings.theme,
                settings.day_start_hour,
                settings.day_end_hour,
                f64::from(settings.hour_height),
                settings.snap_minutes,
            ),
        )
        .context("Failed to update settings")?;

        log::info!("Settings saved");
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}
