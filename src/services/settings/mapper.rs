use crate::models::settings::Settings;
use rusqlite::Row;

pub const SETTINGS_COLUMNS: &str =
    "id, theme, day_start_hour, day_end_hour, hour_height, snap_minutes";

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    Ok(Settings {
        id: Some(row.get(0)?),
        theme: row.get(1)?,
        day_start_hour: row.get(2)?,
        day_end_hour: row.get(3)?,
        hour_height: row.get::<_, f64>(4)? as f32,
        snap_minutes: row.get(5)?,
    })
}
