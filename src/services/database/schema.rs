use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::{self, AddedColumn};

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_daily_entries_table(conn)?;
    create_habits_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            theme TEXT NOT NULL DEFAULT 'system',
            day_start_hour INTEGER NOT NULL DEFAULT 6,
            day_end_hour INTEGER NOT NULL DEFAULT 23,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

/// Grid sizing columns arrived after the first release.
const SETTINGS_COLUMNS: &[AddedColumn] = &[
    AddedColumn {
        table: "settings",
        column: "hour_height",
        definition: "REAL NOT NULL DEFAULT 48.0",
    },
    AddedColumn {
        table: "settings",
        column: "snap_minutes",
        definition: "INTEGER NOT NULL DEFAULT 15",
    },
];

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_columns(conn, SETTINGS_COLUMNS)
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (
            id, theme, day_start_hour, day_end_hour, hour_height, snap_minutes
        )
        VALUES (1, 'system', 6, 23, 48.0, 15)",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_daily_entries_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS daily_entries (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            data TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("Failed to create daily_entries table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_daily_entries_date ON daily_entries(date)",
        [],
    )
    .context("Failed to create daily_entries date index")?;

    Ok(())
}

fn create_habits_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL DEFAULT '',
            category TEXT,
            created_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("Failed to create habits table")?;

    Ok(())
}
