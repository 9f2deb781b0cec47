use anyhow::{Context, Result};
use rusqlite::Connection;

/// A column introduced after a table was first shipped.
pub struct AddedColumn {
    pub table: &'static str,
    pub column: &'static str,
    /// Type and constraints, e.g. `INTEGER NOT NULL DEFAULT 15`.
    pub definition: &'static str,
}

pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to inspect columns of {}", table))?;

    Ok(count > 0)
}

/// Adds each missing column in order. Columns already present are left alone.
pub fn ensure_columns(conn: &Connection, columns: &[AddedColumn]) -> Result<()> {
    for added in columns {
        if column_exists(conn, added.table, added.column)? {
            continue;
        }

        log::info!("Migrating {}: adding column {}", added.table, added.column);
        conn.execute(
            &format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                added.table, added.column, added.definition
            ),
            [],
        )
        .with_context(|| format!("Failed to add {}.{}", added.table, added.column))?;
    }

    Ok(())
}
