use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

pub const IN_MEMORY: &str = ":memory:";

/// The journal's SQLite connection.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Opens (or creates) the database at `path`; `":memory:"` gives a
    /// throwaway in-memory database.
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Open `path`, falling back to an in-memory database so the window still
    /// comes up when the file cannot be opened. Nothing written to the
    /// fallback survives a restart.
    pub fn open_or_in_memory(path: &str) -> Result<Self> {
        match Self::new(path).and_then(|db| db.initialize_schema().map(|_| db)) {
            Ok(db) => Ok(db),
            Err(err) => {
                log::warn!(
                    "Could not open database at {} ({:#}); using an in-memory database",
                    path,
                    err
                );
                let db = Self::new(IN_MEMORY)?;
                db.initialize_schema()?;
                Ok(db)
            }
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Creates tables, runs migrations, and seeds default settings.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}
