// Entry store module
// Per-day journal entries stored as JSON documents keyed by date

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::daily_entry::DailyEntry;
use crate::models::timeline_event::TimelineEvent;
use crate::services::database::Database;
use crate::utils::date::date_key;

/// Get/put access to daily entries by `YYYY-MM-DD` key.
pub trait EntryStore {
    fn get(&self, date_key: &str) -> Result<Option<DailyEntry>>;
    fn put(&self, entry: &DailyEntry) -> Result<()>;
}

pub struct SqliteEntryStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteEntryStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl EntryStore for SqliteEntryStore<'_> {
    fn get(&self, date_key: &str) -> Result<Option<DailyEntry>> {
        let result = self.db.connection().query_row(
            "SELECT data FROM daily_entries WHERE id = ?1",
            [date_key],
            |row| row.get::<_, String>(0),
        );

        let data = match result {
            Ok(data) => data,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(err) => return Err(err).context("Failed to load daily entry"),
        };

        let entry: DailyEntry = serde_json::from_str(&data)
            .with_context(|| format!("Stored entry {} is not valid JSON", date_key))?;
        Ok(Some(entry))
    }

    fn put(&self, entry: &DailyEntry) -> Result<()> {
        entry
            .validate()
            .map_err(|e| anyhow!("Invalid entry {}: {}", entry.id, e))?;

        let data = serde_json::to_string(entry).context("Failed to serialize daily entry")?;

        self.db
            .connection()
            .execute(
                "INSERT INTO daily_entries (id, date, data, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    date = excluded.date,
                    data = excluded.data,
                    updated_at = excluded.updated_at",
                params![entry.id, date_key(entry.date), data, entry.updated_at],
            )
            .context("Failed to save daily entry")?;

        log::debug!(
            "Saved entry {} ({} timeline events)",
            entry.id,
            entry.timeline.len()
        );
        Ok(())
    }
}

/// The entry stored for `date`, or a fresh one when none exists yet.
pub fn load_entry(store: &dyn EntryStore, date: NaiveDate) -> Result<DailyEntry> {
    Ok(store
        .get(&date_key(date))?
        .unwrap_or_else(|| DailyEntry::new(date)))
}

/// The timeline stored for `date`, empty when no entry exists yet.
pub fn load_timeline(store: &dyn EntryStore, date: NaiveDate) -> Result<Vec<TimelineEvent>> {
    Ok(store
        .get(&date_key(date))?
        .map(|entry| entry.timeline)
        .unwrap_or_default())
}

/// Replace the timeline of `date`'s entry, creating the entry if needed.
/// Every other field of an existing entry is preserved.
pub fn replace_timeline(
    store: &dyn EntryStore,
    date: NaiveDate,
    events: Vec<TimelineEvent>,
) -> Result<DailyEntry> {
    let mut entry = load_entry(store, date)?;
    entry.timeline = events;
    entry.touch();
    store.put(&entry)?;
    Ok(entry)
}

/// Store the journal fields of `journal` into its day's entry. The stored
/// timeline is left as it is.
pub fn save_journal(store: &dyn EntryStore, journal: &DailyEntry) -> Result<DailyEntry> {
    let mut entry = load_entry(store, journal.date)?;
    entry.copy_journal_from(journal);
    entry.touch();
    store.put(&entry)?;
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeline_event::wall_time::parse_hhmm;
    use crate::services::database::IN_MEMORY;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(IN_MEMORY).unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn event(id: &str, start: &str, end: &str) -> TimelineEvent {
        TimelineEvent::new(id, parse_hhmm(start).unwrap(), parse_hhmm(end).unwrap()).unwrap()
    }

    #[test]
    fn test_get_missing_entry() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);
        assert!(store.get("2026-10-15").unwrap().is_none());
        assert!(load_timeline(&store, date()).unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);

        let mut entry = DailyEntry::new(date());
        entry.intention = "Finish the draft".to_string();
        entry.timeline.push(event("local-1", "09:00", "10:00"));
        store.put(&entry).unwrap();

        assert_eq!(store.get("2026-10-15").unwrap(), Some(entry));
    }

    #[test]
    fn test_put_overwrites() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);

        let mut entry = DailyEntry::new(date());
        store.put(&entry).unwrap();
        entry.mood = 3;
        store.put(&entry).unwrap();

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM daily_entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.get("2026-10-15").unwrap().unwrap().mood, 3);
    }

    #[test]
    fn test_put_rejects_invalid_entry() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);

        let mut entry = DailyEntry::new(date());
        entry.mood = 9;
        assert!(store.put(&entry).is_err());
    }

    #[test]
    fn test_replace_timeline_keeps_other_fields() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);

        let mut entry = DailyEntry::new(date());
        entry.highlight = "Long walk".to_string();
        entry.timeline.push(event("local-1", "09:00", "10:00"));
        store.put(&entry).unwrap();

        let events = vec![event("local-2", "11:00", "11:30")];
        let saved = replace_timeline(&store, date(), events.clone()).unwrap();
        assert!(saved.updated_at > 0);

        let loaded = store.get("2026-10-15").unwrap().unwrap();
        assert_eq!(loaded.highlight, "Long walk");
        assert_eq!(loaded.timeline, events);
    }

    #[test]
    fn test_replace_timeline_creates_entry() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);

        let events = vec![event("local-1", "06:00", "06:15")];
        replace_timeline(&store, date(), events.clone()).unwrap();
        assert_eq!(load_timeline(&store, date()).unwrap(), events);
    }

    #[test]
    fn test_load_entry_defaults_to_new() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);
        assert_eq!(load_entry(&store, date()).unwrap(), DailyEntry::new(date()));
    }

    #[test]
    fn test_save_journal_keeps_timeline() {
        let db = setup_test_db();
        let store = SqliteEntryStore::new(&db);
        let events = vec![event("local-1", "09:00", "10:00")];
        replace_timeline(&store, date(), events.clone()).unwrap();

        // A draft loaded before the timeline changed must not roll it back.
        let mut journal = DailyEntry::new(date());
        journal.learning = "Ask earlier".to_string();
        journal.secondary_tasks[0].text = "Book flights".to_string();
        journal.toggle_task("secondary-1");
        journal.set_rate_day(4);
        save_journal(&store, &journal).unwrap();

        let loaded = store.get("2026-10-15").unwrap().unwrap();
        assert_eq!(loaded.timeline, events);
        assert_eq!(loaded.learning, "Ask earlier");
        assert_eq!(loaded.secondary_tasks[0].text, "Book flights");
        assert!(loaded.secondary_tasks[0].completed);
        assert_eq!(loaded.rate_day, 4);
    }

    #[test]
    fn test_corrupt_row_is_an_error() {
        let db = setup_test_db();
        db.connection()
            .execute(
                "INSERT INTO daily_entries (id, date, data) VALUES ('2026-10-15', '2026-10-15', 'nope')",
                [],
            )
            .unwrap();
        let store = SqliteEntryStore::new(&db);
        assert!(store.get("2026-10-15").is_err());
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("journal.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new(path).unwrap();
            db.initialize_schema().unwrap();
            let store = SqliteEntryStore::new(&db);
            replace_timeline(&store, date(), vec![event("local-1", "09:00", "09:30")]).unwrap();
        }

        let db = Database::new(path).unwrap();
        db.initialize_schema().unwrap();
        let store = SqliteEntryStore::new(&db);
        assert_eq!(load_timeline(&store, date()).unwrap().len(), 1);
    }
}
