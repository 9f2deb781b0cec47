//! Habit service for CRUD operations on the habit list.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Row};

use crate::models::habit::Habit;
use crate::services::database::Database;

const HABIT_COLUMNS: &str = "id, name, category, created_at";

fn row_to_habit(row: &Row) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub struct HabitService<'a> {
    db: &'a Database,
}

impl<'a> HabitService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a new habit and return it with its id.
    pub fn create(&self, name: &str) -> Result<Habit> {
        let mut habit = Habit::new(name.trim());
        habit.created_at = Local::now().timestamp_millis();
        habit
            .validate()
            .map_err(|e| anyhow!("Invalid habit: {}", e))?;

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO habits (name, category, created_at) VALUES (?1, ?2, ?3)",
            params![habit.name, habit.category, habit.created_at],
        )
        .context("Failed to insert habit")?;

        habit.id = Some(conn.last_insert_rowid());
        log::info!("Created habit {:?}", habit.id);
        Ok(habit)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Habit> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS),
                [id],
                row_to_habit,
            )
            .with_context(|| format!("Habit {} not found", id))
    }

    /// All habits, oldest first.
    pub fn list_all(&self) -> Result<Vec<Habit>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY created_at ASC, id ASC",
            HABIT_COLUMNS
        ))?;

        let habits = stmt.query_map([], row_to_habit)?;
        habits
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch habits")
    }

    pub fn rename(&self, id: i64, name: &str) -> Result<()> {
        let mut habit = Habit::new(name);
        habit.id = Some(id);
        habit
            .validate()
            .map_err(|e| anyhow!("Invalid habit: {}", e))?;

        let rows = self
            .db
            .connection()
            .execute(
                "UPDATE habits SET name = ?1 WHERE id = ?2",
                params![habit.name, id],
            )
            .context("Failed to rename habit")?;

        if rows == 0 {
            return Err(anyhow!("Habit {} not found", id));
        }
        Ok(())
    }

    /// Remove a habit. Days that recorded it keep their stored flag.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM habits WHERE id = ?1", [id])
            .context("Failed to delete habit")?;

        if rows == 0 {
            return Err(anyhow!("Habit {} not found", id));
        }
        log::info!("Deleted habit {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::IN_MEMORY;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(IN_MEMORY).unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_test_db();
        let service = HabitService::new(&db);

        let created = service.create("  Stretch ").unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.name, "Stretch");
        assert!(created.created_at > 0);

        let loaded = service.get_by_id(created.id.unwrap()).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_create_blank_habit() {
        let db = setup_test_db();
        let service = HabitService::new(&db);
        let habit = service.create("").unwrap();
        assert_eq!(habit.name, "");
    }

    #[test]
    fn test_list_all_in_creation_order() {
        let db = setup_test_db();
        let service = HabitService::new(&db);
        service.create("Read").unwrap();
        service.create("Walk").unwrap();
        service.create("Journal").unwrap();

        let names: Vec<String> = service
            .list_all()
            .unwrap()
            .into_iter()
            .map(|habit| habit.name)
            .collect();
        assert_eq!(names, vec!["Read", "Walk", "Journal"]);
    }

    #[test]
    fn test_rename() {
        let db = setup_test_db();
        let service = HabitService::new(&db);
        let id = service.create("Raed").unwrap().id.unwrap();

        service.rename(id, "Read").unwrap();
        assert_eq!(service.get_by_id(id).unwrap().name, "Read");
        assert!(service.rename(id + 100, "Ghost").is_err());
    }

    #[test]
    fn test_rename_rejects_long_name() {
        let db = setup_test_db();
        let service = HabitService::new(&db);
        let id = service.create("Read").unwrap().id.unwrap();
        assert!(service.rename(id, &"x".repeat(200)).is_err());
        assert_eq!(service.get_by_id(id).unwrap().name, "Read");
    }

    #[test]
    fn test_delete() {
        let db = setup_test_db();
        let service = HabitService::new(&db);
        let keep = service.create("Read").unwrap();
        let gone = service.create("Walk").unwrap();

        service.delete(gone.id.unwrap()).unwrap();
        assert_eq!(service.list_all().unwrap(), vec![keep]);
        assert!(service.get_by_id(gone.id.unwrap()).is_err());
        assert!(service.delete(gone.id.unwrap()).is_err());
    }
}
