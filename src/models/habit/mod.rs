//! Habit model.
//!
//! Habits are defined once and ticked off per day. A day's ticks live in
//! `DailyEntry::habit_completion`, keyed by [`Habit::completion_key`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_HABIT_NAME_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Database primary key, `None` until stored
    pub id: Option<i64>,
    pub name: String,
    pub category: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitValidationError {
    #[error("Habit name must be at most 80 characters")]
    NameTooLong,
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: None,
            created_at: 0,
        }
    }

    /// A freshly added habit has no name yet; the user types it in place.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.chars().count() > MAX_HABIT_NAME_LEN {
            return Err(HabitValidationError::NameTooLong);
        }
        Ok(())
    }

    /// Key under which a day records this habit as done.
    pub fn completion_key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}
