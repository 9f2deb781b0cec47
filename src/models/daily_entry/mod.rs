// Daily entry module
// One journal record per calendar day; owns that day's timeline

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::timeline_event::TimelineEvent;
use crate::utils::date::date_key;

/// Number of secondary and of additional task slots a day starts with.
pub const TASK_SLOTS: usize = 2;

/// One planned task on a day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl DailyTask {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            completed: false,
        }
    }

    fn most_important() -> Self {
        Self::new("mit")
    }

    fn slots(prefix: &str) -> Vec<Self> {
        (1..=TASK_SLOTS)
            .map(|n| Self::new(format!("{}-{}", prefix, n)))
            .collect()
    }

    fn secondary_slots() -> Vec<Self> {
        Self::slots("secondary")
    }

    fn additional_slots() -> Vec<Self> {
        Self::slots("additional")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// `YYYY-MM-DD`
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub gratitude: Vec<String>,
    #[serde(default)]
    pub intention: String,
    #[serde(default)]
    pub highlight: String,
    #[serde(default)]
    pub learning: String,
    #[serde(default)]
    pub remember: String,
    /// 1-5, 0 when unset
    #[serde(default)]
    pub mood: u8,
    /// 1-5, 0 when unset
    #[serde(default)]
    pub rate_day: u8,
    #[serde(default = "DailyTask::most_important")]
    pub most_important_task: DailyTask,
    #[serde(default = "DailyTask::secondary_slots")]
    pub secondary_tasks: Vec<DailyTask>,
    #[serde(default = "DailyTask::additional_slots")]
    pub additional_tasks: Vec<DailyTask>,
    /// Habit completion key to done flag
    #[serde(default)]
    pub habit_completion: BTreeMap<String, bool>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub updated_at: i64,
}

impl DailyEntry {
    /// Empty entry for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: date_key(date),
            date,
            gratitude: vec![String::new(); 3],
            intention: String::new(),
            highlight: String::new(),
            learning: String::new(),
            remember: String::new(),
            mood: 0,
            rate_day: 0,
            most_important_task: DailyTask::most_important(),
            secondary_tasks: DailyTask::secondary_slots(),
            additional_tasks: DailyTask::additional_slots(),
            habit_completion: BTreeMap::new(),
            timeline: Vec::new(),
            updated_at: 0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id != date_key(self.date) {
            return Err(format!(
                "Entry id '{}' does not match its date {}",
                self.id,
                date_key(self.date)
            ));
        }

        if self.mood > 5 || self.rate_day > 5 {
            return Err("Mood and day rating must be between 0 and 5".to_string());
        }

        if self.tasks().any(|task| task.id.trim().is_empty()) {
            return Err("Task id cannot be empty".to_string());
        }

        for event in &self.timeline {
            event.validate()?;
        }

        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Local::now().timestamp_millis();
    }

    /// Copy every journal field from `other`. Identity, timeline and
    /// timestamp stay as they are.
    pub fn copy_journal_from(&mut self, other: &DailyEntry) {
        self.gratitude = other.gratitude.clone();
        self.intention = other.intention.clone();
        self.highlight = other.highlight.clone();
        self.learning = other.learning.clone();
        self.remember = other.remember.clone();
        self.mood = other.mood;
        self.rate_day = other.rate_day;
        self.most_important_task = other.most_important_task.clone();
        self.secondary_tasks = other.secondary_tasks.clone();
        self.additional_tasks = other.additional_tasks.clone();
        self.habit_completion = other.habit_completion.clone();
    }

    pub fn add_gratitude(&mut self) {
        self.gratitude.push(String::new());
    }

    /// Remove one gratitude line. The last remaining line is kept.
    pub fn remove_gratitude(&mut self, index: usize) -> bool {
        if self.gratitude.len() <= 1 || index >= self.gratitude.len() {
            return false;
        }
        self.gratitude.remove(index);
        true
    }

    pub fn set_mood(&mut self, mood: u8) {
        self.mood = mood.min(5);
    }

    pub fn set_rate_day(&mut self, rating: u8) {
        self.rate_day = rating.min(5);
    }

    /// All task slots, most important first.
    pub fn tasks(&self) -> impl Iterator<Item = &DailyTask> {
        std::iter::once(&self.most_important_task)
            .chain(self.secondary_tasks.iter())
            .chain(self.additional_tasks.iter())
    }

    /// Flip a task's completed flag. Returns the new state, or `None` when no
    /// task has that id.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        let task = std::iter::once(&mut self.most_important_task)
            .chain(self.secondary_tasks.iter_mut())
            .chain(self.additional_tasks.iter_mut())
            .find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn is_habit_done(&self, key: &str) -> bool {
        self.habit_completion.get(key).copied().unwrap_or(false)
    }

    /// Flip a habit's done flag for this day and return the new state.
    pub fn toggle_habit(&mut self, key: &str) -> bool {
        let done = !self.is_habit_done(key);
        self.habit_completion.insert(key.to_string(), done);
        done
    }
}
