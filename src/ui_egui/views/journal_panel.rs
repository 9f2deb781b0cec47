//! Journal section for the visible day.
//!
//! Edits the entry in place and reports what changed so the caller can
//! persist it. Habit list changes are returned as actions because they go to
//! a different table.

use egui::{Color32, RichText, TextEdit};

use crate::models::daily_entry::{DailyEntry, DailyTask};
use crate::models::habit::Habit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitAction {
    Add,
    Rename(i64),
    RequestDelete(i64),
    ConfirmDelete(i64),
    CancelDelete,
}

#[derive(Debug, Default)]
pub struct JournalPanelOutput {
    /// Some journal field of the entry changed this frame.
    pub entry_changed: bool,
    pub habit_actions: Vec<HabitAction>,
}

#[derive(Default)]
struct TaskRow {
    text_changed: bool,
    toggled: bool,
}

const SECTION_GAP: f32 = 10.0;

pub fn render_journal_panel(
    ui: &mut egui::Ui,
    entry: &mut DailyEntry,
    habits: &mut [Habit],
    pending_delete: Option<i64>,
) -> JournalPanelOutput {
    let mut output = JournalPanelOutput::default();

    section_label(ui, "Today's intention");
    output.entry_changed |= single_line(ui, &mut entry.intention, "What do I want from today?");

    ui.add_space(SECTION_GAP);
    section_label(ui, "Grateful for");
    output.entry_changed |= render_gratitude(ui, entry);

    ui.add_space(SECTION_GAP);
    section_label(ui, "Most important task");
    output.entry_changed |= render_task(ui, entry, TaskSlot::MostImportant, "The one thing");

    section_label(ui, "Secondary tasks");
    for index in 0..entry.secondary_tasks.len() {
        output.entry_changed |= render_task(ui, entry, TaskSlot::Secondary(index), "Secondary task");
    }

    section_label(ui, "Additional tasks");
    for index in 0..entry.additional_tasks.len() {
        output.entry_changed |= render_task(ui, entry, TaskSlot::Additional(index), "If there is time");
    }

    ui.add_space(SECTION_GAP);
    section_label(ui, "Habits");
    render_habits(ui, entry, habits, pending_delete, &mut output);

    ui.add_space(SECTION_GAP);
    ui.horizontal(|ui| {
        ui.label("Mood");
        if let Some(level) = render_scale(ui, entry.mood, "●", "○", "mood") {
            entry.set_mood(level);
            output.entry_changed = true;
        }
        ui.add_space(16.0);
        ui.label("Day");
        if let Some(level) = render_scale(ui, entry.rate_day, "★", "☆", "rate_day") {
            entry.set_rate_day(level);
            output.entry_changed = true;
        }
    });

    ui.add_space(SECTION_GAP);
    section_label(ui, "Highlight");
    output.entry_changed |= multi_line(ui, &mut entry.highlight, "Best moment of the day");
    section_label(ui, "Learning");
    output.entry_changed |= multi_line(ui, &mut entry.learning, "What did I learn?");
    section_label(ui, "Remember");
    output.entry_changed |= multi_line(ui, &mut entry.remember, "Worth remembering");

    output
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).strong());
}

fn single_line(ui: &mut egui::Ui, text: &mut String, hint: &str) -> bool {
    ui.add(
        TextEdit::singleline(text)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
    .changed()
}

fn multi_line(ui: &mut egui::Ui, text: &mut String, hint: &str) -> bool {
    ui.add(
        TextEdit::multiline(text)
            .hint_text(hint)
            .desired_rows(2)
            .desired_width(f32::INFINITY),
    )
    .changed()
}

fn render_gratitude(ui: &mut egui::Ui, entry: &mut DailyEntry) -> bool {
    let mut changed = false;
    let mut remove = None;
    let removable = entry.gratitude.len() > 1;

    for (index, line) in entry.gratitude.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("{}.", index + 1));
            let width = ui.available_width() - if removable { 28.0 } else { 0.0 };
            changed |= ui
                .add(TextEdit::singleline(line).desired_width(width.max(40.0)))
                .changed();
            if removable && ui.small_button("✖").on_hover_text("Remove").clicked() {
                remove = Some(index);
            }
        });
    }

    if let Some(index) = remove {
        changed |= entry.remove_gratitude(index);
    }
    if ui.small_button("+ Add").clicked() {
        entry.add_gratitude();
        changed = true;
    }
    changed
}

#[derive(Clone, Copy)]
enum TaskSlot {
    MostImportant,
    Secondary(usize),
    Additional(usize),
}

fn task_mut(entry: &mut DailyEntry, slot: TaskSlot) -> Option<&mut DailyTask> {
    match slot {
        TaskSlot::MostImportant => Some(&mut entry.most_important_task),
        TaskSlot::Secondary(index) => entry.secondary_tasks.get_mut(index),
        TaskSlot::Additional(index) => entry.additional_tasks.get_mut(index),
    }
}

fn render_task(ui: &mut egui::Ui, entry: &mut DailyEntry, slot: TaskSlot, hint: &str) -> bool {
    let Some(task) = task_mut(entry, slot) else {
        return false;
    };

    let mut row = TaskRow::default();
    ui.horizontal(|ui| {
        let mut done = task.completed;
        row.toggled = ui.checkbox(&mut done, "").changed();
        row.text_changed = ui
            .add(
                TextEdit::singleline(&mut task.text)
                    .hint_text(hint)
                    .desired_width(f32::INFINITY),
            )
            .changed();
    });

    if row.toggled {
        let id = task.id.clone();
        entry.toggle_task(&id);
    }
    row.toggled || row.text_changed
}

fn render_habits(
    ui: &mut egui::Ui,
    entry: &mut DailyEntry,
    habits: &mut [Habit],
    pending_delete: Option<i64>,
    output: &mut JournalPanelOutput,
) {
    if habits.is_empty() {
        ui.label(RichText::new("No habits yet").color(Color32::GRAY));
    }

    for habit in habits.iter_mut() {
        let (Some(id), Some(key)) = (habit.id, habit.completion_key()) else {
            continue;
        };

        ui.horizontal(|ui| {
            let mut done = entry.is_habit_done(&key);
            if ui.checkbox(&mut done, "").changed() {
                entry.toggle_habit(&key);
                output.entry_changed = true;
            }

            if pending_delete == Some(id) {
                ui.label(RichText::new("Delete this habit?").color(Color32::from_rgb(200, 80, 80)));
                if ui.small_button("Delete").clicked() {
                    output.habit_actions.push(HabitAction::ConfirmDelete(id));
                }
                if ui.small_button("Keep").clicked() {
                    output.habit_actions.push(HabitAction::CancelDelete);
                }
                return;
            }

            let width = (ui.available_width() - 28.0).max(40.0);
            let name = ui.add(
                TextEdit::singleline(&mut habit.name)
                    .hint_text("Habit name")
                    .desired_width(width),
            );
            if name.changed() {
                output.habit_actions.push(HabitAction::Rename(id));
            }
            if ui.small_button("🗑").on_hover_text("Delete habit").clicked() {
                output.habit_actions.push(HabitAction::RequestDelete(id));
            }
        });
    }

    if ui.small_button("+ Add habit").clicked() {
        output.habit_actions.push(HabitAction::Add);
    }
}

/// One-to-five selector. Returns the level the user picked, if it differs
/// from `value`.
fn render_scale(ui: &mut egui::Ui, value: u8, filled: &str, empty: &str, id: &str) -> Option<u8> {
    let mut picked = None;
    ui.push_id(id, |ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for level in 1..=5u8 {
            let symbol = if level <= value { filled } else { empty };
            if ui
                .add(egui::Button::new(symbol).frame(false))
                .on_hover_text(level.to_string())
                .clicked()
            {
                picked = Some(level);
            }
        }
    });
    picked.filter(|level| *level != value)
}
