use anyhow::Result;

use super::JournalApp;
use crate::models::habit::Habit;
use crate::services::entry_store::save_journal;
use crate::services::habit::HabitService;
use crate::ui_egui::views::journal_panel::{render_journal_panel, HabitAction};

impl JournalApp {
    pub(super) fn render_journal(&mut self, ui: &mut egui::Ui) {
        let output = egui::CollapsingHeader::new("Journal")
            .id_source("journal_panel")
            .default_open(true)
            .show(ui, |ui| {
                render_journal_panel(
                    ui,
                    &mut self.journal,
                    &mut self.habits,
                    self.pending_habit_delete,
                )
            })
            .body_returned;

        let Some(output) = output else {
            return;
        };

        if output.entry_changed {
            self.save_journal();
        }

        let service = self.context.habit_service();
        for action in output.habit_actions {
            if let Err(e) =
                apply_habit_action(&service, &mut self.habits, &mut self.pending_habit_delete, &action)
            {
                log::error!("Habit update {:?} failed: {:#}", action, e);
                self.toast_manager
                    .error(format!("Could not update habits: {}", e));
            }
        }
    }

    /// Persist the journal fields of the visible day.
    fn save_journal(&mut self) {
        let store = self.context.entry_store();
        if let Err(e) = save_journal(&store, &self.journal) {
            log::error!("Failed to save journal for {}: {:#}", self.current_date, e);
            self.toast_manager
                .error(format!("Could not save journal: {}", e));
        }
    }

    pub(super) fn reload_habits(&mut self) {
        self.habits = match self.context.habit_service().list_all() {
            Ok(habits) => habits,
            Err(e) => {
                log::error!("Failed to load habits: {:#}", e);
                self.toast_manager
                    .error(format!("Could not load habits: {}", e));
                Vec::new()
            }
        };
    }
}

/// Carry out one habit list action against the store and the loaded list.
fn apply_habit_action(
    service: &HabitService,
    habits: &mut Vec<Habit>,
    pending_delete: &mut Option<i64>,
    action: &HabitAction,
) -> Result<()> {
    match *action {
        HabitAction::Add => {
            habits.push(service.create("")?);
        }
        HabitAction::Rename(id) => {
            if let Some(habit) = habits.iter().find(|habit| habit.id == Some(id)) {
                service.rename(id, &habit.name)?;
            }
        }
        HabitAction::RequestDelete(id) => *pending_delete = Some(id),
        HabitAction::ConfirmDelete(id) => {
            *pending_delete = None;
            service.delete(id)?;
            habits.retain(|habit| habit.id != Some(id));
        }
        HabitAction::CancelDelete => *pending_delete = None,
    }
    Ok(())
}
