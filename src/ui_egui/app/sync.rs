use std::time::Duration;

use super::JournalApp;
use crate::config::TOKEN_ENV_VAR;
use crate::services::calendar_sync::{imported_count, merge_external, SyncOutcome};
use crate::services::entry_store::{load_timeline, replace_timeline};
use egui::Rect;

impl JournalApp {
    pub(super) fn render_sync_button(&mut self, ui: &mut egui::Ui) -> Rect {
        let in_flight = self
            .sync_worker
            .as_ref()
            .is_some_and(|worker| worker.is_in_flight());

        let (label, hint) = match &self.sync_worker {
            Some(_) if in_flight => ("Syncing...", "Fetching today's Google Calendar events"),
            Some(_) => ("Sync with Google", "Sync with Google Calendar"),
            None => ("Config Error", "No Google Calendar access token configured"),
        };

        let response = ui
            .add_enabled(!in_flight, egui::Button::new(label))
            .on_hover_text(hint);
        if response.clicked() {
            self.request_sync();
        }
        response.rect
    }

    fn request_sync(&mut self) {
        let Some(worker) = self.sync_worker.as_mut() else {
            let path = crate::config::Config::config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string());
            self.toast_manager.warning(format!(
                "Set google.access_token in {} or {} to enable sync",
                path, TOKEN_ENV_VAR
            ));
            return;
        };

        worker.request(self.current_date);
    }

    /// Apply a finished fetch. The merge runs against the newest list for the
    /// requested day, so events created while the fetch was running survive.
    pub(super) fn poll_sync(&mut self, ctx: &egui::Context) {
        let Some(worker) = self.sync_worker.as_mut() else {
            return;
        };

        let Some(outcome) = worker.poll() else {
            if worker.is_in_flight() {
                ctx.request_repaint_after(Duration::from_millis(200));
            }
            return;
        };

        match outcome {
            SyncOutcome::Fetched { day, events } => {
                let imported = if day == self.current_date {
                    let merged = merge_external(&self.timeline, &events, day);
                    let imported = imported_count(&merged);
                    self.commit_timeline(merged);
                    imported
                } else {
                    let store = self.context.entry_store();
                    let result = load_timeline(&store, day).and_then(|current| {
                        replace_timeline(&store, day, merge_external(&current, &events, day))
                    });
                    match result {
                        Ok(entry) => imported_count(&entry.timeline),
                        Err(e) => {
                            log::error!("Failed to store synced events for {}: {:#}", day, e);
                            self.toast_manager
                                .error(format!("Could not save synced events: {}", e));
                            return;
                        }
                    }
                };
                self.toast_manager
                    .success(format!("Synced {} events from Google Calendar", imported));
            }
            SyncOutcome::Failed { message, .. } => {
                self.toast_manager
                    .error(format!("Google Calendar sync failed: {}", message));
            }
        }
    }
}
