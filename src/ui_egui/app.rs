#[path = "app/context.rs"]
mod context;
mod journal;
mod lifecycle;
mod navigation;
mod settings_panel;
mod sync;
mod toast;

use self::context::AppContext;
use self::settings_panel::SettingsDraft;
use self::toast::ToastManager;
use crate::models::daily_entry::DailyEntry;
use crate::models::habit::Habit;
use crate::models::settings::Settings;
use crate::models::timeline_event::TimelineEvent;
use crate::services::calendar_sync::SyncWorker;
use crate::services::entry_store::replace_timeline;
use crate::services::timeline::{SwipeTracker, TimelineController};
use crate::ui_egui::views::timeline_editor::{render_timeline_editor, EditorAction};
use crate::ui_egui::views::timeline_view::render_timeline;
use chrono::{Local, NaiveDate};

const MIN_ROOT_WIDTH: f32 = 360.0;
const MIN_ROOT_HEIGHT: f32 = 480.0;

pub struct JournalApp {
    /// Database and loaded configuration
    context: AppContext,
    settings: Settings,
    /// Open settings window, if any
    settings_draft: Option<SettingsDraft>,
    current_date: NaiveDate,
    /// Timeline of `current_date`, newest known state
    timeline: Vec<TimelineEvent>,
    /// Journal fields of `current_date` as edited on screen
    journal: DailyEntry,
    habits: Vec<Habit>,
    /// Habit awaiting delete confirmation
    pending_habit_delete: Option<i64>,
    controller: TimelineController,
    swipe: SwipeTracker,
    /// Present only when an access token is configured
    sync_worker: Option<SyncWorker>,
    toast_manager: ToastManager,
    is_dark: bool,
}

impl eframe::App for JournalApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}

impl JournalApp {
    /// Adopt `events` as the current day's timeline and persist it. A failed
    /// write keeps the in-memory list so nothing visible is lost.
    fn commit_timeline(&mut self, events: Vec<TimelineEvent>) {
        self.timeline = events;
        let store = self.context.entry_store();
        if let Err(e) = replace_timeline(&store, self.current_date, self.timeline.clone()) {
            log::error!("Failed to save timeline for {}: {:#}", self.current_date, e);
            self.toast_manager
                .error(format!("Could not save changes: {}", e));
        }
    }

    fn render_main_panel(&mut self, ctx: &egui::Context) {
        let today = Local::now();
        let now = (today.date_naive() == self.current_date).then(|| today.time());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .drag_to_scroll(false)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_journal(ui);
                    ui.add_space(8.0);
                    ui.separator();

                    let output = render_timeline(
                        ui,
                        &self.controller,
                        &self.timeline,
                        self.is_dark,
                        now,
                    );

                    for input in output.pointer_inputs {
                        if let Some(events) = self.controller.handle_pointer(input, &self.timeline) {
                            self.commit_timeline(events);
                        }
                    }

                    if let Some(id) = output.delete_requested {
                        if let Some(events) = self.controller.delete_event(&id, &self.timeline) {
                            self.commit_timeline(events);
                        }
                    } else if let Some(id) = output.edit_requested {
                        if !self.controller.is_editing() {
                            self.controller.open_editor(&id, &self.timeline);
                        }
                    }
                });
        });

        if self.controller.is_dragging() {
            ctx.request_repaint();
        }
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let Some(action) = render_timeline_editor(ctx, &mut self.controller, &self.timeline) else {
            return;
        };

        match action {
            EditorAction::Save => {
                if let Some(events) = self.controller.commit_editor(&self.timeline) {
                    self.commit_timeline(events);
                }
            }
            EditorAction::Delete(id) => {
                if let Some(events) = self.controller.delete_event(&id, &self.timeline) {
                    self.commit_timeline(events);
                }
            }
            EditorAction::Close => self.controller.close_editor(),
        }
    }
}
