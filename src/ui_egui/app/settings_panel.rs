use super::JournalApp;
use crate::models::settings::{Settings, THEME_DARK, THEME_LIGHT, THEME_SYSTEM};
use crate::services::timeline::GridClock;
use egui::{Color32, Rect, RichText};

/// Edits in progress in the settings window.
pub(super) struct SettingsDraft {
    settings: Settings,
    error: Option<String>,
}

impl SettingsDraft {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            error: None,
        }
    }
}

enum SettingsAction {
    Save,
    Reset,
    Cancel,
}

impl JournalApp {
    pub(super) fn render_settings_button(&mut self, ui: &mut egui::Ui) -> Rect {
        let response = ui.button("⚙").on_hover_text("Settings");
        if response.clicked() && self.settings_draft.is_none() {
            self.settings_draft = Some(SettingsDraft::new(self.settings.clone()));
        }
        response.rect
    }

    pub(super) fn render_settings_window(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.settings_draft.as_mut() else {
            return;
        };

        let mut open = true;
        let mut action = None;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if let Some(error) = &draft.error {
                    ui.colored_label(Color32::RED, RichText::new(error).strong());
                    ui.add_space(8.0);
                }

                let settings = &mut draft.settings;
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Theme:");
                        egui::ComboBox::from_id_source("theme_combo")
                            .selected_text(settings.theme.clone())
                            .show_ui(ui, |ui| {
                                for theme in [THEME_SYSTEM, THEME_LIGHT, THEME_DARK] {
                                    ui.selectable_value(&mut settings.theme, theme.to_string(), theme);
                                }
                            });
                        ui.end_row();

                        ui.label("Day starts at:");
                        ui.add(
                            egui::DragValue::new(&mut settings.day_start_hour)
                                .range(0..=22)
                                .suffix(":00"),
                        );
                        ui.end_row();

                        ui.label("Day ends at:");
                        ui.add(
                            egui::DragValue::new(&mut settings.day_end_hour)
                                .range(1..=23)
                                .suffix(":00"),
                        );
                        ui.end_row();

                        ui.label("Snap to:");
                        egui::ComboBox::from_id_source("snap_combo")
                            .selected_text(format!("{} min", settings.snap_minutes))
                            .show_ui(ui, |ui| {
                                for minutes in [5, 10, 15, 20, 30, 60] {
                                    ui.selectable_value(
                                        &mut settings.snap_minutes,
                                        minutes,
                                        format!("{} min", minutes),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Hour height:");
                        ui.add(
                            egui::DragValue::new(&mut settings.hour_height)
                                .range(12.0..=160.0)
                                .speed(1.0)
                                .suffix(" px"),
                        );
                        ui.end_row();
                    });

                ui.add_space(12.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("💾 Save").clicked() {
                        action = Some(SettingsAction::Save);
                    }
                    if ui.button("✖ Cancel").clicked() {
                        action = Some(SettingsAction::Cancel);
                    }
                    ui.add_space(20.0);
                    if ui
                        .button(RichText::new("↺ Reset to Defaults").color(Color32::LIGHT_BLUE))
                        .clicked()
                    {
                        action = Some(SettingsAction::Reset);
                    }
                });
            });

        if !open {
            action = Some(SettingsAction::Cancel);
        }

        match action {
            Some(SettingsAction::Save) => self.save_settings(ctx),
            Some(SettingsAction::Reset) => self.reset_settings(ctx),
            Some(SettingsAction::Cancel) => self.settings_draft = None,
            None => {}
        }
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.settings_draft.as_mut() else {
            return;
        };

        let service = self.context.settings_service();
        if let Err(e) = service.update(&draft.settings) {
            draft.error = Some(format!("Failed to save settings: {}", e));
            return;
        }

        let saved = draft.settings.clone();
        self.settings_draft = None;
        self.adopt_settings(saved, ctx);
        self.toast_manager.success("Settings saved");
    }

    fn reset_settings(&mut self, ctx: &egui::Context) {
        let service = self.context.settings_service();
        match service.reset() {
            Ok(()) => {
                self.settings_draft = None;
                self.adopt_settings(Settings::default(), ctx);
                self.toast_manager.success("Settings restored to defaults");
            }
            Err(e) => {
                if let Some(draft) = self.settings_draft.as_mut() {
                    draft.error = Some(format!("Failed to reset settings: {}", e));
                }
            }
        }
    }

    fn adopt_settings(&mut self, settings: Settings, ctx: &egui::Context) {
        match GridClock::from_settings(&settings) {
            Ok(clock) => self.controller.set_clock(clock),
            Err(e) => log::warn!("Saved settings produced an invalid grid: {}", e),
        }
        self.settings = settings;
        self.apply_theme(ctx);
    }
}
