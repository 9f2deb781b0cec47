use super::JournalApp;
use crate::services::timeline::SwipeDirection;
use crate::utils::date::{day_heading, next_day, previous_day};
use chrono::{Local, NaiveDate};
use egui::{Key, Rect};

impl JournalApp {
    /// Switch the visible day. Any open editor is discarded and any drag in
    /// progress belongs to the old day's strip.
    pub(super) fn go_to_date(&mut self, date: NaiveDate) {
        if date == self.current_date {
            return;
        }
        self.controller.close_editor();
        self.controller.cancel_drag();
        self.current_date = date;
        self.reload_day();
        log::debug!("Showing {}", date);
    }

    pub(super) fn navigate_previous(&mut self) {
        self.go_to_date(previous_day(self.current_date));
    }

    pub(super) fn navigate_next(&mut self) {
        self.go_to_date(next_day(self.current_date));
    }

    pub(super) fn jump_to_today(&mut self) {
        self.go_to_date(Local::now().date_naive());
    }

    pub(super) fn handle_keyboard_navigation(&mut self, ctx: &egui::Context) {
        if self.controller.is_editing()
            || self.settings_draft.is_some()
            || ctx.memory(|mem| mem.focused().is_some())
        {
            return;
        }

        let (left, right) = ctx.input(|i| {
            (
                i.key_pressed(Key::ArrowLeft),
                i.key_pressed(Key::ArrowRight),
            )
        });
        if left {
            self.navigate_previous();
        } else if right {
            self.navigate_next();
        }
    }

    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("day_header").show(ctx, |ui| {
            let mut controls: Vec<Rect> = Vec::new();
            let mut picked_date = self.current_date;

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let prev = ui.button("◀").on_hover_text("Previous day (←)");
                let today = ui.button("Today");
                let next = ui.button("▶").on_hover_text("Next day (→)");
                let picker = ui.add(
                    egui_extras::DatePickerButton::new(&mut picked_date).id_source("day_picker"),
                );
                controls.extend([prev.rect, today.rect, next.rect, picker.rect]);

                if prev.clicked() {
                    self.navigate_previous();
                }
                if today.clicked() {
                    self.jump_to_today();
                }
                if next.clicked() {
                    self.navigate_next();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    controls.push(self.render_settings_button(ui));
                    controls.push(self.render_sync_button(ui));
                });
            });

            if picked_date != self.current_date {
                self.go_to_date(picked_date);
            }

            let heading = ui.heading(day_heading(self.current_date));
            ui.add_space(4.0);

            let header_rect = ui.min_rect().union(heading.rect);
            self.handle_header_swipe(ui, header_rect, &controls);
        });
    }

    /// Page-swipe over the header. Presses on any header control are left to
    /// that control.
    fn handle_header_swipe(&mut self, ui: &egui::Ui, header_rect: Rect, controls: &[Rect]) {
        let (events, time_ms) = ui.input(|i| (i.events.clone(), i.time * 1000.0));
        let mut swiped = None;

        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } if header_rect.contains(pos) => {
                    let on_control = controls.iter().any(|rect| rect.contains(pos));
                    self.swipe
                        .press(pos.x, pos.y, time_ms, header_rect.width(), on_control);
                }
                egui::Event::PointerMoved(pos) => self.swipe.move_to(pos.x, pos.y),
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    swiped = self.swipe.release(time_ms).or(swiped);
                }
                egui::Event::PointerGone => self.swipe.cancel(),
                _ => {}
            }
        }

        if self.swipe.is_swiping() && self.swipe.progress() > 0.0 {
            // Page-flip hint: fade the header in proportion to the swipe.
            let tint = ui
                .visuals()
                .selection
                .bg_fill
                .gamma_multiply(0.35 * self.swipe.progress());
            ui.painter().rect_filled(header_rect, 4.0, tint);
            ui.ctx().request_repaint();
        }

        match swiped {
            Some(SwipeDirection::Left) => self.navigate_next(),
            Some(SwipeDirection::Right) => self.navigate_previous(),
            None => {}
        }
    }
}
