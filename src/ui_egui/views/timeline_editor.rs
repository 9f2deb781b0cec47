use egui::{Color32, RichText};

use crate::models::timeline_event::TimelineEvent;
use crate::services::timeline::TimelineController;

/// What the user chose in the inline editor this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Save,
    Delete(String),
    /// Discard the draft.
    Close,
}

/// Render the inline editor for the controller's open session, if any.
pub fn render_timeline_editor(
    ctx: &egui::Context,
    controller: &mut TimelineController,
    events: &[TimelineEvent],
) -> Option<EditorAction> {
    let session = controller.editor()?;
    let event_id = session.event_id.clone();
    let subtitle = events
        .iter()
        .find(|event| event.id == event_id)
        .map(|event| {
            if event.is_external() {
                format!("{} · Google Calendar", event.time_range_label())
            } else {
                event.time_range_label()
            }
        })
        .unwrap_or_default();

    let mut open = true;
    let mut action = None;

    egui::Window::new("Edit entry")
        .id(egui::Id::new("timeline_editor"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(subtitle).color(Color32::GRAY));
            ui.add_space(4.0);

            if let Some(draft) = controller.editor_text_mut() {
                let response = ui.add(
                    egui::TextEdit::multiline(draft)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY)
                        .hint_text("What happened?"),
                );
                if ui.memory(|mem| mem.focused().is_none()) {
                    response.request_focus();
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("🗑 Delete").color(Color32::from_rgb(200, 80, 80)))
                    .clicked()
                {
                    action = Some(EditorAction::Delete(event_id.clone()));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("💾 Save & Close").clicked() {
                        action = Some(EditorAction::Save);
                    }
                });
            });
        });

    if action.is_none() && (!open || ctx.input(|i| i.key_pressed(egui::Key::Escape))) {
        action = Some(EditorAction::Close);
    }

    action
}
