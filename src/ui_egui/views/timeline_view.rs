//! Day timeline strip rendering.
//!
//! Draws the hour gutter, grid lines, laid-out event boxes and the live drag
//! preview, then reports what the user did this frame. Nothing here mutates
//! the event list; the caller feeds the output back through the controller.

use chrono::NaiveTime;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{event_fill, TimelinePalette};
use super::pointer_adapter::{translate_events, HitRegion};
use crate::models::timeline_event::wall_time::{format_hhmm, minutes_of};
use crate::models::timeline_event::TimelineEvent;
use crate::services::timeline::{GridClock, PointerInput, PointerTarget, TimelineController};

pub const TIME_LABEL_WIDTH: f32 = 48.0;
/// Boxes shorter than this (zero-length imports, five-minute slots) are
/// stretched so their text and delete control stay usable.
pub const MIN_EVENT_HEIGHT: f32 = 18.0;
const DELETE_CONTROL_SIZE: f32 = 16.0;
const BOX_GAP: f32 = 2.0;

#[derive(Debug, Default)]
pub struct TimelineViewOutput {
    pub pointer_inputs: Vec<PointerInput>,
    pub edit_requested: Option<String>,
    pub delete_requested: Option<String>,
}

/// Render the strip. `now` draws the current-time line when the visible day
/// is today.
pub fn render_timeline(
    ui: &mut egui::Ui,
    controller: &TimelineController,
    events: &[TimelineEvent],
    is_dark: bool,
    now: Option<NaiveTime>,
) -> TimelineViewOutput {
    let clock = controller.clock();
    let palette = TimelinePalette::new(is_dark);
    let mut output = TimelineViewOutput::default();

    let width = ui.available_width().max(TIME_LABEL_WIDTH * 2.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, clock.total_height()), Sense::hover());
    let strip_rect = Rect::from_min_max(Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top()), rect.max);

    draw_grid(ui, rect, strip_rect, clock, &palette);

    let mut regions = Vec::new();
    for placement in controller.layout(events) {
        let event = placement.event;
        let left = strip_rect.left() + placement.left_fraction() * strip_rect.width();
        let box_rect = Rect::from_min_size(
            Pos2::new(left + BOX_GAP / 2.0, strip_rect.top() + placement.top),
            Vec2::new(
                placement.width_fraction() * strip_rect.width() - BOX_GAP,
                placement.height.max(MIN_EVENT_HEIGHT) - 1.0,
            ),
        );

        draw_event_box(ui, box_rect, event, &palette);
        regions.push(HitRegion {
            rect: box_rect,
            target: PointerTarget::EventBox,
        });

        let box_response = ui
            .interact(box_rect, ui.id().with(("timeline_event", &event.id)), Sense::click())
            .on_hover_text(event.time_range_label());

        let delete_rect = Rect::from_min_size(
            Pos2::new(box_rect.right() - DELETE_CONTROL_SIZE - 2.0, box_rect.top() + 1.0),
            Vec2::splat(DELETE_CONTROL_SIZE),
        );
        regions.push(HitRegion {
            rect: delete_rect,
            target: PointerTarget::DeleteControl,
        });
        let delete_response = ui
            .interact(delete_rect, ui.id().with(("timeline_delete", &event.id)), Sense::click())
            .on_hover_text("Delete");
        draw_delete_control(ui, delete_rect, delete_response.hovered(), &palette);

        if delete_response.clicked() {
            output.delete_requested = Some(event.id.clone());
        } else if box_response.clicked() {
            output.edit_requested = Some(event.id.clone());
        }
    }

    if let Some(selection) = controller.preview() {
        let top = strip_rect.top() + clock.minutes_to_offset(selection.start_minutes());
        let bottom = strip_rect.top() + clock.minutes_to_offset(selection.end_minutes());
        let preview_rect = Rect::from_min_max(
            Pos2::new(strip_rect.left() + BOX_GAP / 2.0, top),
            Pos2::new(strip_rect.right() - BOX_GAP / 2.0, bottom.max(top + MIN_EVENT_HEIGHT)),
        );
        let painter = ui.painter();
        painter.rect_filled(preview_rect, 3.0, palette.preview_fill);
        painter.rect_stroke(preview_rect, 3.0, Stroke::new(1.5, palette.preview_stroke));
        painter.text(
            preview_rect.left_top() + Vec2::new(6.0, 3.0),
            Align2::LEFT_TOP,
            format!(
                "{} - {}",
                format_hhmm(selection.start_time()),
                format_hhmm(selection.end_time())
            ),
            FontId::proportional(11.0),
            palette.preview_stroke,
        );
    }

    if let Some(now) = now {
        draw_current_time(ui, strip_rect, clock, now);
    }

    // Presses that land on a window above the strip belong to that window.
    let layer = ui.layer_id();
    let ctx = ui.ctx().clone();
    let raw_events: Vec<egui::Event> = ui.input(|i| i.events.clone());
    let raw_events: Vec<egui::Event> = raw_events
        .into_iter()
        .filter(|event| match event {
            egui::Event::PointerButton { pos, pressed: true, .. } => {
                !matches!(ctx.layer_id_at(*pos), Some(other) if other != layer)
            }
            _ => true,
        })
        .collect();

    let active_rect = strip_rect.intersect(ui.clip_rect());
    output.pointer_inputs = translate_events(&raw_events, strip_rect.top(), active_rect, &regions);
    output
}

fn draw_grid(
    ui: &egui::Ui,
    rect: Rect,
    strip_rect: Rect,
    clock: &GridClock,
    palette: &TimelinePalette,
) {
    let painter = ui.painter();
    painter.rect_filled(strip_rect, 0.0, palette.strip_bg);

    for hour in clock.visible_hours() {
        let y = strip_rect.top() + clock.minutes_to_offset(hour * 60);
        painter.line_segment(
            [Pos2::new(strip_rect.left(), y), Pos2::new(strip_rect.right(), y)],
            Stroke::new(1.0, palette.hour_line),
        );
        painter.text(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH - 6.0, y),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(12.0),
            palette.label_text,
        );

        let half = strip_rect.top() + clock.minutes_to_offset(hour * 60 + 30);
        painter.line_segment(
            [Pos2::new(strip_rect.left(), half), Pos2::new(strip_rect.right(), half)],
            Stroke::new(1.0, palette.half_hour_line),
        );
    }

    painter.line_segment(
        [strip_rect.left_bottom(), strip_rect.right_bottom()],
        Stroke::new(1.0, palette.hour_line),
    );
}

fn draw_event_box(ui: &egui::Ui, box_rect: Rect, event: &TimelineEvent, palette: &TimelinePalette) {
    let fill = event
        .color
        .map(|color| event_fill(color, event.is_external()))
        .unwrap_or_else(|| Color32::from_rgb(116, 139, 167));

    let painter = ui.painter().with_clip_rect(box_rect.intersect(ui.clip_rect()));
    painter.rect_filled(box_rect, 3.0, fill);
    painter.rect_stroke(box_rect, 3.0, Stroke::new(1.0, palette.event_border));

    let text_left = box_rect.left() + 6.0;
    let wrap_width = (box_rect.width() - DELETE_CONTROL_SIZE - 10.0).max(10.0);
    painter.text(
        Pos2::new(text_left, box_rect.top() + 2.0),
        Align2::LEFT_TOP,
        event.time_range_label(),
        FontId::proportional(10.0),
        palette.event_text.gamma_multiply(0.85),
    );

    let galley = painter.layout(
        event.display_text().to_string(),
        FontId::proportional(12.0),
        palette.event_text,
        wrap_width,
    );
    painter.galley(Pos2::new(text_left, box_rect.top() + 15.0), galley, palette.event_text);
}

fn draw_delete_control(ui: &egui::Ui, rect: Rect, hovered: bool, palette: &TimelinePalette) {
    let painter = ui.painter();
    let bg = if hovered {
        palette.delete_bg.gamma_multiply(1.6)
    } else {
        palette.delete_bg
    };
    painter.circle_filled(rect.center(), DELETE_CONTROL_SIZE / 2.0, bg);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "×",
        FontId::proportional(12.0),
        palette.delete_text,
    );
}

fn draw_current_time(ui: &egui::Ui, strip_rect: Rect, clock: &GridClock, now: NaiveTime) {
    let minutes = minutes_of(now);
    if minutes < clock.start_minutes() || minutes > clock.end_minutes() {
        return;
    }

    let y = strip_rect.top() + clock.minutes_to_offset(minutes);
    let line_color = Color32::from_rgb(255, 100, 100);
    let painter = ui.painter();
    painter.circle_filled(Pos2::new(strip_rect.left() - 4.0, y), 3.0, line_color);
    painter.line_segment(
        [Pos2::new(strip_rect.left(), y), Pos2::new(strip_rect.right(), y)],
        Stroke::new(2.0, line_color),
    );
}
