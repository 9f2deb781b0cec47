//! Transient notices shown over the timeline.
//!
//! Each notice expires on its own and can be dismissed early by clicking it.

use egui::{Color32, Context, RichText};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }

    fn colors(self, is_dark: bool) -> (Color32, Color32) {
        match (self, is_dark) {
            (ToastLevel::Success, true) => (Color32::from_rgb(30, 70, 40), Color32::from_rgb(100, 220, 120)),
            (ToastLevel::Warning, true) => (Color32::from_rgb(80, 60, 20), Color32::from_rgb(255, 200, 80)),
            (ToastLevel::Error, true) => (Color32::from_rgb(80, 30, 30), Color32::from_rgb(255, 120, 120)),
            (ToastLevel::Success, false) => (Color32::from_rgb(220, 255, 220), Color32::from_rgb(30, 120, 50)),
            (ToastLevel::Warning, false) => (Color32::from_rgb(255, 245, 200), Color32::from_rgb(150, 100, 0)),
            (ToastLevel::Error, false) => (Color32::from_rgb(255, 220, 220), Color32::from_rgb(180, 40, 40)),
        }
    }

    /// Errors stay up longer since they usually need reading.
    fn lifetime(self) -> Duration {
        match self {
            ToastLevel::Error => Duration::from_secs(6),
            _ => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    level: ToastLevel,
    created_at: Instant,
}

impl Toast {
    fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.level.lifetime()
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            created_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    fn cleanup_at(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
    }

    pub fn render(&mut self, ctx: &Context, is_dark: bool) {
        self.cleanup_at(Instant::now());
        if self.toasts.is_empty() {
            return;
        }

        let screen_rect = ctx.screen_rect();
        let width = (screen_rect.width() - 24.0).min(360.0);
        let mut dismissed = None;

        for (i, toast) in self.toasts.iter().enumerate() {
            let (fill, text) = toast.level.colors(is_dark);
            let pos = egui::pos2(
                screen_rect.center().x - width / 2.0,
                screen_rect.bottom() - 56.0 - i as f32 * 48.0,
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let frame = egui::Frame::none()
                        .fill(fill)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_width(width - 24.0);
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(text).strong());
                                ui.label(RichText::new(&toast.message).color(text));
                            });
                        });
                    if frame
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_text("Click to dismiss")
                        .clicked()
                    {
                        dismissed = Some(i);
                    }
                });
        }

        if let Some(i) = dismissed {
            self.toasts.remove(i);
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
