//! Translate raw egui pointer events into [`PointerInput`] for the strip.
//!
//! egui-winit already reports the first touch as the primary pointer, so mouse
//! and touch arrive here as the same `PointerButton`/`PointerMoved` events.

use egui::{Event, PointerButton, Pos2, Rect};

use crate::services::timeline::{PointerInput, PointerTarget};

/// Screen area owned by something drawn on the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub rect: Rect,
    pub target: PointerTarget,
}

/// Target under `pos`. Regions registered later sit on top.
pub fn classify(pos: Pos2, regions: &[HitRegion]) -> PointerTarget {
    regions
        .iter()
        .rev()
        .find(|region| region.rect.contains(pos))
        .map(|region| region.target)
        .unwrap_or(PointerTarget::Background)
}

/// Convert this frame's events. Presses count only inside `active_rect`
/// (the visible part of the strip); moves and releases are always forwarded
/// so a drag keeps tracking once the pointer leaves the strip.
pub fn translate_events(
    events: &[Event],
    strip_top: f32,
    active_rect: Rect,
    regions: &[HitRegion],
) -> Vec<PointerInput> {
    let mut inputs = Vec::new();

    for event in events {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } if active_rect.contains(*pos) => {
                inputs.push(PointerInput::Press {
                    y: pos.y - strip_top,
                    target: classify(*pos, regions),
                });
            }
            Event::PointerMoved(pos) => inputs.push(PointerInput::Move {
                y: pos.y - strip_top,
            }),
            Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            }
            | Event::PointerGone => inputs.push(PointerInput::Release),
            _ => {}
        }
    }

    inputs
}
