//! Press/drag/release state machine for creating a new interval on the strip.
//!
//! Mouse and touch input are translated by the UI layer into [`PointerInput`]
//! values carrying a vertical offset relative to the top of the strip, so the
//! machine itself never sees a device-specific event.

use chrono::NaiveTime;

use super::grid_clock::GridClock;
use crate::models::timeline_event::wall_time::time_from_minutes;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty strip area. The only target that starts a drag.
    Background,
    EventBox,
    DeleteControl,
    /// Anything explicitly excluded from gesture handling.
    NonDraggable,
}

impl PointerTarget {
    pub fn starts_drag(self) -> bool {
        matches!(self, PointerTarget::Background)
    }
}

/// Device-agnostic pointer event. `y` is measured from the top of the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Press { y: f32, target: PointerTarget },
    Move { y: f32 },
    Release,
}

/// A snapped interval under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection {
    start_minutes: u32,
    end_minutes: u32,
}

impl DragSelection {
    pub fn start_minutes(&self) -> u32 {
        self.start_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    pub fn start_time(&self) -> NaiveTime {
        time_from_minutes(self.start_minutes)
    }

    pub fn end_time(&self) -> NaiveTime {
        time_from_minutes(self.end_minutes)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GestureState {
    #[default]
    Idle,
    Dragging(DragSelection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Input had no effect on the machine.
    Ignored,
    /// A drag began or its preview changed.
    Preview(DragSelection),
    /// The drag finished; the machine is idle again.
    Completed(DragSelection),
}

#[derive(Debug, Clone, Default)]
pub struct PointerGestureController {
    state: GestureState,
}

impl PointerGestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Live preview of the drag in progress.
    pub fn selection(&self) -> Option<DragSelection> {
        match self.state {
            GestureState::Dragging(selection) => Some(selection),
            GestureState::Idle => None,
        }
    }

    pub fn handle(&mut self, input: PointerInput, clock: &GridClock) -> GestureOutcome {
        match (self.state, input) {
            (GestureState::Idle, PointerInput::Press { y, target }) => {
                if !target.starts_drag() {
                    return GestureOutcome::Ignored;
                }
                let start_minutes = clock
                    .offset_to_minutes(y)
                    .min(clock.latest_start_minutes());
                let selection = DragSelection {
                    start_minutes,
                    end_minutes: start_minutes + clock.snap_minutes(),
                };
                self.state = GestureState::Dragging(selection);
                GestureOutcome::Preview(selection)
            }
            (GestureState::Dragging(selection), PointerInput::Move { y }) => {
                let pointer_minutes = clock.offset_to_minutes(y);
                let end_minutes = pointer_minutes
                    .max(selection.start_minutes + clock.snap_minutes())
                    .min(clock.end_minutes());
                let updated = DragSelection {
                    end_minutes,
                    ..selection
                };
                self.state = GestureState::Dragging(updated);
                GestureOutcome::Preview(updated)
            }
            (GestureState::Dragging(selection), PointerInput::Release) => {
                self.state = GestureState::Idle;
                log::debug!(
                    "Drag completed: {} minutes from minute {}",
                    selection.duration_minutes(),
                    selection.start_minutes
                );
                GestureOutcome::Completed(selection)
            }
            // A second press mid-drag (multi-touch) keeps the first session.
            (GestureState::Dragging(_), PointerInput::Press { .. }) => GestureOutcome::Ignored,
            (GestureState::Idle, PointerInput::Move { .. } | PointerInput::Release) => {
                GestureOutcome::Ignored
            }
        }
    }
}
