//! Interaction logic for one day's timeline strip.
//!
//! The controller never owns the event list. Every operation receives the
//! current list and, when something changed, returns the complete replacement
//! list for the caller to persist.

use super::gesture::{DragSelection, GestureOutcome, PointerGestureController, PointerInput};
use super::grid_clock::GridClock;
use super::identity::{ColorCycle, IdGenerator};
use super::layout::{layout_events, EventPlacement};
use crate::models::timeline_event::TimelineEvent;

/// Inline editor session for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    pub event_id: String,
    pub draft: String,
}

pub struct TimelineController {
    clock: GridClock,
    gesture: PointerGestureController,
    ids: Box<dyn IdGenerator>,
    colors: ColorCycle,
    editor: Option<EditorSession>,
}

impl TimelineController {
    pub fn new(clock: GridClock, ids: Box<dyn IdGenerator>, colors: ColorCycle) -> Self {
        Self {
            clock,
            gesture: PointerGestureController::new(),
            ids,
            colors,
            editor: None,
        }
    }

    pub fn clock(&self) -> &GridClock {
        &self.clock
    }

    /// Swap the grid configuration. Any drag in progress is dropped since its
    /// coordinates no longer mean the same thing.
    pub fn set_clock(&mut self, clock: GridClock) {
        if self.clock != clock {
            self.clock = clock;
            self.cancel_drag();
        }
    }

    /// Abandon a drag in progress without creating an event.
    pub fn cancel_drag(&mut self) {
        if self.gesture.is_dragging() {
            log::debug!("Drag cancelled");
        }
        self.gesture = PointerGestureController::new();
    }

    pub fn preview(&self) -> Option<DragSelection> {
        self.gesture.selection()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn layout<'a>(&self, events: &'a [TimelineEvent]) -> Vec<EventPlacement<'a>> {
        layout_events(events, &self.clock)
    }

    /// Feed one pointer event. Returns the replacement list when a drag
    /// completed and created an event.
    pub fn handle_pointer(
        &mut self,
        input: PointerInput,
        events: &[TimelineEvent],
    ) -> Option<Vec<TimelineEvent>> {
        if self.editor.is_some() && matches!(input, PointerInput::Press { .. }) {
            return None;
        }

        let GestureOutcome::Completed(selection) = self.gesture.handle(input, &self.clock) else {
            return None;
        };

        let event = match TimelineEvent::new(
            self.ids.next_id(),
            selection.start_time(),
            selection.end_time(),
        ) {
            Ok(event) => event.with_color(self.colors.next_color()),
            Err(e) => {
                log::warn!("Discarding drag selection: {}", e);
                return None;
            }
        };

        log::info!(
            "Created timeline event {} ({})",
            event.id,
            event.time_range_label()
        );

        self.editor = Some(EditorSession {
            event_id: event.id.clone(),
            draft: String::new(),
        });

        let mut updated = events.to_vec();
        updated.push(event);
        Some(updated)
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Open the inline editor on an existing event. Returns false when the id
    /// is unknown.
    pub fn open_editor(&mut self, id: &str, events: &[TimelineEvent]) -> bool {
        match events.iter().find(|event| event.id == id) {
            Some(event) => {
                self.editor = Some(EditorSession {
                    event_id: event.id.clone(),
                    draft: event.text.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn editor_text_mut(&mut self) -> Option<&mut String> {
        self.editor.as_mut().map(|session| &mut session.draft)
    }

    /// Write the draft back to its event and close the editor.
    pub fn commit_editor(&mut self, events: &[TimelineEvent]) -> Option<Vec<TimelineEvent>> {
        let session = self.editor.take()?;

        if !events.iter().any(|event| event.id == session.event_id) {
            log::warn!(
                "Event {} disappeared while being edited; draft dropped",
                session.event_id
            );
            return None;
        }

        Some(
            events
                .iter()
                .map(|event| {
                    if event.id == session.event_id {
                        event.clone().with_text(session.draft.clone())
                    } else {
                        event.clone()
                    }
                })
                .collect(),
        )
    }

    /// Remove an event. Closes the editor if it was showing that event.
    pub fn delete_event(&mut self, id: &str, events: &[TimelineEvent]) -> Option<Vec<TimelineEvent>> {
        if self
            .editor
            .as_ref()
            .is_some_and(|session| session.event_id == id)
        {
            self.editor = None;
        }

        if !events.iter().any(|event| event.id == id) {
            return None;
        }

        log::info!("Deleted timeline event {}", id);
        Some(events.iter().filter(|event| event.id != id).cloned().collect())
    }

    /// Close the editor, discarding the draft.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }
}
