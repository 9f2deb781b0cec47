// Timeline module
// Grid clock, layout engine and gesture handling for the day strip

pub mod controller;
pub mod gesture;
pub mod grid_clock;
pub mod identity;
pub mod layout;
pub mod swipe;

pub use controller::{EditorSession, TimelineController};
pub use gesture::{DragSelection, GestureOutcome, PointerGestureController, PointerInput, PointerTarget};
pub use grid_clock::{GridClock, GridConfigError};
pub use identity::{ColorCycle, IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use layout::{assign_columns, layout_events, ColumnSlot, EventPlacement};
pub use swipe::{SwipeConfig, SwipeDirection, SwipeTracker};
