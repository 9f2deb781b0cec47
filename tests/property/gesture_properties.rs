// Property-based tests for the grid clock and drag-to-create gesture
// Any pointer path must produce a snapped interval inside the visible strip

use day_journal::services::timeline::{
    GestureOutcome, GridClock, PointerGestureController, PointerInput, PointerTarget,
};
use proptest::prelude::*;

fn arb_clock() -> impl Strategy<Value = GridClock> {
    (0u32..12, 1u32..12, 20.0f32..120.0, prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]))
        .prop_map(|(start, span, hour_height, snap)| {
            let end = (start + span).min(23);
            GridClock::new(start, end, hour_height, snap).unwrap()
        })
}

proptest! {
    /// Property: snapped offsets always land on the snap grid inside the strip
    #[test]
    fn prop_offsets_snap_inside_strip(clock in arb_clock(), offset in -200.0f32..2000.0) {
        let minutes = clock.offset_to_minutes(offset);
        prop_assert_eq!(minutes % clock.snap_minutes(), 0);
        prop_assert!(minutes >= clock.start_minutes());
        prop_assert!(minutes <= clock.end_minutes());
    }

    /// Property: a completed drag is at least one snap long, aligned, and fits
    #[test]
    fn prop_completed_drag_is_snapped_and_bounded(
        clock in arb_clock(),
        press in -100.0f32..1500.0,
        moves in prop::collection::vec(-300.0f32..1800.0, 0..12),
    ) {
        let mut gesture = PointerGestureController::new();
        let started = gesture.handle(
            PointerInput::Press { y: press, target: PointerTarget::Background },
            &clock,
        );
        prop_assert!(matches!(started, GestureOutcome::Preview(_)));

        for y in moves {
            gesture.handle(PointerInput::Move { y }, &clock);
        }

        let GestureOutcome::Completed(selection) = gesture.handle(PointerInput::Release, &clock) else {
            return Err(TestCaseError::fail("release did not complete the drag"));
        };

        let snap = clock.snap_minutes();
        prop_assert!(selection.duration_minutes() >= snap);
        prop_assert_eq!(selection.start_minutes() % snap, 0);
        prop_assert_eq!(selection.end_minutes() % snap, 0);
        prop_assert!(selection.start_minutes() >= clock.start_minutes());
        prop_assert!(selection.end_minutes() <= clock.end_minutes());
        prop_assert!(!gesture.is_dragging());
    }

    /// Property: presses on anything but the background never start a drag
    #[test]
    fn prop_only_background_starts_a_drag(
        clock in arb_clock(),
        y in 0.0f32..500.0,
        target in prop::sample::select(vec![
            PointerTarget::EventBox,
            PointerTarget::DeleteControl,
            PointerTarget::NonDraggable,
        ]),
    ) {
        let mut gesture = PointerGestureController::new();
        prop_assert_eq!(gesture.handle(PointerInput::Press { y, target }, &clock), GestureOutcome::Ignored);
        prop_assert_eq!(gesture.handle(PointerInput::Release, &clock), GestureOutcome::Ignored);
    }
}
