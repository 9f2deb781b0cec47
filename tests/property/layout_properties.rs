// Property-based tests for the overlap layout engine
// Random days of events must always pack into valid, minimal columns

use chrono::NaiveTime;
use day_journal::models::timeline_event::TimelineEvent;
use day_journal::services::timeline::{assign_columns, ColumnSlot};
use proptest::prelude::*;
use std::collections::HashMap;

fn time_of(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// A day of 1-25 local events on a 5-minute grid between 06:00 and 23:00.
fn arb_day() -> impl Strategy<Value = Vec<TimelineEvent>> {
    prop::collection::vec((72u32..270, 1u32..36), 1..25).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (start, length))| {
                let start = start * 5;
                let end = (start + length * 5).min(23 * 60);
                TimelineEvent::new(format!("local-{}", i), time_of(start), time_of(end)).unwrap()
            })
            .collect()
    })
}

fn by_id<'a>(events: &'a [TimelineEvent], slots: &[ColumnSlot]) -> HashMap<&'a str, (usize, usize)> {
    slots
        .iter()
        .map(|slot| {
            (
                events[slot.index].id.as_str(),
                (slot.column_index, slot.column_count),
            )
        })
        .collect()
}

/// Largest number of events covering one instant.
fn max_depth(events: &[&TimelineEvent]) -> usize {
    events
        .iter()
        .map(|at| {
            events
                .iter()
                .filter(|e| e.start_time <= at.start_time && at.start_time < e.end_time)
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// Groups of transitively overlapping events, as indices into `events`.
fn clusters(events: &[TimelineEvent]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| (events[i].start_time, events[i].end_time));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_end: Option<NaiveTime> = None;
    for i in order {
        let event = &events[i];
        match (group_end, groups.last_mut()) {
            (Some(end), Some(group)) if event.start_time < end => {
                group.push(i);
                group_end = Some(end.max(event.end_time));
            }
            _ => {
                groups.push(vec![i]);
                group_end = Some(event.end_time);
            }
        }
    }
    groups
}

proptest! {
    /// Property: every event gets exactly one slot with a valid column
    #[test]
    fn prop_every_event_placed_once(events in arb_day()) {
        let slots = assign_columns(&events);
        prop_assert_eq!(slots.len(), events.len());

        let mut seen: Vec<usize> = slots.iter().map(|s| s.index).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..events.len()).collect::<Vec<_>>());

        for slot in &slots {
            prop_assert!(slot.column_index < slot.column_count);
        }
    }

    /// Property: overlapping events never share a column
    #[test]
    fn prop_overlapping_events_use_distinct_columns(events in arb_day()) {
        let slots = by_id(&events, &assign_columns(&events));

        for a in &events {
            for b in &events {
                if a.id != b.id && a.overlaps(b) {
                    let (col_a, count_a) = slots[a.id.as_str()];
                    let (col_b, count_b) = slots[b.id.as_str()];
                    prop_assert_ne!(col_a, col_b);
                    prop_assert_eq!(count_a, count_b);
                }
            }
        }
    }

    /// Property: each overlap cluster uses exactly as many columns as its
    /// own deepest overlap, independent of the other clusters
    #[test]
    fn prop_column_count_is_minimal(events in arb_day()) {
        let counts: HashMap<usize, usize> = assign_columns(&events)
            .into_iter()
            .map(|slot| (slot.index, slot.column_count))
            .collect();

        for cluster in clusters(&events) {
            let members: Vec<&TimelineEvent> = cluster.iter().map(|&i| &events[i]).collect();
            let depth = max_depth(&members);
            for &i in &cluster {
                prop_assert_eq!(counts[&i], depth, "event {} in cluster {:?}", i, cluster);
            }
        }
    }

    /// Property: an event overlapping nothing spans the full width
    #[test]
    fn prop_isolated_events_are_full_width(events in arb_day()) {
        let slots = by_id(&events, &assign_columns(&events));

        for event in &events {
            if events.iter().all(|other| other.id == event.id || !event.overlaps(other)) {
                prop_assert_eq!(slots[event.id.as_str()], (0, 1));
            }
        }
    }

    /// Property: input order does not change the layout
    #[test]
    fn prop_layout_ignores_input_order(
        (events, shuffled) in arb_day().prop_flat_map(|events| {
            let shuffled = Just(events.clone()).prop_shuffle();
            (Just(events), shuffled)
        })
    ) {
        let original = by_id(&events, &assign_columns(&events));
        let reordered = by_id(&shuffled, &assign_columns(&shuffled));
        prop_assert_eq!(original, reordered);
    }
}
