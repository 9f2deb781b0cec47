//! Side-by-side layout for overlapping timeline events.
//!
//! Events are sorted, split into clusters of transitively overlapping
//! intervals, and packed into columns first-fit. Column counts are local to a
//! cluster so an isolated event always spans the full strip width.
//!
//! The layout is recomputed from scratch on every render; a single edit can
//! merge or split clusters.

use std::cmp::Ordering;

use super::grid_clock::GridClock;
use crate::models::timeline_event::TimelineEvent;

/// Column assignment for one event, identified by its index in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    pub index: usize,
    pub column_index: usize,
    pub column_count: usize,
}

/// Rendering plan for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlacement<'a> {
    pub event: &'a TimelineEvent,
    pub top: f32,
    pub height: f32,
    pub column_index: usize,
    pub column_count: usize,
}

impl EventPlacement<'_> {
    /// Left edge as a fraction of the strip width.
    pub fn left_fraction(&self) -> f32 {
        self.column_index as f32 / self.column_count as f32
    }

    /// Width as a fraction of the strip width.
    pub fn width_fraction(&self) -> f32 {
        1.0 / self.column_count as f32
    }
}

fn compare_events(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    a.start_time
        .cmp(&b.start_time)
        .then_with(|| a.end_time.cmp(&b.end_time))
        .then_with(|| a.id.cmp(&b.id))
}

/// Input indices ordered by start, then end, then id.
fn sorted_indices(events: &[TimelineEvent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| compare_events(&events[a], &events[b]));
    order
}

/// Assign every event a column within its cluster.
///
/// The result is in sorted event order, not input order.
pub fn assign_columns(events: &[TimelineEvent]) -> Vec<ColumnSlot> {
    let mut slots = Vec::with_capacity(events.len());

    let mut cluster: Vec<(usize, usize)> = Vec::new();
    // End minute of the last event placed in each open column.
    let mut column_ends: Vec<u32> = Vec::new();
    let mut cluster_end: Option<u32> = None;

    for index in sorted_indices(events) {
        let event = &events[index];
        let start = event.start_minutes();
        // Inverted external records are treated as zero-length.
        let end = event.end_minutes().max(start);

        if cluster_end.is_some_and(|cluster_end| start >= cluster_end) {
            flush_cluster(&mut cluster, &mut column_ends, &mut slots);
        }

        let column = match column_ends.iter().position(|&last_end| last_end <= start) {
            Some(column) => {
                column_ends[column] = end;
                column
            }
            None => {
                column_ends.push(end);
                column_ends.len() - 1
            }
        };

        cluster.push((index, column));
        cluster_end = Some(cluster_end.map_or(end, |current| current.max(end)));
    }

    flush_cluster(&mut cluster, &mut column_ends, &mut slots);
    slots
}

fn flush_cluster(
    cluster: &mut Vec<(usize, usize)>,
    column_ends: &mut Vec<u32>,
    slots: &mut Vec<ColumnSlot>,
) {
    let column_count = column_ends.len();
    slots.extend(cluster.drain(..).map(|(index, column_index)| ColumnSlot {
        index,
        column_index,
        column_count,
    }));
    column_ends.clear();
}

/// Full rendering plan: column assignment plus vertical placement.
pub fn layout_events<'a>(events: &'a [TimelineEvent], clock: &GridClock) -> Vec<EventPlacement<'a>> {
    assign_columns(events)
        .into_iter()
        .map(|slot| {
            let event = &events[slot.index];
            EventPlacement {
                event,
                top: clock.time_to_offset(event.start_time),
                height: clock.height_between(event.start_time, event.end_time),
                column_index: slot.column_index,
                column_count: slot.column_count,
            }
        })
        .collect()
}
