//! Reconciliation of a day's local timeline with a freshly fetched batch of
//! external calendar events.
//!
//! Every externally sourced event in the local list is dropped and replaced by
//! the mapped batch. User-created events pass through untouched, so merging
//! the same batch twice yields the same list.

use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Timelike};

use crate::models::external_event::{ExternalEvent, ExternalTime};
use crate::models::timeline_event::{ColorToken, TimelineEvent};

/// Which end of an event a timestamp belongs to. Decides how all-day values
/// and out-of-day instants clamp.
#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

fn day_start() -> NaiveTime {
    NaiveTime::MIN
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Convert an external timestamp to a wall-clock time on `date` in `tz`.
fn wall_clock_on<Tz: TimeZone>(value: &ExternalTime, edge: Edge, date: NaiveDate, tz: &Tz) -> NaiveTime {
    match value {
        ExternalTime::AllDay(_) => match edge {
            Edge::Start => day_start(),
            Edge::End => day_end(),
        },
        ExternalTime::At(instant) => {
            let local = instant.with_timezone(tz).naive_local();
            if local.date() < date {
                day_start()
            } else if local.date() > date {
                day_end()
            } else {
                NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(NaiveTime::MIN)
            }
        }
    }
}

/// Map a fetched batch onto `date`. Duplicate ids keep their first
/// occurrence; colours cycle through the palette by position in the fetched
/// batch, so a record keeps its colour when an earlier one is skipped.
pub fn map_external_in<Tz: TimeZone>(
    fetched: &[ExternalEvent],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<TimelineEvent> {
    let mut seen = HashSet::new();
    let mut mapped = Vec::with_capacity(fetched.len());

    for (position, external) in fetched.iter().enumerate() {
        if let Err(e) = external.validate() {
            log::warn!("Skipping external event: {}", e);
            continue;
        }
        if !seen.insert(external.id.as_str()) {
            log::debug!("Duplicate external event {} ignored", external.id);
            continue;
        }

        mapped.push(TimelineEvent::external(
            &external.id,
            wall_clock_on(&external.start, Edge::Start, date, tz),
            wall_clock_on(&external.end, Edge::End, date, tz),
            external.title.clone().unwrap_or_default(),
            ColorToken::cycled(position),
        ));
    }

    mapped
}

/// Replace the externally sourced part of `local` with `fetched`.
pub fn merge_external_in<Tz: TimeZone>(
    local: &[TimelineEvent],
    fetched: &[ExternalEvent],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<TimelineEvent> {
    let mut merged: Vec<TimelineEvent> = local
        .iter()
        .filter(|event| !event.is_external())
        .cloned()
        .collect();
    let kept = merged.len();

    merged.extend(map_external_in(fetched, date, tz));

    log::info!(
        "Merged {} external events into {} ({} local events kept, {} replaced)",
        merged.len() - kept,
        date,
        kept,
        local.len() - kept
    );
    merged
}

/// Number of externally sourced events in a merged list.
pub fn imported_count(events: &[TimelineEvent]) -> usize {
    events.iter().filter(|event| event.is_external()).count()
}

/// [`merge_external_in`] using the system time zone.
pub fn merge_external(
    local: &[TimelineEvent],
    fetched: &[ExternalEvent],
    date: NaiveDate,
) -> Vec<TimelineEvent> {
    merge_external_in(local, fetched, date, &Local)
}
