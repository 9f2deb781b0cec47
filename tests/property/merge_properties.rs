// Property-based tests for calendar merge
// Random local timelines and fetched batches must merge stably

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use day_journal::models::external_event::{ExternalEvent, ExternalTime};
use day_journal::models::timeline_event::{ColorToken, TimelineEvent};
use day_journal::services::calendar_sync::merge_external_in;
use proptest::prelude::*;
use std::collections::HashSet;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn zone() -> FixedOffset {
    FixedOffset::east_opt(10 * 3600).unwrap()
}

fn time_of(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// A stored timeline mixing user events with externals left by an earlier sync.
fn arb_local() -> impl Strategy<Value = Vec<TimelineEvent>> {
    prop::collection::vec((any::<bool>(), 0u32..1380, 1u32..60), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (external, start, length))| {
                let end = (start + length).min(1439);
                if external {
                    TimelineEvent::external(
                        &format!("old-{}", i),
                        time_of(start),
                        time_of(end),
                        "Stale",
                        ColorToken::cycled(i),
                    )
                } else {
                    TimelineEvent::new(format!("local-{}", i), time_of(start), time_of(end))
                        .unwrap()
                        .with_text(format!("Note {}", i))
                }
            })
            .collect()
    })
}

fn arb_external_time() -> impl Strategy<Value = ExternalTime> {
    prop_oneof![
        // Instants from the previous evening to the next morning, local zone.
        (-6i64 * 60..30 * 60).prop_map(|minutes| {
            let midnight = zone()
                .from_local_datetime(&day().and_hms_opt(0, 0, 0).unwrap())
                .unwrap();
            ExternalTime::At(midnight + Duration::minutes(minutes))
        }),
        Just(ExternalTime::AllDay(day())),
    ]
}

/// A fetched batch drawing ids from a small pool so duplicates and blank ids
/// turn up often.
fn arb_batch() -> impl Strategy<Value = Vec<ExternalEvent>> {
    let ids = prop::sample::select(vec!["a", "b", "c", "d", "e", " ", ""]);
    let titles = prop::option::of("[A-Za-z ]{0,12}");
    prop::collection::vec(
        (ids, titles, arb_external_time(), arb_external_time()),
        0..10,
    )
    .prop_map(|records| {
        records
            .into_iter()
            .map(|(id, title, start, end)| ExternalEvent::new(id, title, start, end))
            .collect()
    })
}

proptest! {
    /// Property: merging the same batch again changes nothing
    #[test]
    fn prop_merge_is_idempotent(local in arb_local(), batch in arb_batch()) {
        let once = merge_external_in(&local, &batch, day(), &zone());
        let twice = merge_external_in(&once, &batch, day(), &zone());
        prop_assert_eq!(twice, once);
    }

    /// Property: user events pass through unchanged and in their original order
    #[test]
    fn prop_local_events_pass_through(local in arb_local(), batch in arb_batch()) {
        let merged = merge_external_in(&local, &batch, day(), &zone());

        let before: Vec<&TimelineEvent> = local.iter().filter(|e| !e.is_external()).collect();
        let after: Vec<&TimelineEvent> = merged.iter().filter(|e| !e.is_external()).collect();
        prop_assert_eq!(&after, &before);

        // User events come first; everything imported follows them.
        prop_assert!(merged[..before.len()].iter().all(|e| !e.is_external()));
    }

    /// Property: the imported part is exactly the batch's valid records,
    /// first occurrence per id, in fetched order
    #[test]
    fn prop_imported_part_mirrors_batch(local in arb_local(), batch in arb_batch()) {
        let merged = merge_external_in(&local, &batch, day(), &zone());

        let mut seen = HashSet::new();
        let expected: Vec<String> = batch
            .iter()
            .filter(|record| !record.id.trim().is_empty())
            .filter(|record| seen.insert(record.id.clone()))
            .map(|record| TimelineEvent::external_id_for(&record.id))
            .collect();
        let imported: Vec<String> = merged
            .iter()
            .filter(|e| e.is_external())
            .map(|e| e.id.clone())
            .collect();
        prop_assert_eq!(imported, expected);
    }
}
