// Benchmark for the overlap layout engine
// Measures column assignment on sparse and densely overlapping days

use chrono::NaiveTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use day_journal::models::timeline_event::TimelineEvent;
use day_journal::services::timeline::{assign_columns, layout_events, GridClock};

fn time_of(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// `count` events spread across 06:00-23:00. `stride` controls how far apart
/// consecutive starts are, and so how deeply they overlap.
fn build_day(count: usize, stride: u32, length: u32) -> Vec<TimelineEvent> {
    (0..count)
        .map(|i| {
            let start = 360 + (i as u32 * stride) % 960;
            TimelineEvent::new(format!("local-{}", i), time_of(start), time_of(start + length)).unwrap()
        })
        .collect()
}

fn bench_sparse_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_day");

    for count in [10, 50, 200].iter() {
        let events = build_day(*count, 45, 30);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| assign_columns(black_box(events)));
        });
    }

    group.finish();
}

fn bench_dense_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_day");

    for count in [10, 50, 200].iter() {
        let events = build_day(*count, 5, 120);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| assign_columns(black_box(events)));
        });
    }

    group.finish();
}

fn bench_full_layout(c: &mut Criterion) {
    let clock = GridClock::default();
    let events = build_day(100, 15, 60);

    c.bench_function("layout_events_100", |b| {
        b.iter(|| layout_events(black_box(&events), black_box(&clock)));
    });
}

criterion_group!(benches, bench_sparse_day, bench_dense_day, bench_full_layout);
criterion_main!(benches);
