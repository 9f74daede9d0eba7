use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use turnmap::{compute_stats, generate_curve, Activity};

fn synthetic_schedule(count: usize) -> Vec<Activity> {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let mut activity = Activity::new(format!("ACT-{i}"), format!("Activity {i}"));
            activity.duration_hours = (i % 24 + 1) as f64;
            activity.current_start = base + Duration::hours((i % 48) as i64);
            activity.current_end =
                activity.current_start + Duration::hours(activity.duration_hours as i64);
            activity.planned_start = activity.current_start;
            activity.planned_end = activity.current_end;
            activity.planned_progress = (i % 101) as f64;
            activity.actual_progress = ((i * 7) % 101) as f64;
            activity
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let activities = synthetic_schedule(500);
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();

    c.bench_function("generate_curve_500", |b| {
        b.iter(|| generate_curve(black_box(&activities), black_box(now)))
    });

    c.bench_function("compute_stats_500", |b| {
        b.iter(|| compute_stats(black_box(&activities), black_box(now)))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
