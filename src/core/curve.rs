//! S-curve generation: planned vs. real cumulative progress over time.

use crate::core::{round1, Activity, CurvePoint};
use crate::core::metrics::activity_weight;
use chrono::{DateTime, Utc};

/// Number of samples across the project span.
pub const CURVE_SAMPLES: usize = 20;

/// Sample the project timeline into a planned and a real cumulative
/// progress series.
///
/// Only activities with a positive duration participate; group containers
/// self-exclude. The planned series is a pure function of the forecast
/// schedule. The real series is reconstructed by assuming each activity
/// progressed at constant productivity from its start until `now` — an
/// explicit approximation, since no progress history is retained. It will
/// misrepresent bursty or non-monotonic progress; samples after `now`
/// carry no real value at all.
///
/// Returns an empty series for an empty input or a zero-length span.
pub fn generate_curve(activities: &[Activity], now: DateTime<Utc>) -> Vec<CurvePoint> {
    let active: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.duration_hours > 0.0)
        .collect();
    if active.is_empty() {
        return Vec::new();
    }

    let min_start = active
        .iter()
        .map(|a| a.current_start.timestamp_millis())
        .min()
        .unwrap_or(0);
    let max_end = active
        .iter()
        .map(|a| a.current_end.timestamp_millis())
        .max()
        .unwrap_or(0);
    let span = max_end - min_start;
    if span <= 0 {
        return Vec::new();
    }

    let step = span as f64 / (CURVE_SAMPLES - 1) as f64;
    let total_weight: f64 = active
        .iter()
        .map(|a| activity_weight(a.duration_hours))
        .sum();
    let now_ms = now.timestamp_millis();

    (0..CURVE_SAMPLES)
        .map(|idx| {
            // Round so the last sample lands exactly on max_end.
            let sample_ms = min_start + (step * idx as f64).round() as i64;
            sample_point(&active, total_weight, sample_ms, now_ms)
        })
        .collect()
}

fn sample_point(
    active: &[&Activity],
    total_weight: f64,
    sample_ms: i64,
    now_ms: i64,
) -> CurvePoint {
    let mut planned_acc = 0.0;
    let mut real_acc = 0.0;

    for activity in active {
        let weight = activity_weight(activity.duration_hours) / total_weight;
        let start_ms = activity.current_start.timestamp_millis();
        let end_ms = activity.current_end.timestamp_millis();

        planned_acc += planned_contribution(sample_ms, start_ms, end_ms) * weight;

        if sample_ms <= now_ms {
            real_acc += real_contribution(
                activity.actual_progress,
                sample_ms,
                start_ms,
                now_ms,
            ) * weight;
        }
    }

    CurvePoint {
        timestamp: DateTime::<Utc>::from_timestamp_millis(sample_ms).unwrap_or(DateTime::UNIX_EPOCH),
        planned: round1(planned_acc),
        real: (sample_ms <= now_ms).then(|| round1(real_acc)),
    }
}

/// Planned percent complete of one activity at a point in time: 100 past
/// its end, 0 at or before its start, linear in between.
fn planned_contribution(sample_ms: i64, start_ms: i64, end_ms: i64) -> f64 {
    let duration = end_ms - start_ms;
    if sample_ms >= end_ms {
        100.0
    } else if sample_ms > start_ms && duration > 0 {
        (sample_ms - start_ms) as f64 / duration as f64 * 100.0
    } else {
        0.0
    }
}

/// Estimated real percent complete of one activity at a historical point,
/// back-projected at constant productivity from its start to `now` and
/// clamped to the currently reported progress. At `now` itself the
/// reported progress is used directly.
fn real_contribution(actual_progress: f64, sample_ms: i64, start_ms: i64, now_ms: i64) -> f64 {
    if sample_ms >= now_ms {
        actual_progress
    } else if sample_ms > start_ms {
        // Elapsed time floored at 1ms so a task starting at `now` still
        // yields a finite rate.
        let rate = actual_progress / (now_ms - start_ms).max(1) as f64;
        let estimate = (rate * (sample_ms - start_ms) as f64).round();
        estimate.min(actual_progress)
    } else {
        0.0
    }
}
