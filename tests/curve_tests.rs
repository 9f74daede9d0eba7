mod common;

use common::{group, scheduled, ts};
use pretty_assertions::assert_eq;
use turnmap::{generate_curve, CURVE_SAMPLES};

#[test]
fn test_empty_input_yields_empty_curve() {
    assert!(generate_curve(&[], ts("2024-06-01T05:00:00Z")).is_empty());
}

#[test]
fn test_groups_alone_yield_empty_curve() {
    let containers = vec![group("g1"), group("g2")];
    assert!(generate_curve(&containers, ts("2024-06-01T05:00:00Z")).is_empty());
}

#[test]
fn test_zero_span_yields_empty_curve() {
    let a = scheduled("a", 4.0, "2024-06-01T06:00:00Z", "2024-06-01T06:00:00Z");
    assert!(generate_curve(&[a], ts("2024-06-01T08:00:00Z")).is_empty());
}

#[test]
fn test_curve_has_fixed_sample_count() {
    let a = scheduled("a", 10.0, "2024-06-01T00:00:00Z", "2024-06-01T10:00:00Z");
    let curve = generate_curve(&[a], ts("2024-06-01T05:00:00Z"));
    assert_eq!(curve.len(), CURVE_SAMPLES);
}

#[test]
fn test_final_sample_real_matches_reported_progress() {
    // Single 10h activity at 50% actual, evaluated exactly at its end:
    // the last sample coincides with `now` and reports 50 exactly.
    let mut a = scheduled("a", 10.0, "2024-06-01T00:00:00Z", "2024-06-01T10:00:00Z");
    a.actual_progress = 50.0;
    let curve = generate_curve(&[a], ts("2024-06-01T10:00:00Z"));

    let last = curve.last().unwrap();
    assert_eq!(last.timestamp, ts("2024-06-01T10:00:00Z"));
    assert_eq!(last.planned, 100.0);
    assert_eq!(last.real, Some(50.0));
}

#[test]
fn test_future_samples_have_no_real_value() {
    let mut a = scheduled("a", 10.0, "2024-06-01T00:00:00Z", "2024-06-01T10:00:00Z");
    a.actual_progress = 30.0;
    let now = ts("2024-06-01T04:00:00Z");
    let curve = generate_curve(&[a], now);

    for point in &curve {
        assert_eq!(point.real.is_none(), point.timestamp > now);
    }
    assert!(curve.iter().any(|p| p.real.is_some()));
    assert!(curve.iter().any(|p| p.real.is_none()));
}

#[test]
fn test_planned_series_spans_zero_to_hundred() {
    let a = scheduled("a", 10.0, "2024-06-01T00:00:00Z", "2024-06-01T10:00:00Z");
    let curve = generate_curve(&[a], ts("2024-06-01T10:00:00Z"));
    assert_eq!(curve.first().unwrap().planned, 0.0);
    assert_eq!(curve.last().unwrap().planned, 100.0);
    for pair in curve.windows(2) {
        assert!(pair[1].planned >= pair[0].planned);
    }
}

#[test]
fn test_short_activity_is_complete_midway_through_span() {
    // 5h task inside a 10h window shared with a second task: planned
    // contribution saturates at its own end, not the project end.
    let early = scheduled("early", 5.0, "2024-06-01T00:00:00Z", "2024-06-01T05:00:00Z");
    let late = scheduled("late", 5.0, "2024-06-01T05:00:00Z", "2024-06-01T10:00:00Z");
    let curve = generate_curve(&[early, late], ts("2024-06-01T10:00:00Z"));

    // Midpoint of the overall span: the early task is fully planned-done,
    // the late one has not started. Equal weights give 50.0.
    let midpoint = curve
        .iter()
        .find(|p| p.timestamp == ts("2024-06-01T05:00:00Z"));
    if let Some(point) = midpoint {
        assert_eq!(point.planned, 50.0);
    }
    // The 20-sample grid over 10h lands on 05:00 only if 19 divides the
    // span; assert the neighborhood instead of requiring an exact hit.
    let near = curve
        .iter()
        .filter(|p| {
            (p.timestamp - ts("2024-06-01T05:00:00Z"))
                .num_minutes()
                .abs()
                <= 16
        })
        .count();
    assert!(near >= 1);
}

#[test]
fn test_back_projection_never_exceeds_reported_progress() {
    let mut a = scheduled("a", 8.0, "2024-06-01T00:00:00Z", "2024-06-01T08:00:00Z");
    a.actual_progress = 60.0;
    let curve = generate_curve(&[a], ts("2024-06-01T04:00:00Z"));
    for point in &curve {
        if let Some(real) = point.real {
            assert!(real <= 60.0);
        }
    }
}

#[test]
fn test_identical_inputs_produce_identical_curves() {
    let mut a = scheduled("a", 12.0, "2024-06-01T00:00:00Z", "2024-06-01T12:00:00Z");
    a.actual_progress = 35.0;
    a.planned_progress = 40.0;
    let now = ts("2024-06-01T07:00:00Z");
    assert_eq!(generate_curve(&[a.clone()], now), generate_curve(&[a], now));
}
