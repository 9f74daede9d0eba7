//! Duration-weighted progress aggregation.

use crate::core::{classify_status, round1, round2, Activity, DisciplineProgress, ProjectStats};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Aggregation weight for one activity.
///
/// An activity with an unknown duration (missing, zero, negative, or
/// non-finite) still counts as one unit so it never drops out of the
/// denominator; a known duration is used as-is.
pub fn activity_weight(duration_hours: f64) -> f64 {
    if duration_hours.is_finite() && duration_hours > 0.0 {
        duration_hours
    } else {
        1.0
    }
}

/// Roll up a flat activity list into project-level stats.
///
/// Callers pass the leaf list (group containers already excluded, see
/// `hierarchy::flatten_leaves`); every record in the slice counts once.
/// Deterministic for a fixed `now`, never fails, does not mutate input.
pub fn compute_stats(activities: &[Activity], now: DateTime<Utc>) -> ProjectStats {
    if activities.is_empty() {
        return ProjectStats::empty();
    }

    let completed = activities.iter().filter(|a| a.is_completed()).count();
    let in_progress = activities
        .iter()
        .filter(|a| a.actual_progress > 0.0 && a.actual_progress < 100.0)
        .count();
    let delayed = activities.iter().filter(|a| a.is_delayed(now)).count();

    let (planned_physical, actual_physical) = weighted_physicals(activities);

    // A zero planned baseline would divide by zero; substituting 1 makes
    // the early-event SPI equal the actual physical progress.
    let spi = actual_physical
        / if planned_physical == 0.0 {
            1.0
        } else {
            planned_physical
        };

    ProjectStats {
        total_tasks: activities.len(),
        completed_tasks: completed,
        in_progress_tasks: in_progress,
        delayed_tasks: delayed,
        planned_physical: round1(planned_physical),
        actual_physical: round1(actual_physical),
        deviation: round1(actual_physical - planned_physical),
        overall_spi: round2(spi),
        global_status: classify_status(spi),
    }
}

/// Weighted planned/actual progress per discipline label, sorted by label.
///
/// Weights are normalized within each discipline, so a discipline's pair
/// reads as its own percent complete rather than a share of the project.
pub fn discipline_breakdown(activities: &[Activity]) -> Vec<DisciplineProgress> {
    let mut groups: HashMap<&str, Vec<&Activity>> = HashMap::new();
    for activity in activities {
        groups
            .entry(activity.discipline.as_str())
            .or_default()
            .push(activity);
    }

    let mut breakdown: Vec<DisciplineProgress> = groups
        .into_iter()
        .map(|(discipline, members)| {
            let (planned, actual) = weighted_physicals_ref(&members);
            DisciplineProgress {
                discipline: discipline.to_string(),
                planned: round1(planned),
                actual: round1(actual),
            }
        })
        .collect();

    breakdown.sort_by(|a, b| a.discipline.cmp(&b.discipline));
    breakdown
}

fn weighted_physicals(activities: &[Activity]) -> (f64, f64) {
    let refs: Vec<&Activity> = activities.iter().collect();
    weighted_physicals_ref(&refs)
}

// Sum the weighted contributions first and divide once: for integral
// progress and duration values the accumulation is exact, which keeps
// the means invariant under input permutation.
fn weighted_physicals_ref(activities: &[&Activity]) -> (f64, f64) {
    let total_weight: f64 = activities
        .iter()
        .map(|a| activity_weight(a.duration_hours))
        .sum();
    if total_weight <= 0.0 {
        return (0.0, 0.0);
    }

    let (planned_sum, actual_sum) = activities.iter().fold((0.0, 0.0), |(plan, act), a| {
        let weight = activity_weight(a.duration_hours);
        (
            plan + a.planned_progress * weight,
            act + a.actual_progress * weight,
        )
    });

    (planned_sum / total_weight, actual_sum / total_weight)
}
