//! Normalization of raw import records into well-formed activities.
//!
//! Import pipelines deliver best-effort rows; this pass is the single
//! place where missing or malformed fields are defaulted, so the rest of
//! the engine can assume clean data and tests can target the defaulting
//! directly. It never rejects a record.

use crate::core::{Activity, EventInfo, RawActivity};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Duration assumed for an activity whose end date and duration are both
/// missing, matching the historical import behavior.
pub const DEFAULT_DURATION_HOURS: f64 = 8.0;

/// Placeholder for records imported without a name.
pub const UNTITLED_ACTIVITY: &str = "Untitled Activity";

/// Normalize a batch of raw records. `now` is the injected wall clock used
/// for date placeholders and planned-progress backfill.
pub fn normalize_activities(raw: Vec<RawActivity>, now: DateTime<Utc>) -> Vec<Activity> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| normalize_activity(record, index, now))
        .collect()
}

fn normalize_activity(raw: RawActivity, index: usize, now: DateTime<Utc>) -> Activity {
    let name = non_blank(raw.name).unwrap_or_else(|| UNTITLED_ACTIVITY.to_string());
    let wbs = non_blank(raw.wbs).unwrap_or_else(|| (index + 1).to_string());
    let id = non_blank(raw.id).unwrap_or_else(|| format!("ACT-{wbs}"));

    let planned_start = raw
        .planned_start
        .as_deref()
        .and_then(parse_instant)
        .unwrap_or(now);
    let fallback_span = hours(raw.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS));
    let planned_end = raw
        .planned_end
        .as_deref()
        .and_then(parse_instant)
        .unwrap_or(planned_start + fallback_span);

    let current_start = raw
        .current_start
        .as_deref()
        .and_then(parse_instant)
        .unwrap_or(planned_start);
    let current_end = raw
        .current_end
        .as_deref()
        .and_then(parse_instant)
        .unwrap_or(planned_end);

    let duration_hours = match raw.duration_hours {
        Some(d) if d.is_finite() && d >= 0.0 => d,
        // A present-but-broken duration still counts as a unit of work.
        Some(_) => 1.0,
        None => derive_duration_hours(planned_start, planned_end),
    };

    let is_group = raw.is_group || duration_hours == 0.0;

    let actual_progress = clamp_progress(raw.actual_progress.unwrap_or(0.0));
    let planned_progress = match raw.planned_progress {
        Some(p) => clamp_progress(p),
        None => backfill_planned_progress(current_start, current_end, now),
    };

    Activity {
        id,
        wbs,
        name,
        discipline: non_blank(raw.discipline).unwrap_or_else(|| "General".to_string()),
        area: non_blank(raw.area).unwrap_or_else(|| "General".to_string()),
        responsible: non_blank(raw.responsible),
        duration_hours: if is_group { 0.0 } else { duration_hours },
        planned_start,
        planned_end,
        current_start,
        current_end,
        planned_progress,
        actual_progress,
        is_critical: raw.is_critical,
        is_group,
        parent_id: non_blank(raw.parent_id),
        children: Vec::new(),
    }
}

/// Normalize the optional schedule-file event header.
pub fn normalize_event(
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
    cutline_hours: Option<f64>,
) -> EventInfo {
    EventInfo {
        name: non_blank(name).unwrap_or_else(|| "Untitled Event".to_string()),
        start: start.as_deref().and_then(parse_instant),
        end: end.as_deref().and_then(parse_instant),
        cutline_hours: cutline_hours.filter(|h| h.is_finite() && *h >= 0.0),
    }
}

/// Parse an instant leniently: RFC 3339, `T`- or space-separated naive
/// datetimes (with or without seconds), and bare dates at midnight UTC.
/// Anything else is `None` and the caller falls back to a placeholder.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Planned progress inferred from the schedule when the import did not
/// carry one: complete past the end, untouched before the start, rounded
/// linear elapsed fraction in between.
fn backfill_planned_progress(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    if now > end {
        100.0
    } else if now > start {
        let span = (end - start).num_milliseconds();
        if span > 0 {
            let elapsed = (now - start).num_milliseconds();
            (elapsed as f64 / span as f64 * 100.0).round()
        } else {
            0.0
        }
    } else {
        0.0
    }
}

fn derive_duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span_hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
    span_hours.round().max(0.0)
}

fn clamp_progress(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn hours(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::milliseconds((value * 3_600_000.0) as i64)
    } else {
        Duration::hours(DEFAULT_DURATION_HOURS as i64)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
