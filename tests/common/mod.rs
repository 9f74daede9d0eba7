// Test utility module for turnmap integration tests
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use turnmap::Activity;

/// Parse a fixture timestamp, panicking on typos in the test itself.
pub fn ts(raw: &str) -> DateTime<Utc> {
    turnmap::parse_instant(raw).expect("valid fixture timestamp")
}

/// A leaf activity with the given weight and progress, scheduled over a
/// default 2024-06-01 working window.
pub fn leaf(id: &str, duration: f64, planned: f64, actual: f64) -> Activity {
    let mut activity = Activity::new(id, id);
    activity.duration_hours = duration;
    activity.planned_progress = planned;
    activity.actual_progress = actual;
    activity.planned_start = ts("2024-06-01T00:00:00Z");
    activity.planned_end = ts("2024-06-01T10:00:00Z");
    activity.current_start = activity.planned_start;
    activity.current_end = activity.planned_end;
    activity
}

/// A leaf with an explicit forecast window.
pub fn scheduled(id: &str, duration: f64, start: &str, end: &str) -> Activity {
    let mut activity = leaf(id, duration, 0.0, 0.0);
    activity.current_start = ts(start);
    activity.current_end = ts(end);
    activity.planned_start = activity.current_start;
    activity.planned_end = activity.current_end;
    activity
}

/// A group container node.
pub fn group(id: &str) -> Activity {
    let mut activity = Activity::new(id, id);
    activity.duration_hours = 0.0;
    activity.is_group = true;
    activity
}
