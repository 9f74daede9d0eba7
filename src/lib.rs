// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    classify_status, Activity, CurvePoint, DisciplineProgress, EventInfo, GlobalStatus,
    ProjectStats, RawActivity, ScheduleReport, AT_RISK_SPI, CRITICAL_SPI,
};

pub use crate::core::curve::{generate_curve, CURVE_SAMPLES};
pub use crate::core::hierarchy::{build_hierarchy, count_nodes, flatten_leaves};
pub use crate::core::metrics::{activity_weight, compute_stats, discipline_breakdown};
pub use crate::core::sanitize::{
    normalize_activities, parse_instant, DEFAULT_DURATION_HOURS, UNTITLED_ACTIVITY,
};

pub use crate::io::input::{load_schedule, ScheduleError};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
