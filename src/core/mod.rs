//! Common type definitions used across the codebase

pub mod curve;
pub mod hierarchy;
pub mod metrics;
pub mod sanitize;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use status::{classify_status, GlobalStatus, AT_RISK_SPI, CRITICAL_SPI};

/// A single schedule activity after normalization.
///
/// `children` is populated only by [`hierarchy::build_hierarchy`]; the flat
/// representation carries the link through `parent_id` instead. Groups
/// (`is_group`) are display containers and carry no weight of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub wbs: String,
    pub name: String,
    pub discipline: String,
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    pub duration_hours: f64,
    pub planned_start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub current_start: DateTime<Utc>,
    pub current_end: DateTime<Utc>,
    pub planned_progress: f64,
    pub actual_progress: f64,
    pub is_critical: bool,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Activity>,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            wbs: id.clone(),
            id,
            name: name.into(),
            discipline: "General".to_string(),
            area: "General".to_string(),
            responsible: None,
            duration_hours: 1.0,
            planned_start: DateTime::UNIX_EPOCH,
            planned_end: DateTime::UNIX_EPOCH,
            current_start: DateTime::UNIX_EPOCH,
            current_end: DateTime::UNIX_EPOCH,
            planned_progress: 0.0,
            actual_progress: 0.0,
            is_critical: false,
            is_group: false,
            parent_id: None,
            children: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.actual_progress >= 100.0
    }

    /// Behind schedule: past its forecast end without reaching 100%.
    pub fn is_delayed(&self, now: DateTime<Utc>) -> bool {
        now > self.current_end && self.actual_progress < 100.0
    }
}

/// A schedule activity as it appears on the wire, before normalization.
///
/// Every field is optional so a partially extracted import batch never
/// fails to deserialize; [`sanitize::normalize_activities`] turns these
/// into well-formed [`Activity`] values. The serde aliases accept the
/// column-name variants the import pipeline historically mapped.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawActivity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub wbs: Option<String>,
    #[serde(default, alias = "task", alias = "atividade")]
    pub name: Option<String>,
    #[serde(default, alias = "disciplina")]
    pub discipline: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default, alias = "responsavel")]
    pub responsible: Option<String>,
    #[serde(default, alias = "duration", alias = "duracao")]
    pub duration_hours: Option<f64>,
    #[serde(default, alias = "start", alias = "inicio_previsto")]
    pub planned_start: Option<String>,
    #[serde(default, alias = "finish", alias = "fim_previsto")]
    pub planned_end: Option<String>,
    #[serde(default)]
    pub current_start: Option<String>,
    #[serde(default)]
    pub current_end: Option<String>,
    #[serde(default, alias = "percentual_planejado")]
    pub planned_progress: Option<f64>,
    #[serde(default, alias = "percentual_real")]
    pub actual_progress: Option<f64>,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, alias = "atividade_pai_id")]
    pub parent_id: Option<String>,
}

/// Project-level KPIs rolled up from a flat activity list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub delayed_tasks: usize,
    /// Weighted mean of planned progress, percent, one decimal.
    pub planned_physical: f64,
    /// Weighted mean of actual progress, percent, one decimal.
    pub actual_physical: f64,
    /// `actual_physical - planned_physical`, one decimal.
    pub deviation: f64,
    /// Schedule performance index, two decimals.
    pub overall_spi: f64,
    pub global_status: GlobalStatus,
}

impl ProjectStats {
    /// Baseline stats for an empty schedule. Not a failure state.
    pub fn empty() -> Self {
        Self {
            total_tasks: 0,
            completed_tasks: 0,
            in_progress_tasks: 0,
            delayed_tasks: 0,
            planned_physical: 0.0,
            actual_physical: 0.0,
            deviation: 0.0,
            overall_spi: 0.0,
            global_status: GlobalStatus::OnTrack,
        }
    }
}

/// One sample of the S-curve.
///
/// `real` is `None` for samples after the evaluation instant: "no data
/// yet" is distinct from "zero progress" and the real curve never
/// projects into the future.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub timestamp: DateTime<Utc>,
    pub planned: f64,
    pub real: Option<f64>,
}

/// Weighted progress rollup for a single discipline label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisciplineProgress {
    pub discipline: String,
    pub planned: f64,
    pub actual: f64,
}

/// Optional schedule-file header describing the shutdown event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutline_hours: Option<f64>,
}

/// Full analysis output for one schedule file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub schedule_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInfo>,
    pub stats: ProjectStats,
    pub disciplines: Vec<DisciplineProgress>,
    pub curve: Vec<CurvePoint>,
    pub activities: Vec<Activity>,
}

/// Round to one decimal place for percent reporting.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places for index reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
