//! Schedule file loading.
//!
//! The schedule is a JSON document produced by an upstream export or
//! extraction pipeline: either an object with an `event` header and an
//! `activities` array, or a bare array of activity records. Records are
//! deserialized loosely ([`RawActivity`]); defaulting happens later in
//! `core::sanitize`.

use crate::core::sanitize::normalize_event;
use crate::core::{EventInfo, RawActivity};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schedule file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw event header as it appears in the schedule file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "data_inicio")]
    pub start: Option<String>,
    #[serde(default, alias = "data_fim")]
    pub end: Option<String>,
    #[serde(default, alias = "linha_corte_horas")]
    pub cutline_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScheduleFile {
    Wrapped {
        #[serde(default)]
        event: Option<RawEvent>,
        activities: Vec<RawActivity>,
    },
    Bare(Vec<RawActivity>),
}

impl ScheduleFile {
    fn into_parts(self) -> (Option<RawEvent>, Vec<RawActivity>) {
        match self {
            ScheduleFile::Wrapped { event, activities } => (event, activities),
            ScheduleFile::Bare(activities) => (None, activities),
        }
    }
}

/// Read and deserialize a schedule file. An empty activity list is valid
/// degenerate input, not an error.
pub fn load_schedule(path: &Path) -> Result<(Option<EventInfo>, Vec<RawActivity>), ScheduleError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScheduleError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: ScheduleFile =
        serde_json::from_str(&content).map_err(|source| ScheduleError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let (raw_event, activities) = file.into_parts();
    log::debug!(
        "loaded {} activity records from {}",
        activities.len(),
        path.display()
    );

    let event = raw_event.map(|e| normalize_event(e.name, e.start, e.end, e.cutline_hours));
    Ok((event, activities))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_parses() {
        let json = r#"[{"name": "Cooldown", "duration_hours": 12}]"#;
        let file: ScheduleFile = serde_json::from_str(json).unwrap();
        let (event, activities) = file.into_parts();
        assert!(event.is_none());
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name.as_deref(), Some("Cooldown"));
    }

    #[test]
    fn test_wrapped_document_parses() {
        let json = r#"{
            "event": {"name": "TA-2024", "cutline_hours": 72},
            "activities": [{"atividade": "Abrir flange", "duracao": 4}]
        }"#;
        let file: ScheduleFile = serde_json::from_str(json).unwrap();
        let (event, activities) = file.into_parts();
        assert_eq!(event.unwrap().name.as_deref(), Some("TA-2024"));
        assert_eq!(activities[0].name.as_deref(), Some("Abrir flange"));
        assert_eq!(activities[0].duration_hours, Some(4.0));
    }
}
