use crate::cli;
use crate::config;
use crate::core::curve::generate_curve;
use crate::core::hierarchy::{build_hierarchy, count_nodes, flatten_leaves};
use crate::core::metrics::{compute_stats, discipline_breakdown};
use crate::core::sanitize::normalize_activities;
use crate::core::ScheduleReport;
use crate::formatting::FormattingConfig;
use crate::io;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub now: Option<DateTime<Utc>>,
    pub plain: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let formatting = if config.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    formatting.apply();

    // The wall clock is read exactly once here; the engine itself only
    // ever sees the injected instant.
    let now = config.now.unwrap_or_else(Utc::now);
    let report = build_report(&config.path, now)?;

    let max_rows = config
        .top
        .unwrap_or(config::get_config().display.max_table_rows);
    let mut writer = io::output::create_writer(config.format.into(), config.output.as_deref(), max_rows)?;
    writer.write_report(&report)?;

    if let Some(output) = &config.output {
        log::info!("report written to {}", output.display());
    }
    Ok(())
}

/// Shared analysis pipeline: load, normalize, structure, aggregate.
pub(crate) fn build_report(path: &Path, now: DateTime<Utc>) -> Result<ScheduleReport> {
    let (event, raw_activities) = io::input::load_schedule(path)
        .with_context(|| format!("failed to load schedule from {}", path.display()))?;

    let activities = normalize_activities(raw_activities, now);
    let forest = build_hierarchy(activities);
    let leaves = flatten_leaves(&forest);
    log::info!(
        "analyzing {} activities ({} leaves) from {}",
        count_nodes(&forest),
        leaves.len(),
        path.display()
    );

    Ok(ScheduleReport {
        schedule_path: path.to_path_buf(),
        generated_at: now,
        event,
        stats: compute_stats(&leaves, now),
        disciplines: discipline_breakdown(&leaves),
        curve: generate_curve(&leaves, now),
        activities: forest,
    })
}
