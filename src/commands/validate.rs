use crate::cli;
use crate::config::{self, TurnmapConfig, ValidateThresholds};
use crate::core::{GlobalStatus, ProjectStats};
use crate::formatting::FormattingConfig;
use crate::io;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use std::path::PathBuf;

pub struct ValidateConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub min_spi: Option<f64>,
    pub max_delayed: Option<usize>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
    pub plain: bool,
}

/// Gate a schedule against progress thresholds, exiting non-zero on any
/// breach. Meant for CI-style checks on exported schedules.
pub fn validate_schedule(config: ValidateConfig) -> Result<()> {
    let formatting = if config.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    formatting.apply();

    let loaded: TurnmapConfig = match &config.config {
        Some(path) => TurnmapConfig::load_from(path)?,
        None => config::get_config().clone(),
    };
    let thresholds = merge_thresholds(&loaded.validate, config.min_spi, config.max_delayed);

    let now = config.now.unwrap_or_else(Utc::now);
    let report = super::analyze::build_report(&config.path, now)?;

    if let Some(format) = config.format {
        let max_rows = loaded.display.max_table_rows;
        let mut writer =
            io::output::create_writer(format.into(), config.output.as_deref(), max_rows)?;
        writer.write_report(&report)?;
    }

    let failures = collect_failures(&report.stats, &thresholds);
    if failures.is_empty() {
        println!(
            "{} {} meets all thresholds (SPI {:.2}, {} delayed)",
            "PASS".green().bold(),
            config.path.display(),
            report.stats.overall_spi,
            report.stats.delayed_tasks
        );
        Ok(())
    } else {
        println!("{} {}", "FAIL".red().bold(), config.path.display());
        for failure in &failures {
            println!("  - {failure}");
        }
        anyhow::bail!("schedule failed validation with {} violation(s)", failures.len())
    }
}

fn merge_thresholds(
    base: &ValidateThresholds,
    min_spi: Option<f64>,
    max_delayed: Option<usize>,
) -> ValidateThresholds {
    ValidateThresholds {
        min_spi: min_spi.unwrap_or(base.min_spi),
        max_delayed_tasks: max_delayed.or(base.max_delayed_tasks),
        require_on_track: base.require_on_track,
    }
}

/// Pure threshold check, one message per violated gate.
fn collect_failures(stats: &ProjectStats, thresholds: &ValidateThresholds) -> Vec<String> {
    let mut failures = Vec::new();

    if stats.overall_spi < thresholds.min_spi {
        failures.push(format!(
            "overall SPI {:.2} is below the minimum {:.2}",
            stats.overall_spi, thresholds.min_spi
        ));
    }

    if let Some(max_delayed) = thresholds.max_delayed_tasks {
        if stats.delayed_tasks > max_delayed {
            failures.push(format!(
                "{} delayed activities exceed the allowed {max_delayed}",
                stats.delayed_tasks
            ));
        }
    }

    if thresholds.require_on_track && stats.global_status != GlobalStatus::OnTrack {
        failures.push(format!(
            "global status is {} but On Track is required",
            stats.global_status
        ));
    }

    failures
}
