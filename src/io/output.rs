use crate::core::hierarchy::flatten_leaves;
use crate::core::{Activity, CurvePoint, GlobalStatus, ScheduleReport};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ScheduleReport) -> anyhow::Result<()>;
}

/// Build a writer for the requested format, targeting a file when `output`
/// is given and stdout otherwise. The terminal format always prints to
/// stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    max_rows: usize,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match (format, output) {
        (OutputFormat::Terminal, _) => Box::new(TerminalWriter::new(max_rows)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(File::create(path)?)),
        (OutputFormat::Markdown, None) => {
            Box::new(MarkdownWriter::new(std::io::stdout(), max_rows))
        }
        (OutputFormat::Markdown, Some(path)) => {
            Box::new(MarkdownWriter::new(File::create(path)?, max_rows))
        }
    };
    Ok(writer)
}

/// Curve sample label, a boundary concern: the core carries instants only.
fn format_label(point: &CurvePoint) -> String {
    point.timestamp.format("%d/%m %H:%M").to_string()
}

/// Leaves that need attention: delayed first, then incomplete
/// schedule-critical work, in schedule order.
fn attention_activities(report: &ScheduleReport) -> Vec<Activity> {
    let now = report.generated_at;
    let leaves = flatten_leaves(&report.activities);
    let mut flagged: Vec<Activity> = leaves
        .iter()
        .filter(|a| a.is_delayed(now))
        .cloned()
        .collect();
    flagged.extend(
        leaves
            .iter()
            .filter(|a| a.is_critical && !a.is_completed() && !a.is_delayed(now))
            .cloned(),
    );
    flagged
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
    max_rows: usize,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, max_rows: usize) -> Self {
        Self { writer, max_rows }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_disciplines(report)?;
        self.write_curve(report)?;
        self.write_attention(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Turnmap Schedule Report")?;
        writeln!(self.writer)?;
        if let Some(event) = &report.event {
            writeln!(self.writer, "Event: {}", event.name)?;
        }
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        let stats = &report.stats;
        writeln!(self.writer, "## Executive Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Status | {} |", stats.global_status)?;
        writeln!(self.writer, "| Total activities | {} |", stats.total_tasks)?;
        writeln!(self.writer, "| Completed | {} |", stats.completed_tasks)?;
        writeln!(self.writer, "| In progress | {} |", stats.in_progress_tasks)?;
        writeln!(self.writer, "| Delayed | {} |", stats.delayed_tasks)?;
        writeln!(
            self.writer,
            "| Planned physical | {:.1}% |",
            stats.planned_physical
        )?;
        writeln!(
            self.writer,
            "| Actual physical | {:.1}% |",
            stats.actual_physical
        )?;
        writeln!(self.writer, "| Deviation | {:+.1}% |", stats.deviation)?;
        writeln!(self.writer, "| SPI | {:.2} |", stats.overall_spi)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_disciplines(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        if report.disciplines.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Progress by Discipline")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Discipline | Planned % | Actual % |")?;
        writeln!(self.writer, "|------------|-----------|----------|")?;
        for d in &report.disciplines {
            writeln!(
                self.writer,
                "| {} | {:.1} | {:.1} |",
                d.discipline, d.planned, d.actual
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_curve(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        if report.curve.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## S-Curve")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Time | Planned % | Real % |")?;
        writeln!(self.writer, "|------|-----------|--------|")?;
        for point in &report.curve {
            let real = point
                .real
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.writer,
                "| {} | {:.1} | {} |",
                format_label(point),
                point.planned,
                real
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_attention(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        let flagged = attention_activities(report);
        if flagged.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Needs Attention")?;
        writeln!(self.writer)?;
        for activity in flagged.iter().take(self.max_rows) {
            let tag = if activity.is_delayed(report.generated_at) {
                "delayed"
            } else {
                "critical path"
            };
            writeln!(
                self.writer,
                "- [ ] `{}` {} ({}, {:.0}% done)",
                activity.wbs, activity.name, tag, activity.actual_progress
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter {
    max_rows: usize,
}

impl TerminalWriter {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &ScheduleReport) -> anyhow::Result<()> {
        print_header(report);
        print_summary(report);
        print_disciplines(report);
        print_curve(report);
        print_attention(report, self.max_rows);
        Ok(())
    }
}

fn print_header(report: &ScheduleReport) {
    println!("{}", "Turnmap Schedule Report".bold().blue());
    println!("{}", "=======================".blue());
    if let Some(event) = &report.event {
        println!("Event: {}", event.name.bold());
    }
    println!(
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

fn print_summary(report: &ScheduleReport) {
    let stats = &report.stats;
    println!("{}", "Summary:".bold());
    println!(
        "  Status: {}  (SPI {:.2})",
        status_colored(stats.global_status),
        stats.overall_spi
    );
    println!(
        "  Activities: {} total, {} completed, {} in progress, {} delayed",
        stats.total_tasks, stats.completed_tasks, stats.in_progress_tasks, stats.delayed_tasks
    );
    println!(
        "  Planned physical: {:5.1}%  {}",
        stats.planned_physical,
        progress_bar(stats.planned_physical)
    );
    println!(
        "  Actual physical:  {:5.1}%  {}",
        stats.actual_physical,
        progress_bar(stats.actual_physical)
    );
    println!("  Deviation: {:+.1}%", stats.deviation);
    println!();
}

fn print_disciplines(report: &ScheduleReport) {
    if report.disciplines.is_empty() {
        return;
    }
    println!("{}", "Progress by discipline:".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Discipline", "Planned %", "Actual %"]);
    for d in &report.disciplines {
        table.add_row(vec![
            Cell::new(&d.discipline),
            Cell::new(format!("{:.1}", d.planned)),
            Cell::new(format!("{:.1}", d.actual)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_curve(report: &ScheduleReport) {
    if report.curve.is_empty() {
        return;
    }
    println!("{}", "S-curve:".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Time", "Planned %", "Real %"]);
    for point in &report.curve {
        let real = point
            .real
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(format_label(point)),
            Cell::new(format!("{:.1}", point.planned)),
            Cell::new(real),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_attention(report: &ScheduleReport, max_rows: usize) {
    let flagged = attention_activities(report);
    if flagged.is_empty() {
        println!("{}", "No delayed or at-risk critical activities.".green());
        return;
    }
    println!("{}", "Needs attention:".bold());
    for activity in flagged.iter().take(max_rows) {
        let tag = if activity.is_delayed(report.generated_at) {
            "DELAYED".red().bold()
        } else {
            "CRITICAL".yellow().bold()
        };
        println!(
            "  [{}] {} {} ({:.0}% done, ends {})",
            tag,
            activity.wbs.dimmed(),
            activity.name,
            activity.actual_progress,
            activity.current_end.format("%d/%m %H:%M")
        );
    }
    if flagged.len() > max_rows {
        println!("  ... and {} more", flagged.len() - max_rows);
    }
    println!();
}

fn status_colored(status: GlobalStatus) -> ColoredString {
    match status {
        GlobalStatus::OnTrack => status.label().green().bold(),
        GlobalStatus::AtRisk => status.label().yellow().bold(),
        GlobalStatus::Critical => status.label().red().bold(),
    }
}

fn progress_bar(percent: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percent / 100.0 * WIDTH as f64).round() as usize).min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProjectStats, ScheduleReport};
    use chrono::TimeZone;

    fn sample_report() -> ScheduleReport {
        let now = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut delayed = Activity::new("A1", "Open exchanger");
        delayed.current_end = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
        delayed.actual_progress = 40.0;
        ScheduleReport {
            schedule_path: "shutdown.json".into(),
            generated_at: now,
            event: None,
            stats: ProjectStats::empty(),
            disciplines: vec![],
            curve: vec![],
            activities: vec![delayed],
        }
    }

    #[test]
    fn test_json_writer_round_trips() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["stats"]["global_status"], "On Track");
        assert_eq!(parsed["activities"][0]["wbs"], "A1");
    }

    #[test]
    fn test_markdown_writer_lists_delayed_activity() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer, 10)
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Turnmap Schedule Report"));
        assert!(text.contains("- [ ] `A1` Open exchanger (delayed, 40% done)"));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(150.0), format!("[{}]", "#".repeat(20)));
    }
}
