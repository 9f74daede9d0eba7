use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "turnmap")]
#[command(about = "Shutdown/turnaround schedule progress analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a schedule and report progress KPIs and the S-curve
    Analyze {
        /// Path to the schedule JSON file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only the top N activities in listings
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Evaluation instant, RFC 3339 (defaults to the current time)
        #[arg(long = "now")]
        now: Option<String>,

        /// Plain output (no colors)
        #[arg(long = "plain")]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a schedule against progress thresholds
    Validate {
        /// Path to the schedule JSON file
        path: PathBuf,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum acceptable overall SPI (overrides config)
        #[arg(long = "min-spi")]
        min_spi: Option<f64>,

        /// Maximum acceptable delayed-task count (overrides config)
        #[arg(long = "max-delayed")]
        max_delayed: Option<usize>,

        /// Also write the full report in this format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file for the report (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluation instant, RFC 3339 (defaults to the current time)
        #[arg(long = "now")]
        now: Option<String>,

        /// Plain output (no colors)
        #[arg(long = "plain")]
        plain: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Markdown),
            crate::io::output::OutputFormat::Markdown
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }

    #[test]
    fn test_cli_parsing_analyze_command() {
        let args = vec![
            "turnmap",
            "analyze",
            "shutdown.json",
            "--format",
            "json",
            "--now",
            "2024-06-01T12:00:00Z",
            "--top",
            "5",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Analyze {
                path,
                format,
                top,
                now,
                ..
            } => {
                assert_eq!(path, PathBuf::from("shutdown.json"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(top, Some(5));
                assert_eq!(now.as_deref(), Some("2024-06-01T12:00:00Z"));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(vec!["turnmap", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let args = vec![
            "turnmap",
            "validate",
            "shutdown.json",
            "--min-spi",
            "0.95",
            "--max-delayed",
            "2",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Validate {
                path,
                min_spi,
                max_delayed,
                ..
            } => {
                assert_eq!(path, PathBuf::from("shutdown.json"));
                assert_eq!(min_spi, Some(0.95));
                assert_eq!(max_delayed, Some(2));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_verbosity_flag() {
        let cli = Cli::parse_from(vec!["turnmap", "analyze", "shutdown.json", "-vv"]);
        assert_eq!(cli.verbosity, 2);
    }
}
