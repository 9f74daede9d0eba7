use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use turnmap::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            top,
            now,
            plain,
        } => {
            let config = turnmap::commands::analyze::AnalyzeConfig {
                path,
                format,
                output,
                top,
                now: parse_now(now)?,
                plain,
            };
            turnmap::commands::analyze::handle_analyze(config)
        }
        Commands::Init { force } => turnmap::commands::init::init_config(force),
        Commands::Validate {
            path,
            config,
            min_spi,
            max_delayed,
            format,
            output,
            now,
            plain,
        } => {
            let validate_config = turnmap::commands::validate::ValidateConfig {
                path,
                config,
                min_spi,
                max_delayed,
                format,
                output,
                now: parse_now(now)?,
                plain,
            };
            turnmap::commands::validate::validate_schedule(validate_config)
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

// The one place the evaluation clock is resolved; everything downstream
// receives the instant as a parameter.
fn parse_now(raw: Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(&value)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("--now must be an RFC 3339 instant, got {value:?}"))
    })
    .transpose()
}
