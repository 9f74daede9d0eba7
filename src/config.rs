//! `.turnmap.toml` configuration.
//!
//! The SPI status tiers are fixed design constants (`core::status`), not
//! configuration: everyone reading a turnmap report should agree on what
//! "Critical" means. The `[validate]` section instead holds the CI-gate
//! thresholds the `validate` subcommand enforces.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnmapConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub validate: ValidateThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when the CLI does not specify one
    #[serde(default = "default_format")]
    pub default_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum rows shown in terminal/markdown activity listings
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateThresholds {
    /// Minimum acceptable overall SPI
    #[serde(default = "default_min_spi")]
    pub min_spi: f64,

    /// Maximum acceptable delayed-task count, unlimited when absent
    #[serde(default)]
    pub max_delayed_tasks: Option<usize>,

    /// Fail validation on any status other than "On Track"
    #[serde(default)]
    pub require_on_track: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_table_rows: default_max_table_rows(),
        }
    }
}

impl Default for ValidateThresholds {
    fn default() -> Self {
        Self {
            min_spi: default_min_spi(),
            max_delayed_tasks: None,
            require_on_track: false,
        }
    }
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_max_table_rows() -> usize {
    10
}

fn default_min_spi() -> f64 {
    crate::core::CRITICAL_SPI
}

impl TurnmapConfig {
    /// Load from an explicit path; the file must exist and parse.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = crate::io::read_file(path)?;
        let config: TurnmapConfig = toml::from_str(&content)?;
        config
            .validate_values()
            .map_err(|msg| anyhow::anyhow!("invalid configuration in {}: {msg}", path.display()))?;
        Ok(config)
    }

    /// Load `.turnmap.toml` from `dir` when present, defaults otherwise.
    /// A malformed file is reported and ignored rather than fatal.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring {}: {err:#}", path.display());
                Self::default()
            }
        }
    }

    fn validate_values(&self) -> Result<(), String> {
        if !self.validate.min_spi.is_finite() || self.validate.min_spi < 0.0 {
            return Err("validate.min_spi must be a non-negative number".to_string());
        }
        if self.display.max_table_rows == 0 {
            return Err("display.max_table_rows must be at least 1".to_string());
        }
        Ok(())
    }
}

pub const CONFIG_FILE_NAME: &str = ".turnmap.toml";

static CONFIG: OnceLock<TurnmapConfig> = OnceLock::new();

/// Process-wide configuration, loaded once from the working directory.
pub fn get_config() -> &'static TurnmapConfig {
    CONFIG.get_or_init(|| {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        TurnmapConfig::load_or_default(&cwd)
    })
}
