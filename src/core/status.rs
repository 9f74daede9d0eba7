//! Global status classification from the schedule performance index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SPI below this is a critical schedule slip.
pub const CRITICAL_SPI: f64 = 0.90;

/// SPI below this (but at or above [`CRITICAL_SPI`]) is at risk.
pub const AT_RISK_SPI: f64 = 0.98;

/// Project health tier derived from the overall SPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GlobalStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Critical")]
    Critical,
}

impl GlobalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GlobalStatus::OnTrack => "On Track",
            GlobalStatus::AtRisk => "At Risk",
            GlobalStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for GlobalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an SPI into a status tier. Boundaries are strict: an SPI of
/// exactly [`CRITICAL_SPI`] is at risk, not critical.
pub fn classify_status(spi: f64) -> GlobalStatus {
    if spi < CRITICAL_SPI {
        GlobalStatus::Critical
    } else if spi < AT_RISK_SPI {
        GlobalStatus::AtRisk
    } else {
        GlobalStatus::OnTrack
    }
}
