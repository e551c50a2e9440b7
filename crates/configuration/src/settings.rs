use crate::error::ConfigError;
use core_types::{TimeRange, WeekStart, WeightUnit};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: Profile,
    pub storage: Storage,
    pub reports: Reports,
    pub logging: Logging,
}

/// Personal details used by the BMI calculator and for display.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Height in centimetres. Needed by `bmi` unless passed on the command line.
    pub height_cm: Option<f64>,
    /// Unit for entering and displaying weights. Data is always stored in kg.
    pub unit: WeightUnit,
}

/// Where the entry and goal files live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub data_dir: PathBuf,
}

/// Report and chart preferences.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reports {
    /// First day of the week for weekly averages.
    pub week_start: WeekStart,
    /// Chart window used when `chart` is run without `--range`.
    pub default_range: TimeRange,
    /// Entries on either side of each point in the chart's moving average.
    pub trend_radius: usize,
    /// Page linked from share intents. Platforms that only share a URL need it.
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".weightwise"),
        }
    }
}

impl Default for Reports {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            default_range: TimeRange::Month,
            trend_radius: 3,
            share_url: None,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects values the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(height) = self.profile.height_cm {
            if !height.is_finite() || height <= 0.0 {
                return Err(ConfigError::ValidationError {
                    field: "profile.height_cm",
                    reason: format!("expected a positive number of centimetres, got {height}"),
                });
            }
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "storage.data_dir",
                reason: "must not be empty".to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "logging.level",
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(url) = &self.reports.share_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    field: "reports.share_url",
                    reason: format!("expected an http(s) URL, got `{url}`"),
                });
            }
        }

        Ok(())
    }
}
