//! Naming conventions and thresholds used by the validator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};

/// Configuration for [`DataValidator`](crate::validation::DataValidator).
///
/// Every field has a default, so a JSON file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Minimum number of rows (one year of weekly data).
    pub min_rows: usize,
    /// Date column names, highest priority first.
    pub date_columns: Vec<String>,
    /// Revenue column names, highest priority first.
    pub revenue_columns: Vec<String>,
    /// Substring marking a spend column (matched against the lowercased name).
    pub spend_marker: String,
    /// Case-sensitive suffix marking a spend column.
    pub spend_suffix: String,
    /// Smallest median interval, in days, still considered weekly.
    pub weekly_min_days: i64,
    /// Largest median interval, in days, still considered weekly.
    pub weekly_max_days: i64,
    /// Intervals longer than this many days count as gaps.
    pub gap_days: i64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_rows: 52,
            date_columns: ["date", "week", "week_start", "week_date"]
                .map(String::from)
                .to_vec(),
            revenue_columns: ["revenue", "sales", "total_revenue", "conversions"]
                .map(String::from)
                .to_vec(),
            spend_marker: "spend".to_string(),
            spend_suffix: "_S".to_string(),
            weekly_min_days: 5,
            weekly_max_days: 9,
            gap_days: 10,
        }
    }
}

impl ValidatorConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CadenceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ValidatorConfig = serde_json::from_str(&text).map_err(|e| {
            CadenceError::Config(format!("Invalid config '{}': {}", path.display(), e))
        })?;
        config.check()?;
        Ok(config)
    }

    /// Reject configurations the validator cannot run with.
    pub fn check(&self) -> Result<()> {
        if self.date_columns.is_empty() {
            return Err(CadenceError::Config(
                "date_columns must name at least one column".to_string(),
            ));
        }
        if self.spend_marker.is_empty() || self.spend_suffix.is_empty() {
            return Err(CadenceError::Config(
                "spend_marker and spend_suffix must not be empty".to_string(),
            ));
        }
        if self.weekly_min_days > self.weekly_max_days {
            return Err(CadenceError::Config(format!(
                "weekly_min_days ({}) exceeds weekly_max_days ({})",
                self.weekly_min_days, self.weekly_max_days
            )));
        }
        Ok(())
    }
}
