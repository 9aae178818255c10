//! User settings for the expense tracker
//!
//! Manages which store format is used, how summaries are scoped, and how the
//! summary is presented.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::ExpenseRecord;
use crate::storage::write_json_atomic;

/// Which backing format stores the expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// `name,amount,category` lines in expenses.csv
    Csv,
    /// Expenses and Budget sheets in expenses.xlsx
    #[default]
    Xlsx,
}

/// Which records count towards the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryScope {
    /// Every record ever logged is counted against the budget
    #[default]
    AllTime,
    /// Only records timestamped in the current calendar month
    CurrentMonth,
}

impl SummaryScope {
    /// Select the records this scope counts for the month containing `today`
    ///
    /// Records without a timestamp cannot be placed in a month and only
    /// count under `AllTime`.
    pub fn select<'a>(
        &self,
        records: &'a [ExpenseRecord],
        today: NaiveDate,
    ) -> Vec<&'a ExpenseRecord> {
        match self {
            Self::AllTime => records.iter().collect(),
            Self::CurrentMonth => records
                .iter()
                .filter(|r| {
                    r.timestamp.is_some_and(|ts| {
                        ts.date().year() == today.year() && ts.date().month() == today.month()
                    })
                })
                .collect(),
        }
    }
}

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Timestamp format used when echoing a new expense (strftime format)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Backing store format
    #[serde(default)]
    pub store_format: StoreFormat,

    /// Which records count towards the summary
    #[serde(default)]
    pub summary_scope: SummaryScope,

    /// Whether to colorize summary output
    #[serde(default = "default_true")]
    pub color_output: bool,

    /// Whether to draw the category bar chart
    #[serde(default = "default_true")]
    pub show_chart: bool,

    /// Width of the longest chart bar in cells
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₱".to_string()
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_true() -> bool {
    true
}

fn default_chart_width() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            timestamp_format: default_timestamp_format(),
            store_format: StoreFormat::default(),
            summary_scope: SummaryScope::default(),
            color_output: true,
            show_chart: true,
            chart_width: default_chart_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk, replacing the file atomically
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
