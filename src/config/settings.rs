//! User settings for sheetledger
//!
//! Describes where the spreadsheet lives, how its column blocks are laid out,
//! and how cells are interpreted. Every field has a default matching the
//! usual household ledger: income in columns B..E, expenses in G..J, one
//! header row, day-first dates and `R$` amounts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::SheetledgerPaths;
use crate::error::LedgerError;
use crate::models::MonthLabels;
use crate::services::columns::ColumnStrategy;
use crate::services::investment::InvestmentLayout;
use crate::services::normalizer::NormalizeOptions;

/// User settings for sheetledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Workbook path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Sheet holding the income/expense blocks (first sheet when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// Optional sheet with investment contributions
    #[serde(default = "default_investment_sheet")]
    pub investment_sheet: Option<String>,

    /// How the investment sheet's columns are found
    #[serde(default)]
    pub investment_layout: InvestmentLayout,

    /// How the income/expense column blocks are found
    #[serde(default)]
    pub layout: ColumnStrategy,

    /// Leading rows skipped before data
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Read ambiguous dates as day/month (pt-BR) rather than month/day
    #[serde(default = "default_true")]
    pub day_first: bool,

    /// Currency symbol stripped from amount cells and used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Month label table used for display
    #[serde(default)]
    pub month_labels: MonthLabels,

    /// Whether the remaining window starts at the reference month (`>=`)
    /// or right after it (`>`)
    #[serde(default = "default_true")]
    pub include_current_month: bool,

    /// Timeout for remote workbook downloads
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Field delimiter for CSV sources
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,
}

fn default_schema_version() -> u32 {
    1
}

fn default_investment_sheet() -> Option<String> {
    Some("INVESTIMENTO".to_string())
}

fn default_header_rows() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_csv_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            source: None,
            sheet: None,
            investment_sheet: default_investment_sheet(),
            investment_layout: InvestmentLayout::default(),
            layout: ColumnStrategy::default(),
            header_rows: default_header_rows(),
            day_first: true,
            currency_symbol: default_currency(),
            month_labels: MonthLabels::default(),
            include_current_month: true,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            csv_delimiter: default_csv_delimiter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SheetledgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, LedgerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to the default location
    pub fn save(&self, paths: &SheetledgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        self.save_to(&paths.settings_file())
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), LedgerError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// The configured source, or a configuration error naming how to set one
    pub fn require_source(&self) -> Result<&str, LedgerError> {
        self.source.as_deref().ok_or_else(|| {
            LedgerError::Config(
                "No spreadsheet source configured; pass --source or set \"source\" in config.json"
                    .into(),
            )
        })
    }

    /// Options for the ledger normalizer derived from these settings
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strategy: self.layout.clone(),
            header_rows: self.header_rows,
            day_first: self.day_first,
            currency_symbol: self.currency_symbol.clone(),
            labels: self.month_labels,
        }
    }
}
