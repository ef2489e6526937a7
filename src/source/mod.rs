//! Spreadsheet sources
//!
//! Everything downstream works on a [`Grid`]; a source only has to produce
//! one per sheet name. Any failure to do so is reported as
//! [`LedgerError::SourceUnavailable`] and never retried.

pub mod csv;
pub mod remote;
pub mod workbook;

pub use self::csv::CsvSource;
pub use remote::RemoteSource;
pub use workbook::WorkbookSource;

use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Grid;

/// Something that can hand out sheets as grids
pub trait GridSource {
    /// Human-readable identifier used in errors and logs
    fn describe(&self) -> &str;

    /// Names of the sheets this source holds, in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Fetch one sheet; `None` selects the first sheet
    fn fetch_sheet(&self, name: Option<&str>) -> LedgerResult<Grid>;

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }
}

/// Named grids held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    id: String,
    sheets: Vec<(String, Grid)>,
}

impl InMemorySource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.push((name.into(), grid));
        self
    }
}

impl GridSource for InMemorySource {
    fn describe(&self) -> &str {
        &self.id
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn fetch_sheet(&self, name: Option<&str>) -> LedgerResult<Grid> {
        let found = match name {
            Some(name) => self.sheets.iter().find(|(n, _)| n == name),
            None => self.sheets.first(),
        };
        found
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| missing_sheet(&self.id, name))
    }
}

pub(crate) fn missing_sheet(source_id: &str, name: Option<&str>) -> LedgerError {
    match name {
        Some(name) => LedgerError::source_unavailable(source_id, format!("no sheet named '{name}'")),
        None => LedgerError::source_unavailable(source_id, "workbook has no sheets"),
    }
}

/// Whether a source identifier is an HTTP(S) URL
pub fn is_url(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Open a source by path or URL
///
/// URLs are downloaded; `.csv`/`.tsv` files are read as delimited text and
/// anything else as a workbook.
pub fn open_source(identifier: &str, settings: &Settings) -> LedgerResult<Box<dyn GridSource>> {
    info!(source = identifier, "opening spreadsheet source");

    if is_url(identifier) {
        return Ok(Box::new(RemoteSource::fetch(identifier, settings)?));
    }

    let path = Path::new(identifier);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::open(path, settings.csv_delimiter)?)),
        Some("tsv") => Ok(Box::new(CsvSource::open(path, '\t')?)),
        _ => Ok(Box::new(WorkbookSource::open(path)?)),
    }
}
