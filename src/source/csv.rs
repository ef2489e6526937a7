//! Delimited text exports of a single sheet

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use super::{missing_sheet, GridSource};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Grid;

/// A CSV file read as one sheet
///
/// No header handling happens here: every record becomes a grid row, and the
/// normalizer skips header rows itself.
pub struct CsvSource {
    id: String,
    sheet: String,
    grid: Grid,
}

impl CsvSource {
    /// Read a CSV file; the sheet is named after the file stem
    pub fn open(path: &Path, delimiter: char) -> LedgerResult<Self> {
        let id = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| LedgerError::source_unavailable(&id, e))?;
        let sheet = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet")
            .to_string();
        Self::from_reader(id, sheet, file, delimiter)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(
        id: impl Into<String>,
        sheet: impl Into<String>,
        reader: R,
        delimiter: char,
    ) -> LedgerResult<Self> {
        let id = id.into();
        let delimiter = u8::try_from(delimiter).map_err(|_| {
            LedgerError::Config(format!("CSV delimiter '{delimiter}' must be a single byte"))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LedgerError::source_unavailable(&id, e))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let grid = Grid::from_text_rows(rows);
        debug!(source = %id, rows = grid.height(), cols = grid.width(), "csv read");

        Ok(Self {
            id,
            sheet: sheet.into(),
            grid,
        })
    }
}

impl GridSource for CsvSource {
    fn describe(&self) -> &str {
        &self.id
    }

    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet.clone()]
    }

    fn fetch_sheet(&self, name: Option<&str>) -> LedgerResult<Grid> {
        match name {
            Some(name) if name != self.sheet => Err(missing_sheet(&self.id, Some(name))),
            _ => Ok(self.grid.clone()),
        }
    }
}
