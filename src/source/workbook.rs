//! Workbook files (xlsx, xlsm, xls, ods) read with calamine

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::debug;

use super::{missing_sheet, GridSource};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Cell, Grid};

/// A workbook held in memory
///
/// The bytes are parsed again for every sheet fetch, so the source needs no
/// interior mutability.
pub struct WorkbookSource {
    id: String,
    bytes: Vec<u8>,
    sheet_names: Vec<String>,
}

impl WorkbookSource {
    /// Read a workbook file from disk
    pub fn open(path: &Path) -> LedgerResult<Self> {
        let id = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| LedgerError::source_unavailable(&id, e))?;
        Self::from_bytes(id, bytes)
    }

    /// Wrap workbook bytes obtained elsewhere
    pub fn from_bytes(id: impl Into<String>, bytes: Vec<u8>) -> LedgerResult<Self> {
        let id = id.into();
        let sheet_names = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice()))
            .map_err(|e| LedgerError::source_unavailable(&id, e))?
            .sheet_names();
        debug!(source = %id, sheets = ?sheet_names, "workbook opened");

        Ok(Self {
            id,
            bytes,
            sheet_names,
        })
    }
}

impl GridSource for WorkbookSource {
    fn describe(&self) -> &str {
        &self.id
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn fetch_sheet(&self, name: Option<&str>) -> LedgerResult<Grid> {
        let sheet = match name {
            Some(name) => name,
            None => self
                .sheet_names
                .first()
                .map(String::as_str)
                .ok_or_else(|| missing_sheet(&self.id, None))?,
        };
        if !self.sheet_names.iter().any(|s| s == sheet) {
            return Err(missing_sheet(&self.id, Some(sheet)));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(self.bytes.as_slice()))
            .map_err(|e| LedgerError::source_unavailable(&self.id, e))?;
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| LedgerError::source_unavailable(&self.id, format!("sheet '{sheet}': {e}")))?;

        let grid = range_to_grid(&range);
        debug!(source = %self.id, sheet, rows = grid.height(), cols = grid.width(), "sheet read");
        Ok(grid)
    }
}

/// Build a grid anchored at A1 from a calamine range
///
/// Calamine trims leading empty rows and columns; they are restored so column
/// indices match what the user sees in the spreadsheet.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for data_row in range.rows() {
        let mut row = vec![Cell::Empty; col_offset];
        row.extend(data_row.iter().map(Cell::from));
        rows.push(row);
    }
    Grid::new(rows)
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::from_text(s),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) => Cell::DateTime(value),
                None => Cell::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}
