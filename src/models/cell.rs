//! Spreadsheet cells and the rectangular grid they are read into

use chrono::NaiveDateTime;

/// A single spreadsheet value, independent of the file format it came from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Build a cell from a raw text field; blank text becomes `Empty`
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the cell as trimmed display text (used for descriptions)
    pub fn display_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::DateTime(dt) => dt.date().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Rows x columns of cells
///
/// Rows may be ragged; any position past the end of a row reads as `Empty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Build a grid from text rows, as CSV fields arrive
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| Cell::from_text(s.as_ref())).collect())
                .collect(),
        )
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The cell at (row, col), or `Empty` when out of range
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// The cells of one column from `first_row` down, with their row index
    pub fn column(&self, col: usize, first_row: usize) -> impl Iterator<Item = (usize, &Cell)> {
        (first_row..self.height()).map(move |row| (row, self.get(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_blank_is_empty() {
        assert_eq!(Cell::from_text("   "), Cell::Empty);
        assert_eq!(Cell::from_text("rent"), Cell::Text("rent".into()));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(Cell::Text("  salary ".into()).display_text(), "salary");
        assert_eq!(Cell::Number(12.0).display_text(), "12");
        assert_eq!(Cell::Number(1.5).display_text(), "1.5");
        assert_eq!(Cell::Empty.display_text(), "");
    }

    #[test]
    fn test_ragged_rows_read_as_empty() {
        let grid = Grid::from_text_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(1, 2), &Cell::Empty);
        assert_eq!(grid.get(5, 0), &Cell::Empty);
        assert_eq!(grid.get(0, 1), &Cell::Text("b".into()));
    }

    #[test]
    fn test_column_iterates_from_first_row() {
        let grid = Grid::from_text_rows(vec![vec!["h"], vec!["1"], vec!["2"]]);
        let values: Vec<(usize, String)> = grid
            .column(0, 1)
            .map(|(row, cell)| (row, cell.display_text()))
            .collect();
        assert_eq!(values, vec![(1, "1".to_string()), (2, "2".to_string())]);
    }
}
