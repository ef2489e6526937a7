//! Column-block discovery
//!
//! A ledger sheet carries income and expense side by side. Each block must be
//! resolved to a [`ColumnMapping`] before any row is read, either from fixed
//! positions or by sniffing which columns hold dates and amounts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parsing::{parse_amount, parse_date};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BlockKind, Cell, Grid, MonthLabels, TransactionKind};

/// Absolute column indices of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

/// Fixed layout of one block: where it starts and the offsets of its columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLayout {
    pub first_column: usize,
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl BlockLayout {
    /// `DATA, MES, DESCRICAO, VALOR` starting at `first_column`
    pub const fn standard(first_column: usize) -> Self {
        Self {
            first_column,
            date: 0,
            description: 2,
            amount: 3,
        }
    }

    pub fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            date: self.first_column + self.date,
            description: self.first_column + self.description,
            amount: self.first_column + self.amount,
        }
    }

    /// Rightmost absolute column this layout reads
    pub fn last_column(&self) -> usize {
        self.first_column + self.date.max(self.description).max(self.amount)
    }
}

/// A half-open range of columns `[start, end)` searched by the sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The columns of this span that exist in a grid of the given width
    pub fn columns(&self, width: usize) -> std::ops::Range<usize> {
        self.start.min(width)..self.end.min(width)
    }
}

/// How the two blocks are located
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ColumnStrategy {
    /// Blocks sit at known columns
    FixedPosition {
        income: BlockLayout,
        expense: BlockLayout,
    },
    /// Columns are discovered from their contents within each span
    HeuristicSniff {
        income: ColumnSpan,
        expense: ColumnSpan,
        #[serde(default = "default_ratio")]
        date_ratio: f64,
        #[serde(default = "default_ratio")]
        amount_ratio: f64,
    },
}

fn default_ratio() -> f64 {
    0.5
}

impl Default for ColumnStrategy {
    fn default() -> Self {
        Self::FixedPosition {
            income: BlockLayout::standard(1),
            expense: BlockLayout::standard(6),
        }
    }
}

impl ColumnStrategy {
    /// Sniff within the default block spans (B..E and G..J)
    pub fn heuristic() -> Self {
        Self::HeuristicSniff {
            income: ColumnSpan::new(1, 5),
            expense: ColumnSpan::new(6, 10),
            date_ratio: default_ratio(),
            amount_ratio: default_ratio(),
        }
    }

    /// Resolve the columns of one block
    pub fn resolve(
        &self,
        grid: &Grid,
        kind: TransactionKind,
        first_row: usize,
        matchers: &CellMatchers,
    ) -> LedgerResult<ColumnMapping> {
        let block = BlockKind::from(kind);
        match self {
            Self::FixedPosition { income, expense } => {
                let layout = match kind {
                    TransactionKind::Income => income,
                    TransactionKind::Expense => expense,
                };
                if layout.last_column() >= grid.width() {
                    return Err(LedgerError::malformed(
                        block,
                        format!(
                            "expected columns {}..={} but the sheet has only {} columns",
                            layout.first_column,
                            layout.last_column(),
                            grid.width()
                        ),
                    ));
                }
                Ok(layout.mapping())
            }
            Self::HeuristicSniff {
                income,
                expense,
                date_ratio,
                amount_ratio,
            } => {
                let span = match kind {
                    TransactionKind::Income => income,
                    TransactionKind::Expense => expense,
                };
                let columns: Vec<usize> = span.columns(grid.width()).collect();
                let sniffed = sniff_date_amount(
                    grid,
                    &columns,
                    first_row,
                    matchers,
                    *date_ratio,
                    *amount_ratio,
                )
                .map_err(|reason| LedgerError::malformed(block, reason))?;

                let description = pick_description(grid, &sniffed.remaining, first_row)
                    .ok_or_else(|| {
                        LedgerError::malformed(block, "no column left for descriptions")
                    })?;

                let mapping = ColumnMapping {
                    date: sniffed.date,
                    description,
                    amount: sniffed.amount,
                };
                debug!(%block, ?mapping, "sniffed column mapping");
                Ok(mapping)
            }
        }
    }
}

/// Predicates the sniffer applies to cells
#[derive(Debug, Clone)]
pub struct CellMatchers {
    pub day_first: bool,
    pub currency_symbol: String,
}

impl CellMatchers {
    /// Date cells and date text; plain numbers are left to the amount sniff
    /// even though row parsing reads them as serial days
    pub fn is_date(&self, cell: &Cell) -> bool {
        match cell {
            Cell::Number(_) => false,
            _ => parse_date(cell, self.day_first).1,
        }
    }

    pub fn is_nonzero_amount(&self, cell: &Cell) -> bool {
        let (value, ok) = parse_amount(cell, &self.currency_symbol);
        ok && value != 0.0
    }
}

/// Result of locating the date and amount columns among candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffedColumns {
    pub date: usize,
    pub amount: usize,
    /// Candidates that are neither, in column order
    pub remaining: Vec<usize>,
}

/// Find the first column that mostly holds dates, then the first remaining
/// column that mostly holds nonzero amounts
pub fn sniff_date_amount(
    grid: &Grid,
    candidates: &[usize],
    first_row: usize,
    matchers: &CellMatchers,
    date_ratio: f64,
    amount_ratio: f64,
) -> Result<SniffedColumns, String> {
    if candidates.is_empty() {
        return Err("no columns in range".to_string());
    }

    let date = candidates
        .iter()
        .copied()
        .find(|&col| hit_ratio(grid, col, first_row, |c| matchers.is_date(c)) >= date_ratio)
        .ok_or_else(|| "no column where most values are dates".to_string())?;

    let amount = candidates
        .iter()
        .copied()
        .filter(|&col| col != date)
        .find(|&col| {
            hit_ratio(grid, col, first_row, |c| matchers.is_nonzero_amount(c)) >= amount_ratio
        })
        .ok_or_else(|| "no column where most values are amounts".to_string())?;

    let remaining = candidates
        .iter()
        .copied()
        .filter(|&col| col != date && col != amount)
        .collect();

    Ok(SniffedColumns {
        date,
        amount,
        remaining,
    })
}

/// Share of non-empty cells in a column matching `pred`; 0.0 for an empty column
fn hit_ratio(grid: &Grid, col: usize, first_row: usize, pred: impl Fn(&Cell) -> bool) -> f64 {
    let (filled, hits) = grid
        .column(col, first_row)
        .filter(|(_, cell)| !cell.is_empty())
        .fold((0usize, 0usize), |(filled, hits), (_, cell)| {
            (filled + 1, hits + usize::from(pred(cell)))
        });

    if filled == 0 {
        0.0
    } else {
        hits as f64 / filled as f64
    }
}

/// The remaining column with the most free text, skipping month-label columns
fn pick_description(grid: &Grid, remaining: &[usize], first_row: usize) -> Option<usize> {
    let score = |col: usize| {
        grid.column(col, first_row)
            .filter_map(|(_, cell)| cell.as_text())
            .filter(|text| !MonthLabels::is_month_label(text))
            .count()
    };

    // max_by_key keeps the last maximum, so walk right to left to favour the leftmost
    remaining.iter().rev().copied().max_by_key(|&col| score(col))
}
