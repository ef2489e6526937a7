//! Ledger normalizer
//!
//! Turns a raw grid into the income and expense transaction streams. The
//! column mapping of each block is resolved first; only then are rows read,
//! so a sheet that does not look like a ledger fails before any parsing.

use serde::Serialize;
use tracing::{debug, warn};

use super::columns::{CellMatchers, ColumnMapping, ColumnStrategy};
use super::parsing::{parse_amount, parse_date};
use crate::error::LedgerResult;
use crate::models::{Grid, Money, MonthLabels, Transaction, TransactionKind};

/// Options controlling how a grid is read
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub strategy: ColumnStrategy,
    /// Leading rows skipped before data
    pub header_rows: usize,
    pub day_first: bool,
    pub currency_symbol: String,
    pub labels: MonthLabels,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strategy: ColumnStrategy::default(),
            header_rows: 1,
            day_first: true,
            currency_symbol: "R$".to_string(),
            labels: MonthLabels::default(),
        }
    }
}

impl NormalizeOptions {
    pub fn matchers(&self) -> CellMatchers {
        CellMatchers {
            day_first: self.day_first,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

/// What happened to the rows of one block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockStats {
    /// Non-blank rows inside the block
    pub rows_seen: usize,
    /// Rows discarded because their date could not be read
    pub dropped_bad_date: usize,
    /// Kept rows whose amount could not be read and counts as zero
    pub zeroed_amounts: usize,
}

impl BlockStats {
    pub fn kept(&self) -> usize {
        self.rows_seen - self.dropped_bad_date
    }
}

/// Both transaction streams of a sheet
#[derive(Debug, Clone, Default)]
pub struct NormalizedLedger {
    pub income: Vec<Transaction>,
    pub expense: Vec<Transaction>,
    pub income_stats: BlockStats,
    pub expense_stats: BlockStats,
}

/// Reads the income and expense blocks of a grid
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalize both blocks
    ///
    /// Both mappings are resolved before either block is read.
    pub fn normalize(&self, grid: &Grid) -> LedgerResult<NormalizedLedger> {
        let income_mapping = self.resolve(grid, TransactionKind::Income)?;
        let expense_mapping = self.resolve(grid, TransactionKind::Expense)?;

        let (income, income_stats) =
            self.read_block(grid, TransactionKind::Income, income_mapping);
        let (expense, expense_stats) =
            self.read_block(grid, TransactionKind::Expense, expense_mapping);

        Ok(NormalizedLedger {
            income,
            expense,
            income_stats,
            expense_stats,
        })
    }

    fn resolve(&self, grid: &Grid, kind: TransactionKind) -> LedgerResult<ColumnMapping> {
        self.options.strategy.resolve(
            grid,
            kind,
            self.options.header_rows,
            &self.options.matchers(),
        )
    }

    fn read_block(
        &self,
        grid: &Grid,
        kind: TransactionKind,
        mapping: ColumnMapping,
    ) -> (Vec<Transaction>, BlockStats) {
        let mut transactions = Vec::new();
        let mut stats = BlockStats::default();

        for row in self.options.header_rows..grid.height() {
            let date_cell = grid.get(row, mapping.date);
            let description_cell = grid.get(row, mapping.description);
            let amount_cell = grid.get(row, mapping.amount);

            if date_cell.is_empty() && description_cell.is_empty() && amount_cell.is_empty() {
                continue;
            }
            stats.rows_seen += 1;

            let date = match parse_date(date_cell, self.options.day_first) {
                (Some(date), true) => date,
                _ => {
                    debug!(%kind, row, cell = ?date_cell, "dropping row with unreadable date");
                    stats.dropped_bad_date += 1;
                    continue;
                }
            };

            let (value, ok) = parse_amount(amount_cell, &self.options.currency_symbol);
            if !ok {
                debug!(%kind, row, cell = ?amount_cell, "unreadable amount counted as zero");
                stats.zeroed_amounts += 1;
            }

            transactions.push(Transaction::new(
                kind,
                date,
                description_cell.display_text(),
                Money::from_f64(value),
                row,
                self.options.labels,
            ));
        }

        if stats.dropped_bad_date > 0 {
            warn!(
                %kind,
                dropped = stats.dropped_bad_date,
                seen = stats.rows_seen,
                "rows without a readable date were skipped"
            );
        }
        debug!(%kind, kept = transactions.len(), zeroed = stats.zeroed_amounts, "block read");

        (transactions, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use crate::services::aggregator::MonthlyAggregator;
    use crate::services::columns::ColumnSpan;
    use chrono::NaiveDate;

    /// Header row plus rows laid out as the standard two-block ledger
    fn ledger_grid(income: &[[&str; 3]], expense: &[[&str; 3]]) -> Grid {
        let mut rows = vec![vec![
            "", "DATA", "MES", "DESCRICAO", "VALOR", "", "DATA", "MES", "DESCRICAO", "VALOR",
        ]];
        for i in 0..income.len().max(expense.len()) {
            let mut row = vec![""; 10];
            if let Some([date, desc, value]) = income.get(i) {
                row[1] = *date;
                row[3] = *desc;
                row[4] = *value;
            }
            if let Some([date, desc, value]) = expense.get(i) {
                row[6] = *date;
                row[8] = *desc;
                row[9] = *value;
            }
            rows.push(row);
        }
        Grid::from_text_rows(rows)
    }

    #[test]
    fn test_normalize_standard_layout() {
        let grid = ledger_grid(
            &[
                ["2025-01-05", "salary", "R$ 1.500,00"],
                ["2025-02-01", "salary", "R$ 1.500,00"],
            ],
            &[["2025-01-10", "rent", "R$ 800,00"]],
        );
        let ledger = Normalizer::new(NormalizeOptions::default())
            .normalize(&grid)
            .unwrap();

        assert_eq!(ledger.income.len(), 2);
        assert_eq!(ledger.expense.len(), 1);

        let rent = &ledger.expense[0];
        assert_eq!(rent.kind, TransactionKind::Expense);
        assert_eq!(rent.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(rent.description, "rent");
        assert_eq!(rent.amount, Money::from_cents(80_000));
        assert_eq!(rent.month_label, "jan");
        assert_eq!(rent.row, 1);
    }

    #[test]
    fn test_bad_dates_are_dropped_and_bad_amounts_zeroed() {
        let grid = ledger_grid(
            &[
                ["MES", "leaked header", "VALOR"],
                ["05/03/2025", "bonus", "a combinar"],
                ["not a date", "ghost", "R$ 999,00"],
            ],
            &[],
        );
        let ledger = Normalizer::new(NormalizeOptions::default())
            .normalize(&grid)
            .unwrap();

        assert_eq!(ledger.income.len(), 1);
        assert_eq!(ledger.income[0].description, "bonus");
        assert_eq!(ledger.income[0].amount, Money::zero());
        assert_eq!(
            ledger.income_stats,
            BlockStats {
                rows_seen: 3,
                dropped_bad_date: 2,
                zeroed_amounts: 1
            }
        );
        assert_eq!(ledger.income_stats.kept(), 1);
        assert!(ledger.expense.is_empty());
    }

    #[test]
    fn test_oversized_amounts_are_zeroed() {
        let grid = ledger_grid(
            &[
                ["2025-01-05", "typo", "1e17"],
                ["2025-01-06", "typo again", "1e17"],
                ["2025-01-07", "salary", "R$ 1.500,00"],
            ],
            &[],
        );
        let ledger = Normalizer::new(NormalizeOptions::default())
            .normalize(&grid)
            .unwrap();

        assert_eq!(ledger.income[0].amount, Money::zero());
        assert_eq!(ledger.income[1].amount, Money::zero());
        assert_eq!(ledger.income_stats.zeroed_amounts, 2);

        let periods = MonthlyAggregator::default().merge(&ledger.income, &ledger.expense);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].income_total, Money::from_cents(150_000));
    }

    #[test]
    fn test_blank_rows_are_not_counted() {
        let grid = ledger_grid(
            &[["", "", ""], ["2025-01-05", "salary", "100,00"]],
            &[["2025-01-06", "market", "50,00"]],
        );
        let ledger = Normalizer::new(NormalizeOptions::default())
            .normalize(&grid)
            .unwrap();
        assert_eq!(ledger.income_stats.rows_seen, 1);
        assert_eq!(ledger.income.len(), 1);
        assert_eq!(ledger.expense.len(), 1);
    }

    #[test]
    fn test_narrow_sheet_reports_expense_block() {
        let grid = Grid::from_text_rows(vec![
            vec!["", "DATA", "MES", "DESCRICAO", "VALOR"],
            vec!["", "2025-01-05", "jan", "salary", "100,00"],
        ]);
        let err = Normalizer::new(NormalizeOptions::default())
            .normalize(&grid)
            .unwrap_err();
        assert_eq!(err.malformed_block(), Some(BlockKind::Expense));
    }

    #[test]
    fn test_heuristic_strategy_end_to_end() {
        let grid = Grid::from_text_rows(vec![
            vec!["RECEITAS", "", "", "DESPESAS", "", ""],
            vec!["salario", "05/01/2025", "1.500,00", "10/01/2025", "aluguel", "800,00"],
            vec!["freela", "12/01/2025", "300,00", "15/01/2025", "mercado", "450,25"],
        ]);
        let options = NormalizeOptions {
            strategy: ColumnStrategy::HeuristicSniff {
                income: ColumnSpan::new(0, 3),
                expense: ColumnSpan::new(3, 6),
                date_ratio: 0.5,
                amount_ratio: 0.5,
            },
            ..NormalizeOptions::default()
        };
        let ledger = Normalizer::new(options).normalize(&grid).unwrap();

        assert_eq!(ledger.income.len(), 2);
        assert_eq!(ledger.income[1].description, "freela");
        assert_eq!(ledger.income[1].amount, Money::from_cents(30_000));
        assert_eq!(ledger.expense[1].description, "mercado");
        assert_eq!(ledger.expense[1].amount, Money::from_cents(45_025));
    }
}
