//! Ledger summary report
//!
//! Grand totals, per-year totals and what happened to the rows of each block.

use serde::Serialize;
use tabled::Tabled;

use crate::display;
use crate::models::{Money, MonthKey, Totals, YearTotals};
use crate::services::{BlockStats, LoadedLedger};

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub first_month: Option<MonthKey>,
    pub last_month: Option<MonthKey>,
    pub period_count: usize,
    pub totals: Totals,
    pub years: Vec<YearTotals>,
    pub income_rows: BlockStats,
    pub expense_rows: BlockStats,
    pub total_invested: Money,
}

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Block")]
    block: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Kept")]
    kept: usize,
    #[tabled(rename = "Bad date")]
    dropped: usize,
    #[tabled(rename = "Amount as zero")]
    zeroed: usize,
}

impl StatsRow {
    fn new(block: &'static str, stats: BlockStats) -> Self {
        Self {
            block,
            rows: stats.rows_seen,
            kept: stats.kept(),
            dropped: stats.dropped_bad_date,
            zeroed: stats.zeroed_amounts,
        }
    }
}

impl SummaryReport {
    pub fn generate(ledger: &LoadedLedger) -> Self {
        let periods = ledger.periods();
        Self {
            first_month: periods.first().map(|p| p.key()),
            last_month: periods.last().map(|p| p.key()),
            period_count: periods.len(),
            totals: ledger.totals(),
            years: ledger.year_totals(),
            income_rows: ledger.income_stats(),
            expense_rows: ledger.expense_stats(),
            total_invested: ledger.investments().iter().map(|e| e.amount).sum(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = display::title("Ledger Summary");

        match (self.first_month, self.last_month) {
            (Some(first), Some(last)) => output.push_str(&format!(
                "Months:   {} to {} ({} with activity)\n",
                first, last, self.period_count
            )),
            _ => output.push_str("Months:   none\n"),
        }
        output.push_str(&format!(
            "Income:   {:>18}\n",
            self.totals.income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expense:  {:>18}\n",
            self.totals.expense.format_with_symbol(symbol)
        ));
        output.push_str(&display::separator(28));
        output.push('\n');
        output.push_str(&format!(
            "Balance:  {:>18}\n",
            self.totals.balance().format_with_symbol(symbol)
        ));
        if !self.total_invested.is_zero() {
            output.push_str(&format!(
                "Invested: {:>18}\n",
                self.total_invested.format_with_symbol(symbol)
            ));
        }

        if !self.years.is_empty() {
            output.push('\n');
            let rows = self.years.iter().map(|y| YearRow {
                year: y.year.to_string(),
                income: y.totals.income.format_with_symbol(symbol),
                expense: y.totals.expense.format_with_symbol(symbol),
                balance: y.totals.balance().format_with_symbol(symbol),
            });
            output.push_str(&display::table(rows, 1));
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&display::table(
            [
                StatsRow::new("income", self.income_rows),
                StatsRow::new("expense", self.expense_rows),
            ],
            1,
        ));
        output.push('\n');
        output
    }
}
