//! Remaining months report
//!
//! The window of periods from a reference month onward, with the balance
//! accumulated before the window and the projected closing balance.

use std::io::Write;

use serde::Serialize;
use tabled::Tabled;

use crate::display;
use crate::error::LedgerResult;
use crate::models::{Money, MonthKey, Period, Totals};
use crate::services::LoadedLedger;

#[derive(Debug, Clone, Serialize)]
pub struct RemainingReport {
    pub reference: MonthKey,
    pub include_current_month: bool,
    /// Sum of balances of every period before the window
    pub opening_balance: Money,
    pub periods: Vec<Period>,
    pub window_totals: Totals,
    /// `opening_balance` plus the window's balance
    pub closing_balance: Money,
}

#[derive(Tabled)]
struct RemainingRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Running")]
    running: String,
}

impl RemainingReport {
    pub fn generate(ledger: &LoadedLedger, reference: MonthKey) -> Self {
        let periods = ledger.remaining_from(reference);
        let window_start = periods.first().map(Period::key);

        let opening_balance: Money = ledger
            .periods()
            .iter()
            .filter(|p| match window_start {
                Some(start) => p.key() < start,
                None => true,
            })
            .map(Period::balance)
            .sum();

        let window_totals: Totals = periods.iter().collect();

        Self {
            reference,
            include_current_month: ledger.include_current_month(),
            opening_balance,
            closing_balance: opening_balance + window_totals.balance(),
            periods,
            window_totals,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let relation = if self.include_current_month {
            "from"
        } else {
            "after"
        };
        let mut output = display::title(&format!("Remaining months {} {}", relation, self.reference));

        output.push_str(&format!(
            "Opening balance: {}\n\n",
            self.opening_balance.format_with_symbol(symbol)
        ));

        if self.periods.is_empty() {
            output.push_str("No periods in the remaining window.\n");
            return output;
        }

        let mut running = self.opening_balance;
        let rows: Vec<RemainingRow> = self
            .periods
            .iter()
            .map(|p| {
                running += p.balance();
                RemainingRow {
                    month: p.key().to_string(),
                    label: p.month_label.clone(),
                    income: p.income_total.format_with_symbol(symbol),
                    expense: p.expense_total.format_with_symbol(symbol),
                    balance: p.balance().format_with_symbol(symbol),
                    running: running.format_with_symbol(symbol),
                }
            })
            .collect();

        output.push_str(&display::table(rows, 2));
        output.push('\n');
        output.push_str(&format!(
            "Window: income {}, expense {}, balance {}\n",
            self.window_totals.income.format_with_symbol(symbol),
            self.window_totals.expense.format_with_symbol(symbol),
            self.window_totals.balance().format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Projected closing balance: {}\n",
            self.closing_balance.format_with_symbol(symbol)
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["year", "month", "month_label", "income", "expense", "balance", "running"])?;
        let mut running = self.opening_balance;
        for p in &self.periods {
            running += p.balance();
            csv.write_record([
                p.year.to_string(),
                p.month_number.to_string(),
                p.month_label.clone(),
                p.income_total.format_plain(),
                p.expense_total.format_plain(),
                p.balance().format_plain(),
                running.format_plain(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}
