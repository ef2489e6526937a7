//! Period overview report
//!
//! One row per month with activity, plus a totals row.

use std::io::Write;

use serde::Serialize;
use tabled::Tabled;

use crate::display;
use crate::error::LedgerResult;
use crate::models::{Period, Totals};
use crate::services::LoadedLedger;

/// Every period of the ledger with grand totals
#[derive(Debug, Clone, Serialize)]
pub struct PeriodOverviewReport {
    pub periods: Vec<Period>,
    pub totals: Totals,
}

#[derive(Tabled)]
struct PeriodRow {
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
}

impl PeriodOverviewReport {
    pub fn generate(ledger: &LoadedLedger) -> Self {
        Self {
            periods: ledger.periods().to_vec(),
            totals: ledger.totals(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = display::title("Monthly Periods");

        if self.periods.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        let mut rows: Vec<PeriodRow> = self
            .periods
            .iter()
            .map(|p| PeriodRow {
                month: p.key().to_string(),
                label: p.month_label.clone(),
                income: p.income_total.format_with_symbol(symbol),
                expense: p.expense_total.format_with_symbol(symbol),
                balance: p.balance().format_with_symbol(symbol),
            })
            .collect();
        rows.push(PeriodRow {
            month: "Total".into(),
            label: String::new(),
            income: self.totals.income.format_with_symbol(symbol),
            expense: self.totals.expense.format_with_symbol(symbol),
            balance: self.totals.balance().format_with_symbol(symbol),
        });

        output.push_str(&display::table(rows, 2));
        output.push('\n');
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["year", "month", "month_label", "income", "expense", "balance"])?;
        for p in &self.periods {
            csv.write_record([
                p.year.to_string(),
                p.month_number.to_string(),
                p.month_label.clone(),
                p.income_total.format_plain(),
                p.expense_total.format_plain(),
                p.balance().format_plain(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey, MonthLabels};

    fn report() -> PeriodOverviewReport {
        let periods = vec![
            Period::new(
                MonthKey::new(2025, 1).unwrap(),
                Money::from_cents(150_000),
                Money::from_cents(80_000),
                MonthLabels::Portuguese,
            ),
            Period::new(
                MonthKey::new(2025, 2).unwrap(),
                Money::from_cents(150_000),
                Money::zero(),
                MonthLabels::Portuguese,
            ),
        ];
        let totals = periods.iter().collect();
        PeriodOverviewReport { periods, totals }
    }

    #[test]
    fn test_format_terminal() {
        let out = report().format_terminal("R$");
        assert!(out.contains("2025-01"));
        assert!(out.contains("R$ 700,00"));
        assert!(out.contains("R$ 2.200,00"));
        assert!(out.contains("Total"));
    }

    #[test]
    fn test_empty_report() {
        let empty = PeriodOverviewReport {
            periods: Vec::new(),
            totals: Totals::default(),
        };
        assert!(empty.format_terminal("R$").contains("No transactions"));
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        report().export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "year,month,month_label,income,expense,balance");
        assert_eq!(lines[1], "2025,1,jan,1500.00,800.00,700.00");
        assert_eq!(lines[2], "2025,2,fev,1500.00,0.00,1500.00");
    }

    #[test]
    fn test_json_includes_balance() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["periods"][0]["balance"], 700.0);
        assert_eq!(value["totals"]["balance"], 2200.0);
    }
}
