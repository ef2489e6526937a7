//! Month detail report
//!
//! Lists the income and expense transactions of one month side by side with
//! that month's totals.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use crate::display;
use crate::error::LedgerResult;
use crate::models::{Money, MonthKey, Period, Transaction, TransactionKind};
use crate::services::LoadedLedger;

const DESCRIPTION_WIDTH: usize = 40;

/// One transaction as shown in the detail report
#[derive(Debug, Clone, Serialize)]
pub struct DetailLine {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    /// Zero-based row in the source sheet
    pub row: usize,
}

impl From<&Transaction> for DetailLine {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            description: txn.description.clone(),
            amount: txn.amount,
            kind: txn.kind,
            row: txn.row,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthDetailReport {
    pub month: MonthKey,
    pub month_label: String,
    pub income: Vec<DetailLine>,
    pub expense: Vec<DetailLine>,
    pub income_total: Money,
    pub expense_total: Money,
    pub balance: Money,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl MonthDetailReport {
    pub fn generate(ledger: &LoadedLedger, month: MonthKey) -> Self {
        let txns = ledger.transactions_in(month);
        let period = ledger
            .period(month)
            .cloned()
            .unwrap_or_else(|| Period::empty(month, ledger.labels()));

        Self {
            month,
            month_label: period.month_label.clone(),
            income: txns.income.into_iter().map(DetailLine::from).collect(),
            expense: txns.expense.into_iter().map(DetailLine::from).collect(),
            income_total: period.income_total,
            expense_total: period.expense_total,
            balance: period.balance(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = display::title(&format!("{} ({})", self.month, self.month_label));

        if self.is_empty() {
            output.push_str("No transactions in this month.\n");
            return output;
        }

        for (heading, lines, total) in [
            ("Income", &self.income, self.income_total),
            ("Expense", &self.expense, self.expense_total),
        ] {
            output.push('\n');
            output.push_str(heading);
            output.push('\n');
            if lines.is_empty() {
                output.push_str("  (none)\n");
                continue;
            }
            let rows = lines.iter().map(|line| LineRow {
                date: line.date.format("%d/%m/%Y").to_string(),
                description: display::truncate(&line.description, DESCRIPTION_WIDTH),
                amount: line.amount.format_with_symbol(symbol),
            });
            output.push_str(&display::table(rows, 2));
            output.push('\n');
            output.push_str(&format!(
                "{} total: {}\n",
                heading,
                total.format_with_symbol(symbol)
            ));
        }

        output.push('\n');
        output.push_str(&display::separator(40));
        output.push('\n');
        output.push_str(&format!(
            "Balance: {}\n",
            self.balance.format_with_symbol(symbol)
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["kind", "date", "description", "amount", "row"])?;
        for line in self.income.iter().chain(&self.expense) {
            csv.write_record([
                line.kind.to_string(),
                line.date.format("%Y-%m-%d").to_string(),
                line.description.clone(),
                line.amount.format_plain(),
                line.row.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::Grid;
    use crate::services::LedgerService;
    use crate::source::InMemorySource;

    fn ledger() -> LoadedLedger {
        let grid = Grid::from_text_rows(vec![
            vec!["", "DATA", "MES", "DESCRICAO", "VALOR", "", "DATA", "MES", "DESCRICAO", "VALOR"],
            vec![
                "", "05/01/2025", "jan", "salario", "R$ 1.500,00", "", "20/01/2025", "jan",
                "mercado", "R$ 250,00",
            ],
            vec![
                "", "", "", "", "", "", "10/01/2025", "jan", "aluguel, condominio", "R$ 800,00",
            ],
        ]);
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", grid);
        LedgerService::new(&Settings::default()).load(&source).unwrap()
    }

    #[test]
    fn test_generate_orders_by_date() {
        let report = MonthDetailReport::generate(&ledger(), MonthKey::new(2025, 1).unwrap());
        assert_eq!(report.income.len(), 1);
        let descriptions: Vec<&str> = report.expense.iter().map(|l| l.description.as_str()).collect();
        assert_eq!(descriptions, ["aluguel, condominio", "mercado"]);
        assert_eq!(report.balance, Money::from_cents(45_000));
    }

    #[test]
    fn test_month_without_activity() {
        let report = MonthDetailReport::generate(&ledger(), MonthKey::new(2025, 7).unwrap());
        assert!(report.is_empty());
        assert_eq!(report.month_label, "jul");
        assert!(report.format_terminal("R$").contains("No transactions"));
    }

    #[test]
    fn test_format_terminal() {
        let report = MonthDetailReport::generate(&ledger(), MonthKey::new(2025, 1).unwrap());
        let out = report.format_terminal("R$");
        assert!(out.contains("2025-01 (jan)"));
        assert!(out.contains("10/01/2025"));
        assert!(out.contains("Balance: R$ 450,00"));
    }

    #[test]
    fn test_csv_export_quotes_fields() {
        let report = MonthDetailReport::generate(&ledger(), MonthKey::new(2025, 1).unwrap());
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("income,2025-01-05,salario,1500.00,1"));
        assert!(text.contains("expense,2025-01-10,\"aluguel, condominio\",800.00,2"));
    }
}
