//! Investments and net worth report

use std::io::Write;

use serde::Serialize;
use tabled::Tabled;

use crate::display;
use crate::error::LedgerResult;
use crate::models::{Money, MonthlyInvestment, NetWorthPoint};
use crate::services::LoadedLedger;

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentReport {
    pub months: Vec<MonthlyInvestment>,
    pub net_worth: Vec<NetWorthPoint>,
    pub total_invested: Money,
}

#[derive(Tabled)]
struct NetWorthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Contributed")]
    contributed: String,
    #[tabled(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Net worth")]
    net_worth: String,
}

impl InvestmentReport {
    pub fn generate(ledger: &LoadedLedger) -> Self {
        let months = ledger.monthly_investments();
        let total_invested = months.last().map(|m| m.cumulative).unwrap_or_default();
        Self {
            net_worth: ledger.net_worth(),
            months,
            total_invested,
        }
    }

    fn contributed_in(&self, point: &NetWorthPoint) -> Money {
        self.months
            .iter()
            .find(|m| m.month == point.month)
            .map(|m| m.contributed)
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = display::title("Investments and Net Worth");

        if self.net_worth.is_empty() {
            output.push_str("No periods or investments found.\n");
            return output;
        }
        if self.months.is_empty() {
            output.push_str("No investment contributions found.\n\n");
        }

        let rows: Vec<NetWorthRow> = self
            .net_worth
            .iter()
            .map(|point| NetWorthRow {
                month: point.month.to_string(),
                label: point.month_label.clone(),
                contributed: self.contributed_in(point).format_with_symbol(symbol),
                invested: point.cumulative_invested.format_with_symbol(symbol),
                balance: point.cumulative_balance.format_with_symbol(symbol),
                net_worth: point.net_worth.format_with_symbol(symbol),
            })
            .collect();

        output.push_str(&display::table(rows, 2));
        output.push('\n');
        output.push_str(&format!(
            "Total invested: {}\n",
            self.total_invested.format_with_symbol(symbol)
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "year",
            "month",
            "month_label",
            "contributed",
            "cumulative_invested",
            "cumulative_balance",
            "net_worth",
        ])?;
        for point in &self.net_worth {
            csv.write_record([
                point.month.year.to_string(),
                point.month.month.to_string(),
                point.month_label.clone(),
                self.contributed_in(point).format_plain(),
                point.cumulative_invested.format_plain(),
                point.cumulative_balance.format_plain(),
                point.net_worth.format_plain(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}
