//! Investment tracker
//!
//! Reads the optional investment sheet, groups contributions by month and
//! combines them with the ledger balance into a net worth series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::{sniff_date_amount, CellMatchers};
use super::parsing::{parse_amount, parse_date};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    BlockKind, Grid, InvestmentEntry, Money, MonthKey, MonthLabels, MonthlyInvestment,
    NetWorthPoint, Period,
};

/// How the date and amount columns of the investment sheet are found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum InvestmentLayout {
    /// First column that mostly holds dates, first other column that mostly
    /// holds nonzero amounts
    #[default]
    Sniff,
    /// Known absolute columns
    Fixed { date: usize, amount: usize },
}

const SNIFF_RATIO: f64 = 0.5;

pub struct InvestmentTracker {
    layout: InvestmentLayout,
    header_rows: usize,
    matchers: CellMatchers,
    labels: MonthLabels,
}

impl InvestmentTracker {
    pub fn new(
        layout: InvestmentLayout,
        header_rows: usize,
        matchers: CellMatchers,
        labels: MonthLabels,
    ) -> Self {
        Self {
            layout,
            header_rows,
            matchers,
            labels,
        }
    }

    /// Read contributions from the investment sheet
    pub fn extract(&self, grid: &Grid) -> LedgerResult<Vec<InvestmentEntry>> {
        let (date_col, amount_col) = self.resolve(grid)?;
        debug!(date_col, amount_col, "investment columns");

        let mut entries = Vec::new();
        for row in self.header_rows..grid.height() {
            let date_cell = grid.get(row, date_col);
            let amount_cell = grid.get(row, amount_col);
            if date_cell.is_empty() && amount_cell.is_empty() {
                continue;
            }

            let Some(date) = parse_date(date_cell, self.matchers.day_first).0 else {
                debug!(row, cell = ?date_cell, "dropping investment row with unreadable date");
                continue;
            };
            let (value, ok) = parse_amount(amount_cell, &self.matchers.currency_symbol);
            if !ok {
                debug!(row, cell = ?amount_cell, "unreadable investment amount counted as zero");
            }

            entries.push(InvestmentEntry {
                date,
                amount: Money::from_f64(value),
                row,
            });
        }
        Ok(entries)
    }

    fn resolve(&self, grid: &Grid) -> LedgerResult<(usize, usize)> {
        match self.layout {
            InvestmentLayout::Fixed { date, amount } => {
                if date.max(amount) >= grid.width() {
                    return Err(LedgerError::malformed(
                        BlockKind::Investment,
                        format!(
                            "expected columns {} and {} but the sheet has only {} columns",
                            date,
                            amount,
                            grid.width()
                        ),
                    ));
                }
                Ok((date, amount))
            }
            InvestmentLayout::Sniff => {
                let candidates: Vec<usize> = (0..grid.width()).collect();
                let sniffed = sniff_date_amount(
                    grid,
                    &candidates,
                    self.header_rows,
                    &self.matchers,
                    SNIFF_RATIO,
                    SNIFF_RATIO,
                )
                .map_err(|reason| LedgerError::malformed(BlockKind::Investment, reason))?;
                Ok((sniffed.date, sniffed.amount))
            }
        }
    }

    /// Contributions per month with the running total, oldest first
    pub fn monthly(&self, entries: &[InvestmentEntry]) -> Vec<MonthlyInvestment> {
        let mut by_month: BTreeMap<MonthKey, Money> = BTreeMap::new();
        for entry in entries {
            *by_month.entry(entry.key()).or_default() += entry.amount;
        }

        let mut cumulative = Money::zero();
        by_month
            .into_iter()
            .map(|(month, contributed)| {
                cumulative += contributed;
                MonthlyInvestment {
                    month,
                    month_label: self.labels.label(month.month).to_string(),
                    contributed,
                    cumulative,
                }
            })
            .collect()
    }

    /// Running ledger balance plus running investments for every month that
    /// appears in either series
    pub fn net_worth(
        &self,
        periods: &[Period],
        monthly: &[MonthlyInvestment],
    ) -> Vec<NetWorthPoint> {
        let mut months: BTreeMap<MonthKey, (Money, Money)> = BTreeMap::new();
        for period in periods {
            months.entry(period.key()).or_default().0 += period.balance();
        }
        for item in monthly {
            months.entry(item.month).or_default().1 += item.contributed;
        }

        let mut balance = Money::zero();
        let mut invested = Money::zero();
        months
            .into_iter()
            .map(|(month, (period_balance, contributed))| {
                balance += period_balance;
                invested += contributed;
                NetWorthPoint {
                    month,
                    month_label: self.labels.label(month.month).to_string(),
                    cumulative_balance: balance,
                    cumulative_invested: invested,
                    net_worth: balance + invested,
                }
            })
            .collect()
    }
}
