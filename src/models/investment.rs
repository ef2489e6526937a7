//! Entries of the investment sheet and the monthly views built from them

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::month::MonthKey;

/// One dated contribution from the investment sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentEntry {
    pub date: NaiveDate,
    pub amount: Money,
    pub row: usize,
}

impl InvestmentEntry {
    pub fn key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Contributions of one month and the running total up to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyInvestment {
    pub month: MonthKey,
    pub month_label: String,
    pub contributed: Money,
    pub cumulative: Money,
}

/// Accumulated ledger balance plus accumulated investments at the end of a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetWorthPoint {
    pub month: MonthKey,
    pub month_label: String,
    pub cumulative_balance: Money,
    pub cumulative_invested: Money,
    pub net_worth: Money,
}
