//! Ledger transactions as read from one column block of the sheet

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::{MonthKey, MonthLabels};

/// Which stream a transaction belongs to
///
/// Decided by the column block the row came from, never by the amount's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A column block of the workbook, as named in mapping failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Income,
    Expense,
    Investment,
}

impl From<TransactionKind> for BlockKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Investment => write!(f, "investment"),
        }
    }
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Lowercase three-letter month label derived from `date`
    pub month_label: String,
    pub year: i32,
    pub month_number: u32,
    /// Category or payee text
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    /// Zero-based row in the source sheet
    pub row: usize,
}

impl Transaction {
    /// Create a transaction, deriving the calendar attributes from `date`
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        row: usize,
        labels: MonthLabels,
    ) -> Self {
        Self {
            date,
            month_label: labels.label(date.month()).to_string(),
            year: date.year(),
            month_number: date.month(),
            description: description.into(),
            amount,
            kind,
            row,
        }
    }

    /// The month this transaction is grouped under
    pub fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month_number,
        }
    }
}
