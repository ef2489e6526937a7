//! Core data models for sheetledger
//!
//! Cells and grids as read from a workbook, the transactions normalized out
//! of them, and the monthly periods they aggregate into.

pub mod cell;
pub mod investment;
pub mod money;
pub mod month;
pub mod period;
pub mod transaction;

pub use cell::{Cell, Grid};
pub use investment::{InvestmentEntry, MonthlyInvestment, NetWorthPoint};
pub use money::Money;
pub use month::{MonthKey, MonthLabels, MonthParseError};
pub use period::{Period, Totals, YearTotals};
pub use transaction::{BlockKind, Transaction, TransactionKind};
