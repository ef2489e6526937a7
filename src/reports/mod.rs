//! Reports module for sheetledger
//!
//! Every report is generated from a loaded ledger and can be rendered for the
//! terminal, serialized as JSON, and (where it is tabular) exported as CSV.

pub mod investments;
pub mod month_detail;
pub mod overview;
pub mod remaining;
pub mod summary;

pub use investments::InvestmentReport;
pub use month_detail::{DetailLine, MonthDetailReport};
pub use overview::PeriodOverviewReport;
pub use remaining::RemainingReport;
pub use summary::SummaryReport;
