//! Service layer for sheetledger
//!
//! Cell parsing, column discovery and normalization turn a raw grid into
//! transactions; the aggregator and investment tracker build the monthly
//! views; the ledger service ties a source to all of them.

pub mod aggregator;
pub mod columns;
pub mod investment;
pub mod ledger;
pub mod normalizer;
pub mod parsing;

pub use aggregator::MonthlyAggregator;
pub use columns::{BlockLayout, ColumnMapping, ColumnSpan, ColumnStrategy};
pub use investment::{InvestmentLayout, InvestmentTracker};
pub use ledger::{LedgerService, LoadedLedger, MonthTransactions};
pub use normalizer::{BlockStats, NormalizeOptions, NormalizedLedger, Normalizer};
pub use parsing::{parse_amount, parse_date};
