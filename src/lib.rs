//! sheetledger - monthly ledger built from a personal-finance spreadsheet
//!
//! A household spreadsheet keeps income and expenses in two side-by-side
//! column blocks. This crate reads such a workbook (local file, CSV export or
//! URL), normalizes both blocks into transactions, and aggregates them into
//! chronologically ordered monthly periods.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (cells, transactions, periods, money)
//! - `source`: Spreadsheet sources producing grids
//! - `services`: Parsing, normalization and aggregation
//! - `reports`: Terminal, JSON and CSV reports
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetledger::config::{SheetledgerPaths, Settings};
//! use sheetledger::services::LedgerService;
//! use sheetledger::source::open_source;
//!
//! let paths = SheetledgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let source = open_source(settings.require_source()?, &settings)?;
//! let ledger = LedgerService::new(&settings).load(source.as_ref())?;
//! for period in ledger.remaining_from_now() {
//!     println!("{} {}", period.key(), period.balance());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod source;

pub use error::{LedgerError, LedgerResult};
