//! Custom error types for sheetledger
//!
//! Only two failures are terminal for a ledger load: the source could not be
//! fetched, or the column blocks could not be located. Individual cells that
//! fail to parse are recovered where they are read and never show up here.

use thiserror::Error;

use crate::models::BlockKind;

/// The main error type for sheetledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The grid could not be fetched (missing file, network failure, unknown sheet)
    #[error("Source unavailable ({source_id}): {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    /// A column block could not be mapped to date/description/amount columns
    #[error("Malformed ledger: {block} block: {reason}")]
    MalformedLedger { block: BlockKind, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Invalid user input (month keys, flags)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "source unavailable" error
    pub fn source_unavailable(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a "malformed ledger" error for one block
    pub fn malformed(block: BlockKind, reason: impl Into<String>) -> Self {
        Self::MalformedLedger {
            block,
            reason: reason.into(),
        }
    }

    /// Check if this is a fetch failure
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    /// Check if this is a column mapping failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedLedger { .. })
    }

    /// The block a mapping failure refers to, if any
    pub fn malformed_block(&self) -> Option<BlockKind> {
        match self {
            Self::MalformedLedger { block, .. } => Some(*block),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for sheetledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
