//! Error types shared by the engine, the stores and configuration loading

use thiserror::Error;

/// Errors returned by the financial calculations and record books
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A required value was negative, zero where positivity is required, or not finite
    #[error("invalid input for {field}: {value}")]
    InvalidInput { field: &'static str, value: String },

    /// The formula is undefined for these inputs (zero rate or zero term)
    #[error("not computable: {0}")]
    NotComputable(&'static str),

    /// No rate is known for the requested currency pair
    #[error("no exchange rate available for {from} -> {to}")]
    UnsupportedCurrencyPair { from: String, to: String },

    /// A record id was not found in a book or ledger
    #[error("unknown record: {0}")]
    UnknownRecord(String),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        EngineError::InvalidInput {
            field,
            value: value.to_string(),
        }
    }

    /// True for the "nothing to show" outcome (zero rate or term), as opposed to bad input
    pub fn is_not_computable(&self) -> bool {
        matches!(self, EngineError::NotComputable(_))
    }
}

/// Errors raised while loading or saving persisted records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed record: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
