use thiserror::Error;

use crate::types::ContractKey;

/// Per-record / per-row errors produced by the signal core.
///
/// None of these abort a batch: a malformed record is dropped on its own,
/// and evaluation failures are collected next to the rows that succeeded
/// (see [`crate::report::SignalReport`]).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SignalError {
    #[error("malformed quote record: {0}")]
    MalformedQuote(String),

    #[error("no current price supplied for {}", key.id())]
    MissingPrice { key: ContractKey },

    #[error("baseline price is zero for {}, change percent undefined", key.id())]
    DivisionByZero { key: ContractKey },
}

impl SignalError {
    /// The contract this error belongs to, when it is row-scoped.
    pub fn key(&self) -> Option<&ContractKey> {
        match self {
            SignalError::MalformedQuote(_) => None,
            SignalError::MissingPrice { key } | SignalError::DivisionByZero { key } => Some(key),
        }
    }
}
