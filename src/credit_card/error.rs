use thiserror::Error;

use crate::store::{FormatError, StoreError};
use crate::SequenceNumberOverflow;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CardError {
    #[error("Invalid amount {0}: must be finite and not negative")]
    InvalidAmount(f64),

    #[error("Depositing {amount} onto a balance of {balance} overflows the balance")]
    BalanceOverflow { balance: f64, amount: f64 },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("Invalid credit limit {0}: must be finite and not negative")]
    InvalidCreditLimit(f64),

    #[error("Invalid balance {0}: must be finite and not negative")]
    InvalidBalance(f64),

    #[error("Field {field} is {len} bytes long, at most {max} are allowed")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error(transparent)]
    SequenceNumber(#[from] SequenceNumberOverflow),
}

/// A card state that fails validation after decoding is a malformed snapshot.
impl From<CardError> for StoreError {
    fn from(error: CardError) -> Self {
        StoreError::Format(FormatError::InvalidState(error.to_string()))
    }
}
