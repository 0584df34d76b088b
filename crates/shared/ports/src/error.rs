use rex_core::{OrderSide, Quantity};
use thiserror::Error;

/// Domain-level errors for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unsupported side for this operation: {0}")]
    UnsupportedSide(OrderSide),

    #[error("Product is not of the form BASE/QUOTE: {0}")]
    MalformedProduct(String),

    #[error("Negative currency amount: {0}")]
    NegativeAmount(Quantity),

    #[error("Currency amount out of range for {0}")]
    Overflow(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
