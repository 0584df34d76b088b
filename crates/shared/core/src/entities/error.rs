use thiserror::Error;

use crate::values::{Price, Quantity};

/// Invariant violations when building an order record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Product must not be empty")]
    EmptyProduct,

    #[error("Price must be non-negative, got {0}")]
    NegativePrice(Price),

    #[error("Amount must be non-negative, got {0}")]
    NegativeAmount(Quantity),

    #[error("Unknown order side: {0:?}")]
    UnknownSide(String),
}
