use rex_core::{OrderSide, RecordError};
use rex_ingest::IngestError;
use rex_ports::LedgerError;
use thiserror::Error;

use crate::infrastructure::ConfigError;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Order book needs at least one record")]
    EmptyBook,

    #[error("Price statistics need at least one record")]
    EmptyRecordSet,

    #[error("Trade-side records cannot be inserted: {0}")]
    TradeSideRejected(OrderSide),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
