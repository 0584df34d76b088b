use rex_core::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Invalid number in field '{field}': {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
