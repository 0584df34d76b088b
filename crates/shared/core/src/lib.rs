//! Rex Core Domain
//!
//! Pure domain types for the Rex exchange simulator.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{DATASET_OWNER, OrderRecord, OrderSide, Product, RecordError};
pub use values::{Price, Quantity, Timestamp};
