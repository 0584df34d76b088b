//! Rex Ports
//!
//! Port definitions (traits) for the Rex exchange simulator.
//! These define the boundaries between domain logic and infrastructure.

mod error;
mod ledger;
mod matching;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use matching::MatchingAlgorithm;
