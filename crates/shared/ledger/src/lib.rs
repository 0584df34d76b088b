//! Rex Ledger
//!
//! Per-account currency balances backing order admission and trade settlement.

mod wallet;

pub use wallet::Wallet;

// Re-export the port for convenience
pub use rex_ports::{Ledger, LedgerError, LedgerResult};
