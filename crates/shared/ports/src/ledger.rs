use rex_core::OrderRecord;

use crate::error::LedgerResult;

/// Port for per-account currency balances
///
/// Consulted before an order is admitted to the book, and updated with the
/// currency deltas of every trade the account takes part in.
pub trait Ledger {
    /// Check whether the account holds enough currency to back an order
    ///
    /// An ask needs `amount` of the base currency, a bid needs
    /// `amount * price` of the quote currency.
    fn can_afford(&self, order: &OrderRecord) -> LedgerResult<bool>;

    /// Apply the two currency legs of a trade record
    fn settle(&mut self, trade: &OrderRecord) -> LedgerResult<()>;
}
