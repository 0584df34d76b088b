use rex_core::{OrderRecord, Product, Timestamp};

/// Port for order matching algorithms
///
/// Implementations receive the asks and bids of one product at one timestamp,
/// in book order, and return the trades they produce. They work on copies and
/// never mutate the book.
pub trait MatchingAlgorithm: Send {
    /// Match asks against bids and return trade records in production order
    fn match_orders(
        &self,
        asks: &[OrderRecord],
        bids: &[OrderRecord],
        product: &Product,
        timestamp: &Timestamp,
    ) -> Vec<OrderRecord>;

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
