use rex_core::{OrderRecord, Product, Timestamp};
use rex_ports::MatchingAlgorithm;

use crate::book_order::cross;

/// Price-ranked variant of the book-order matcher
///
/// Asks are visited cheapest first and each ask scans bids highest first.
/// Records at the same price keep their book order. Fill rules and the trade
/// price (always the ask's) are the same as `BookOrderMatcher`.
pub struct PricePriorityMatcher;

impl PricePriorityMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PricePriorityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingAlgorithm for PricePriorityMatcher {
    fn name(&self) -> &str {
        "Price Priority"
    }

    fn match_orders(
        &self,
        asks: &[OrderRecord],
        bids: &[OrderRecord],
        product: &Product,
        timestamp: &Timestamp,
    ) -> Vec<OrderRecord> {
        // Stable sorts keep book order among equal prices
        let mut asks: Vec<&OrderRecord> = asks.iter().collect();
        asks.sort_by(|a, b| a.price.cmp(&b.price));

        let mut bids: Vec<&OrderRecord> = bids.iter().collect();
        bids.sort_by(|a, b| b.price.cmp(&a.price));

        cross(asks, bids, product, timestamp)
    }
}
