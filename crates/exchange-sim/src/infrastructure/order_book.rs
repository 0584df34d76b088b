use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, warn};
use rex_core::{OrderRecord, OrderSide, Price, Product, Timestamp};
use rex_matching::{BookOrderMatcher, MatchingAlgorithm};

use crate::error::{ExchangeError, Result};

/// Every order admitted to the simulation, kept sorted by timestamp
///
/// The book only grows. Matched orders stay in place as history; matching
/// works on copies of the records for one product at one timestamp.
pub struct OrderBook {
    /// Records in book order (ascending timestamp, stable on ties)
    orders: Vec<OrderRecord>,
    /// Smallest timestamp in `orders`
    earliest: Timestamp,
    /// Matching algorithm
    matcher: Box<dyn MatchingAlgorithm>,
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("order_count", &self.orders.len())
            .field("earliest", &self.earliest)
            .field("matcher", &self.matcher.name())
            .finish()
    }
}

impl OrderBook {
    /// Create a book with the default book-order matching
    pub fn new(records: Vec<OrderRecord>) -> Result<Self> {
        Self::with_matcher(records, Box::new(BookOrderMatcher::new()))
    }

    /// Create a book with a specific matching algorithm
    ///
    /// Fails on an empty batch or on trade-side records. Records are
    /// stable-sorted by timestamp, so equal timestamps keep batch order.
    pub fn with_matcher(
        mut records: Vec<OrderRecord>,
        matcher: Box<dyn MatchingAlgorithm>,
    ) -> Result<Self> {
        if let Some(trade) = records.iter().find(|r| r.side.is_trade()) {
            return Err(ExchangeError::TradeSideRejected(trade.side));
        }

        let earliest = records
            .iter()
            .map(|r| &r.timestamp)
            .min()
            .cloned()
            .ok_or(ExchangeError::EmptyBook)?;

        records.sort_by(OrderRecord::compare_by_timestamp);

        debug!(
            "Order book created: {} records, earliest={}, matcher={}",
            records.len(),
            earliest,
            matcher.name()
        );

        Ok(Self {
            orders: records,
            earliest,
            matcher,
        })
    }

    /// Load a dataset file and build a book from the records it yields
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_matcher(path, Box::new(BookOrderMatcher::new()))
    }

    /// Load a dataset file, matching with `matcher`
    pub fn load_with_matcher(
        path: impl AsRef<Path>,
        matcher: Box<dyn MatchingAlgorithm>,
    ) -> Result<Self> {
        let report = rex_ingest::load_file(path)?;
        if report.rejected > 0 {
            warn!(
                "{} of {} dataset lines rejected",
                report.rejected,
                report.lines_read()
            );
        }
        Self::with_matcher(report.into_records(), matcher)
    }

    /// Get the name of the matching algorithm
    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Construction rejects empty batches and the book never shrinks, so
    /// this holds false for every constructed book
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Distinct products present in the book
    pub fn known_products(&self) -> Vec<Product> {
        self.orders
            .iter()
            .map(|o| &o.product)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Records with the given side, product and timestamp, in book order
    pub fn orders_matching(
        &self,
        side: OrderSide,
        product: &Product,
        timestamp: &Timestamp,
    ) -> Vec<OrderRecord> {
        self.orders
            .iter()
            .filter(|o| o.side == side && o.product == *product && o.timestamp == *timestamp)
            .cloned()
            .collect()
    }

    /// Highest price in a non-empty set of records
    pub fn high_price(records: &[OrderRecord]) -> Result<Price> {
        records
            .iter()
            .map(|r| r.price)
            .max()
            .ok_or(ExchangeError::EmptyRecordSet)
    }

    /// Lowest price in a non-empty set of records
    pub fn low_price(records: &[OrderRecord]) -> Result<Price> {
        records
            .iter()
            .map(|r| r.price)
            .min()
            .ok_or(ExchangeError::EmptyRecordSet)
    }

    /// Difference between the highest and lowest price
    pub fn spread(records: &[OrderRecord]) -> Result<Price> {
        Ok(Self::high_price(records)? - Self::low_price(records)?)
    }

    pub fn earliest_timestamp(&self) -> &Timestamp {
        &self.earliest
    }

    /// First timestamp in book order that is later than `current`
    ///
    /// Wraps around to the earliest timestamp once the end of the data is
    /// reached, so a simulation loops over the dataset indefinitely.
    pub fn next_timestamp(&self, current: &Timestamp) -> Timestamp {
        self.orders
            .iter()
            .map(|o| &o.timestamp)
            .find(|t| *t > current)
            .unwrap_or(&self.earliest)
            .clone()
    }

    /// Add a record and re-sort the book by timestamp
    ///
    /// Affordability is checked by the caller before inserting.
    pub fn insert(&mut self, record: OrderRecord) -> Result<()> {
        if record.side.is_trade() {
            return Err(ExchangeError::TradeSideRejected(record.side));
        }

        debug!(
            "Inserting {} {} @ {} x {} at {} for {}",
            record.side, record.product, record.price, record.amount, record.timestamp, record.owner
        );

        if record.timestamp < self.earliest {
            self.earliest = record.timestamp.clone();
        }
        self.orders.push(record);
        self.orders.sort_by(OrderRecord::compare_by_timestamp);
        Ok(())
    }

    /// Match the asks and bids of one product at one timestamp
    ///
    /// Returns trade records in the order they were produced. The book itself
    /// is left unchanged, so repeated calls give the same trades.
    pub fn match_asks_to_bids(&self, product: &Product, timestamp: &Timestamp) -> Vec<OrderRecord> {
        let asks = self.orders_matching(OrderSide::Ask, product, timestamp);
        let bids = self.orders_matching(OrderSide::Bid, product, timestamp);

        let trades = self
            .matcher
            .match_orders(&asks, &bids, product, timestamp);

        debug!(
            "Matched {} at {}: {} asks, {} bids, {} trades",
            product,
            timestamp,
            asks.len(),
            bids.len(),
            trades.len()
        );
        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rex_matching::PricePriorityMatcher;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(timestamp: &str, product: &str, side: OrderSide, price: Decimal) -> OrderRecord {
        OrderRecord::new(timestamp, product, side, price, dec!(1)).unwrap()
    }

    fn sample_book() -> OrderBook {
        OrderBook::new(vec![
            record("T1", "ETH/BTC", OrderSide::Bid, dec!(0.020)),
            record("T1", "ETH/BTC", OrderSide::Ask, dec!(0.022)),
            record("T1", "DOGE/BTC", OrderSide::Ask, dec!(0.0000003)),
            record("T1", "ETH/BTC", OrderSide::Bid, dec!(0.021)),
            record("T2", "ETH/BTC", OrderSide::Bid, dec!(0.019)),
            record("T3", "BTC/USDT", OrderSide::Ask, dec!(5300)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_batch_is_fatal() {
        let err = OrderBook::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ExchangeError::EmptyBook));
    }

    #[test]
    fn test_trade_side_batch_rejected() {
        let mut trade = record("T1", "ETH/BTC", OrderSide::Ask, dec!(1));
        trade.side = OrderSide::AskTrade;
        let err = OrderBook::new(vec![trade]).unwrap_err();
        assert!(matches!(err, ExchangeError::TradeSideRejected(OrderSide::AskTrade)));
    }

    #[test]
    fn test_known_products_are_distinct() {
        let products = sample_book().known_products();
        assert_eq!(
            products,
            vec![
                Product::from("BTC/USDT"),
                Product::from("DOGE/BTC"),
                Product::from("ETH/BTC")
            ]
        );
    }

    #[test]
    fn test_orders_matching_filters_and_keeps_order() {
        let book = sample_book();
        let bids = book.orders_matching(OrderSide::Bid, &"ETH/BTC".into(), &"T1".into());

        let prices: Vec<Decimal> = bids.iter().map(|b| b.price).collect();
        assert_eq!(prices, vec![dec!(0.020), dec!(0.021)]);

        assert!(
            book.orders_matching(OrderSide::Ask, &"ETH/BTC".into(), &"T9".into())
                .is_empty()
        );
    }

    #[test]
    fn test_price_statistics() {
        let book = sample_book();
        let bids = book.orders_matching(OrderSide::Bid, &"ETH/BTC".into(), &"T1".into());

        assert_eq!(OrderBook::high_price(&bids).unwrap(), dec!(0.021));
        assert_eq!(OrderBook::low_price(&bids).unwrap(), dec!(0.020));
        assert_eq!(OrderBook::spread(&bids).unwrap(), dec!(0.001));
    }

    #[test]
    fn test_price_statistics_on_empty_set_fail() {
        assert!(matches!(
            OrderBook::high_price(&[]),
            Err(ExchangeError::EmptyRecordSet)
        ));
        assert!(matches!(
            OrderBook::low_price(&[]),
            Err(ExchangeError::EmptyRecordSet)
        ));
        assert!(matches!(
            OrderBook::spread(&[]),
            Err(ExchangeError::EmptyRecordSet)
        ));
    }

    #[test]
    fn test_time_navigation_wraps() {
        let book = sample_book();
        assert_eq!(book.earliest_timestamp(), &Timestamp::from("T1"));
        assert_eq!(book.next_timestamp(&"T1".into()), Timestamp::from("T2"));
        assert_eq!(book.next_timestamp(&"T2".into()), Timestamp::from("T3"));
        assert_eq!(book.next_timestamp(&"T3".into()), Timestamp::from("T1"));
    }

    #[test]
    fn test_construction_sorts_stably() {
        let book = OrderBook::new(vec![
            record("T2", "ETH/BTC", OrderSide::Bid, dec!(1)),
            record("T1", "ETH/BTC", OrderSide::Bid, dec!(2)),
            record("T2", "ETH/BTC", OrderSide::Bid, dec!(3)),
        ])
        .unwrap();

        let prices: Vec<Decimal> = book.orders().iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![dec!(2), dec!(1), dec!(3)]);
        assert_eq!(book.earliest_timestamp(), &Timestamp::from("T1"));
    }

    #[test]
    fn test_insert_resorts_and_tracks_earliest() {
        let mut book = sample_book();
        book.insert(record("T0", "ETH/BTC", OrderSide::Ask, dec!(0.03)))
            .unwrap();
        book.insert(record("T2", "ETH/BTC", OrderSide::Ask, dec!(0.04)))
            .unwrap();

        assert_eq!(book.len(), 8);
        assert!(!book.is_empty());
        assert_eq!(book.earliest_timestamp(), &Timestamp::from("T0"));
        assert!(
            book.orders()
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp)
        );

        // New T2 record lands after the existing T2 record
        let t2: Vec<Decimal> = book
            .orders()
            .iter()
            .filter(|o| o.timestamp.as_str() == "T2")
            .map(|o| o.price)
            .collect();
        assert_eq!(t2, vec![dec!(0.019), dec!(0.04)]);
    }

    #[test]
    fn test_insert_rejects_trade_sides() {
        let mut book = sample_book();
        let mut trade = record("T1", "ETH/BTC", OrderSide::Bid, dec!(1));
        trade.side = OrderSide::BidTrade;

        assert!(matches!(
            book.insert(trade),
            Err(ExchangeError::TradeSideRejected(OrderSide::BidTrade))
        ));
        assert_eq!(book.len(), 6);
    }

    #[test]
    fn test_match_uses_configured_matcher() {
        let records = vec![
            record("T1", "ETH/BTC", OrderSide::Ask, dec!(0.025)),
            record("T1", "ETH/BTC", OrderSide::Ask, dec!(0.020)),
            record("T1", "ETH/BTC", OrderSide::Bid, dec!(0.030)),
        ];

        let book_order = OrderBook::new(records.clone()).unwrap();
        let price_priority =
            OrderBook::with_matcher(records, Box::new(PricePriorityMatcher::new())).unwrap();

        let product = Product::from("ETH/BTC");
        let timestamp = Timestamp::from("T1");

        assert_eq!(book_order.matcher_name(), "Book Order");
        assert_eq!(
            book_order.match_asks_to_bids(&product, &timestamp)[0].price,
            dec!(0.025)
        );
        assert_eq!(
            price_priority.match_asks_to_bids(&product, &timestamp)[0].price,
            dec!(0.020)
        );
    }
}
