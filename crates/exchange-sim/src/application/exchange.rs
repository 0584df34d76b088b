use log::{debug, info, warn};
use rex_ingest::{parse_decimal, tokenise};
use rex_ledger::Wallet;
use rex_matching::create_matching_algorithm;
use rex_ports::Ledger;

use crate::error::{ExchangeError, Result};
use crate::infrastructure::{OrderBook, SimulatorConfig};
use crate::model::{Admission, OrderRecord, OrderSide, ProductStats, SideStats, StepReport, Timestamp};

/// Fields in a user order line: `PRODUCT,price,amount`
const USER_ORDER_FIELDS: usize = 3;

/// Drives the simulation for a single user
///
/// Owns the order book and the user's ledger, tracks the current timestamp
/// and settles the user's trades as time advances.
pub struct Exchange<L: Ledger = Wallet> {
    book: OrderBook,
    ledger: L,
    user: String,
    current_time: Timestamp,
}

impl<L: Ledger> Exchange<L> {
    /// Create a driver positioned at the book's earliest timestamp
    pub fn new(book: OrderBook, ledger: L, user: impl Into<String>) -> Self {
        let current_time = book.earliest_timestamp().clone();
        let user = user.into();
        info!(
            "Exchange ready for {}: {} orders, starting at {}",
            user,
            book.len(),
            current_time
        );

        Self {
            book,
            ledger,
            user,
            current_time,
        }
    }

    pub fn current_time(&self) -> &Timestamp {
        &self.current_time
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn wallet(&self) -> &L {
        &self.ledger
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Ask and bid statistics per known product at the current timestamp
    pub fn market_stats(&self) -> Vec<ProductStats> {
        self.book
            .known_products()
            .into_iter()
            .map(|product| {
                let asks = self
                    .book
                    .orders_matching(OrderSide::Ask, &product, &self.current_time);
                let bids = self
                    .book
                    .orders_matching(OrderSide::Bid, &product, &self.current_time);
                ProductStats {
                    asks: SideStats::from_records(&asks),
                    bids: SideStats::from_records(&bids),
                    product,
                }
            })
            .collect()
    }

    /// Parse `PRODUCT,price,amount` into an order owned by the user
    pub fn parse_user_order(&self, side: OrderSide, input: &str) -> Result<OrderRecord> {
        if side.is_trade() {
            return Err(ExchangeError::TradeSideRejected(side));
        }

        let tokens = tokenise(input, ',');
        let [product, price, amount] = tokens.as_slice() else {
            return Err(ExchangeError::InvalidInput(format!(
                "expected {} fields (product,price,amount), found {}",
                USER_ORDER_FIELDS,
                tokens.len()
            )));
        };

        let price = parse_decimal("price", price)?;
        let amount = parse_decimal("amount", amount)?;

        let record = OrderRecord::new(self.current_time.clone(), *product, side, price, amount)?
            .with_owner(self.user.clone());
        Ok(record)
    }

    /// Check the user's order against the ledger and insert it if covered
    pub fn submit(&mut self, side: OrderSide, input: &str) -> Result<Admission> {
        let record = self.parse_user_order(side, input)?;

        if !self.ledger.can_afford(&record)? {
            warn!(
                "Insufficient funds for {} {} {} @ {}",
                record.side, record.amount, record.product, record.price
            );
            return Ok(Admission::InsufficientFunds(record));
        }

        self.book.insert(record.clone())?;
        info!(
            "Accepted {} {} {} @ {} at {}",
            record.side, record.amount, record.product, record.price, record.timestamp
        );
        Ok(Admission::Accepted(record))
    }

    /// Match every product at the current timestamp, settle the user's
    /// trades and move to the next timestamp
    pub fn advance(&mut self) -> Result<StepReport> {
        let timestamp = self.current_time.clone();
        let mut trades = Vec::new();
        let mut settled = 0;

        for product in self.book.known_products() {
            let product_trades = self.book.match_asks_to_bids(&product, &timestamp);

            for trade in product_trades.iter().filter(|t| t.owner == self.user) {
                self.ledger.settle(trade)?;
                settled += 1;
            }

            debug!("{}: {} trades at {}", product, product_trades.len(), timestamp);
            trades.push((product, product_trades));
        }

        let next_timestamp = self.book.next_timestamp(&timestamp);
        self.current_time = next_timestamp.clone();

        let report = StepReport {
            timestamp,
            next_timestamp,
            trades,
            settled,
        };
        info!(
            "Step {} -> {}: {} trades, {} settled",
            report.timestamp,
            report.next_timestamp,
            report.total_trades(),
            report.settled
        );
        Ok(report)
    }
}

impl Exchange<Wallet> {
    /// Build a driver from configuration: load the dataset, pick the
    /// matcher by name and fund the wallet
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;

        let matcher = create_matching_algorithm(&config.matching_algorithm);
        let book = OrderBook::load_with_matcher(&config.dataset, matcher)?;

        let mut wallet = Wallet::new();
        for (currency, amount) in &config.initial_balances {
            wallet.deposit(currency.clone(), *amount)?;
        }

        Ok(Self::new(book, wallet, config.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rex_core::Product;
    use rust_decimal_macros::dec;

    fn dataset() -> Vec<OrderRecord> {
        vec![
            OrderRecord::new("T1", "ETH/BTC", OrderSide::Ask, dec!(0.02), dec!(1)).unwrap(),
            OrderRecord::new("T1", "ETH/BTC", OrderSide::Bid, dec!(0.01), dec!(1)).unwrap(),
            OrderRecord::new("T1", "ETH/BTC", OrderSide::Bid, dec!(0.015), dec!(2)).unwrap(),
            OrderRecord::new("T2", "ETH/BTC", OrderSide::Bid, dec!(0.018), dec!(1)).unwrap(),
            OrderRecord::new("T2", "DOGE/BTC", OrderSide::Ask, dec!(0.0000003), dec!(100))
                .unwrap(),
        ]
    }

    fn exchange(balances: &[(&str, rust_decimal::Decimal)]) -> Exchange {
        let mut wallet = Wallet::new();
        for (currency, amount) in balances {
            wallet.deposit(*currency, *amount).unwrap();
        }
        Exchange::new(OrderBook::new(dataset()).unwrap(), wallet, "simuser")
    }

    #[test]
    fn test_starts_at_earliest_timestamp() {
        let exchange = exchange(&[]);
        assert_eq!(exchange.current_time(), &Timestamp::from("T1"));
        assert_eq!(exchange.user(), "simuser");
    }

    #[test]
    fn test_market_stats_at_current_time() {
        let exchange = exchange(&[]);
        let stats = exchange.market_stats();

        assert_eq!(stats.len(), 2);
        let eth = stats
            .iter()
            .find(|s| s.product == Product::from("ETH/BTC"))
            .unwrap();
        assert_eq!(eth.asks.count, 1);
        assert_eq!(eth.bids.count, 2);
        assert_eq!(eth.bids.high, Some(dec!(0.015)));
        assert_eq!(eth.bids.spread, Some(dec!(0.005)));

        let doge = stats
            .iter()
            .find(|s| s.product == Product::from("DOGE/BTC"))
            .unwrap();
        assert_eq!(doge.asks.count, 0);
        assert_eq!(doge.asks.high, None);
    }

    #[test]
    fn test_parse_user_order() {
        let exchange = exchange(&[]);
        let record = exchange
            .parse_user_order(OrderSide::Bid, "ETH/BTC, 0.02, 0.5")
            .unwrap();

        assert_eq!(record.timestamp, Timestamp::from("T1"));
        assert_eq!(record.product, Product::from("ETH/BTC"));
        assert_eq!(record.price, dec!(0.02));
        assert_eq!(record.amount, dec!(0.5));
        assert_eq!(record.owner, "simuser");
    }

    #[test]
    fn test_parse_user_order_rejects_bad_input() {
        let exchange = exchange(&[]);

        assert!(matches!(
            exchange.parse_user_order(OrderSide::Ask, "ETH/BTC,0.02"),
            Err(ExchangeError::InvalidInput(_))
        ));
        assert!(matches!(
            exchange.parse_user_order(OrderSide::Ask, "ETH/BTC,abc,1"),
            Err(ExchangeError::Ingest(_))
        ));
        assert!(matches!(
            exchange.parse_user_order(OrderSide::Ask, "ETH/BTC,0.02,-1"),
            Err(ExchangeError::Record(_))
        ));
        assert!(matches!(
            exchange.parse_user_order(OrderSide::AskTrade, "ETH/BTC,0.02,1"),
            Err(ExchangeError::TradeSideRejected(OrderSide::AskTrade))
        ));
    }

    #[test]
    fn test_submit_without_funds_leaves_book_alone() {
        let mut exchange = exchange(&[("BTC", dec!(0.001))]);

        let admission = exchange.submit(OrderSide::Bid, "ETH/BTC,0.02,1").unwrap();

        assert!(matches!(admission, Admission::InsufficientFunds(_)));
        assert_eq!(exchange.book().len(), 5);
    }

    #[test]
    fn test_submit_inserts_affordable_order() {
        let mut exchange = exchange(&[("BTC", dec!(1))]);

        let admission = exchange.submit(OrderSide::Bid, "ETH/BTC,0.02,1").unwrap();

        assert!(admission.is_accepted());
        assert_eq!(exchange.book().len(), 6);
        assert_eq!(admission.record().owner, "simuser");
    }

    #[test]
    fn test_submit_malformed_product_is_ledger_error() {
        let mut exchange = exchange(&[("BTC", dec!(1))]);
        let err = exchange.submit(OrderSide::Bid, "ETHBTC,0.02,1").unwrap_err();
        assert!(matches!(err, ExchangeError::Ledger(_)));
    }

    #[test]
    fn test_advance_settles_user_trades() {
        let mut exchange = exchange(&[("BTC", dec!(1))]);

        // Crosses the dataset ask at 0.02 ahead of the dataset bids
        exchange.submit(OrderSide::Bid, "ETH/BTC,0.025,1").unwrap();
        let report = exchange.advance().unwrap();

        assert_eq!(report.timestamp, Timestamp::from("T1"));
        assert_eq!(report.next_timestamp, Timestamp::from("T2"));
        assert_eq!(report.total_trades(), 1);
        assert_eq!(report.settled, 1);

        // Paid at the ask price
        assert_eq!(exchange.wallet().balance("BTC"), dec!(0.98));
        assert_eq!(exchange.wallet().balance("ETH"), dec!(1));
        assert_eq!(exchange.current_time(), &Timestamp::from("T2"));
    }

    #[test]
    fn test_advance_ignores_dataset_trades_and_wraps() {
        let mut exchange = exchange(&[("BTC", dec!(1))]);

        let first = exchange.advance().unwrap();
        assert_eq!(first.total_trades(), 0);
        assert_eq!(first.settled, 0);

        let second = exchange.advance().unwrap();
        assert!(second.wrapped());
        assert_eq!(exchange.current_time(), &Timestamp::from("T1"));
        assert_eq!(exchange.wallet().balance("BTC"), dec!(1));
    }

    #[test]
    fn test_huge_order_is_rejected_not_fatal() {
        let mut exchange = exchange(&[("BTC", dec!(10))]);

        let err = exchange
            .submit(OrderSide::Bid, "ETH/BTC,100000000000000000000,100000000000")
            .unwrap_err();

        assert!(matches!(
            err,
            ExchangeError::Ledger(rex_ports::LedgerError::Overflow(_))
        ));
        assert_eq!(exchange.book().len(), 5);
    }

    #[test]
    fn test_crossing_own_orders_leaves_wallet_unchanged() {
        let book = OrderBook::new(vec![
            OrderRecord::new("T1", "ETH/BTC", OrderSide::Bid, dec!(0.001), dec!(1)).unwrap(),
        ])
        .unwrap();
        let mut wallet = Wallet::new();
        wallet.deposit("BTC", dec!(10)).unwrap();
        wallet.deposit("ETH", dec!(1)).unwrap();
        let mut exchange = Exchange::new(book, wallet, "simuser");

        assert!(exchange.submit(OrderSide::Ask, "ETH/BTC,0.02,1").unwrap().is_accepted());
        assert!(exchange.submit(OrderSide::Bid, "ETH/BTC,0.03,1").unwrap().is_accepted());

        let report = exchange.advance().unwrap();

        assert_eq!(report.total_trades(), 0);
        assert_eq!(report.settled, 0);
        assert_eq!(exchange.wallet().balance("BTC"), dec!(10));
        assert_eq!(exchange.wallet().balance("ETH"), dec!(1));
    }
}
