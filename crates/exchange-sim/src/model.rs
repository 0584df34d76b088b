// Re-export domain types from rex-core
pub use rex_core::{
    DATASET_OWNER, OrderRecord, OrderSide, Price, Product, Quantity, RecordError, Timestamp,
};

use crate::infrastructure::OrderBook;

/// Outcome of submitting a user order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The wallet covers the order and it was inserted into the book
    Accepted(OrderRecord),

    /// The wallet cannot cover the order; nothing was inserted
    InsufficientFunds(OrderRecord),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted(_))
    }

    pub fn record(&self) -> &OrderRecord {
        match self {
            Admission::Accepted(record) | Admission::InsufficientFunds(record) => record,
        }
    }
}

/// Price summary for one side of one product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideStats {
    pub count: usize,
    pub high: Option<Price>,
    pub low: Option<Price>,
    pub spread: Option<Price>,
}

impl SideStats {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        Self {
            count: records.len(),
            high: OrderBook::high_price(records).ok(),
            low: OrderBook::low_price(records).ok(),
            spread: OrderBook::spread(records).ok(),
        }
    }
}

/// Market summary for one product at the current timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStats {
    pub product: Product,
    pub asks: SideStats,
    pub bids: SideStats,
}

/// What happened during one time step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Timestamp that was matched
    pub timestamp: Timestamp,
    /// Timestamp the simulation moved to
    pub next_timestamp: Timestamp,
    /// Trades per product, products in `known_products` order
    pub trades: Vec<(Product, Vec<OrderRecord>)>,
    /// Number of trades settled against the user's wallet
    pub settled: usize,
}

impl StepReport {
    pub fn total_trades(&self) -> usize {
        self.trades.iter().map(|(_, trades)| trades.len()).sum()
    }

    /// True when the step wrapped back to the start of the dataset
    pub fn wrapped(&self) -> bool {
        self.next_timestamp <= self.timestamp
    }
}
