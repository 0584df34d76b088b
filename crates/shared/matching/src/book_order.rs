use log::debug;
use rex_core::{OrderRecord, OrderSide, Product, Quantity, Timestamp};
use rex_ports::MatchingAlgorithm;
use rust_decimal::Decimal;

/// Ask-first matching in book order
///
/// Asks are visited in the order they sit in the book, and each ask scans the
/// bids from the start of the book. This is a simplified price-time priority:
/// neither side is ranked by price, so changing the iteration order changes
/// the trades that come out.
///
/// Rules:
/// 1. A bid is eligible for an ask when `bid.price >= ask.price`
/// 2. Trades always execute at the ask price
/// 3. A bid larger than the ask keeps its remainder for later asks
/// 4. An ask larger than the bid keeps scanning the remaining bids
/// 5. Zero-amount asks and fully consumed bids are skipped, so no fill has
///    a zero amount
/// 6. A simulation account never fills against its own orders
pub struct BookOrderMatcher;

impl BookOrderMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookOrderMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingAlgorithm for BookOrderMatcher {
    fn name(&self) -> &str {
        "Book Order"
    }

    fn match_orders(
        &self,
        asks: &[OrderRecord],
        bids: &[OrderRecord],
        product: &Product,
        timestamp: &Timestamp,
    ) -> Vec<OrderRecord> {
        cross(asks.iter(), bids.iter(), product, timestamp)
    }
}

/// Fill asks against bids in the order both iterators yield them
///
/// Working amounts are tracked locally; the input records are never modified.
pub(crate) fn cross<'a>(
    asks: impl IntoIterator<Item = &'a OrderRecord>,
    bids: impl IntoIterator<Item = &'a OrderRecord>,
    product: &Product,
    timestamp: &Timestamp,
) -> Vec<OrderRecord> {
    let mut bids: Vec<(&OrderRecord, Quantity)> =
        bids.into_iter().map(|bid| (bid, bid.amount)).collect();
    let mut trades = Vec::new();

    for ask in asks {
        let mut ask_remaining = ask.amount;
        if ask_remaining == Decimal::ZERO {
            continue;
        }

        for (bid, bid_remaining) in bids.iter_mut().map(|(bid, remaining)| (*bid, remaining)) {
            // Consumed bids can do no more work
            if bid.price < ask.price || *bid_remaining == Decimal::ZERO || self_cross(ask, bid) {
                continue;
            }

            if *bid_remaining == ask_remaining {
                trades.push(trade(ask, bid, ask_remaining, product, timestamp));
                *bid_remaining = Decimal::ZERO;
                break;
            }

            if *bid_remaining > ask_remaining {
                trades.push(trade(ask, bid, ask_remaining, product, timestamp));
                *bid_remaining -= ask_remaining;
                break;
            }

            // Bid partially clears the ask
            trades.push(trade(ask, bid, *bid_remaining, product, timestamp));
            ask_remaining -= *bid_remaining;
            *bid_remaining = Decimal::ZERO;
        }
    }

    trades
}

/// Ask and bid belong to the same simulation account
fn self_cross(ask: &OrderRecord, bid: &OrderRecord) -> bool {
    !ask.is_dataset_owned() && ask.owner == bid.owner
}

/// Build the trade record for one fill
///
/// The leg is tagged for whichever side belongs to a simulation account, the
/// ask taking precedence. Fills between two dataset orders stay with the
/// dataset as ask trades.
fn trade(
    ask: &OrderRecord,
    bid: &OrderRecord,
    amount: Quantity,
    product: &Product,
    timestamp: &Timestamp,
) -> OrderRecord {
    let (side, owner) = if !ask.is_dataset_owned() {
        (OrderSide::AskTrade, &ask.owner)
    } else if !bid.is_dataset_owned() {
        (OrderSide::BidTrade, &bid.owner)
    } else {
        (OrderSide::AskTrade, &ask.owner)
    };

    debug!(
        "Fill: product={}, price={}, amount={}, side={}, owner={}",
        product, ask.price, amount, side, owner
    );

    OrderRecord {
        timestamp: timestamp.clone(),
        product: product.clone(),
        side,
        price: ask.price,
        amount,
        owner: owner.clone(),
    }
}
