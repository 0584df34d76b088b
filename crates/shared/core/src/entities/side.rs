use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RecordError;

/// Side of an order record
///
/// `Bid` and `Ask` are resting interest. `AskTrade` and `BidTrade` only ever
/// appear on records produced by matching, and tell the ledger which leg of
/// the trade belongs to the record's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Bid,
    Ask,
    AskTrade,
    BidTrade,
}

impl OrderSide {
    /// True for sides accepted as input (bid, ask)
    pub fn is_order(&self) -> bool {
        matches!(self, OrderSide::Bid | OrderSide::Ask)
    }

    /// True for sides produced by matching
    pub fn is_trade(&self) -> bool {
        !self.is_order()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Bid => "bid",
            OrderSide::Ask => "ask",
            OrderSide::AskTrade => "ask_trade",
            OrderSide::BidTrade => "bid_trade",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the two order sides parse; trade tags are never accepted as input.
impl FromStr for OrderSide {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bid" => Ok(OrderSide::Bid),
            "ask" => Ok(OrderSide::Ask),
            other => Err(RecordError::UnknownSide(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_sides() {
        assert_eq!("bid".parse::<OrderSide>(), Ok(OrderSide::Bid));
        assert_eq!("ask".parse::<OrderSide>(), Ok(OrderSide::Ask));
    }

    #[test]
    fn test_trade_tags_are_not_input() {
        assert!("ask_trade".parse::<OrderSide>().is_err());
        assert!("bid_trade".parse::<OrderSide>().is_err());
        assert_eq!(
            "Bid".parse::<OrderSide>(),
            Err(RecordError::UnknownSide("Bid".to_string()))
        );
    }

    #[test]
    fn test_side_classification() {
        assert!(OrderSide::Bid.is_order());
        assert!(OrderSide::Ask.is_order());
        assert!(OrderSide::AskTrade.is_trade());
        assert!(OrderSide::BidTrade.is_trade());
    }
}
