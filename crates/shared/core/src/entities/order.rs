use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderSide, Product, RecordError};
use crate::values::{Price, Quantity, Timestamp};

/// Owner assigned to records loaded from historical data
pub const DATASET_OWNER: &str = "dataset";

/// One order, or one leg of an executed trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub timestamp: Timestamp,
    pub product: Product,
    pub side: OrderSide,
    /// Quote currency per unit of base
    pub price: Price,
    /// Quantity of base currency
    pub amount: Quantity,
    /// Account the record belongs to
    pub owner: String,
}

impl OrderRecord {
    /// Create a record owned by the dataset, checking the record invariants
    pub fn new(
        timestamp: impl Into<Timestamp>,
        product: impl Into<Product>,
        side: OrderSide,
        price: Price,
        amount: Quantity,
    ) -> Result<Self, RecordError> {
        let product = product.into();
        if product.is_empty() {
            return Err(RecordError::EmptyProduct);
        }
        if price < Decimal::ZERO {
            return Err(RecordError::NegativePrice(price));
        }
        if amount < Decimal::ZERO {
            return Err(RecordError::NegativeAmount(amount));
        }

        Ok(Self {
            timestamp: timestamp.into(),
            product,
            side,
            price,
            amount,
            owner: DATASET_OWNER.to_string(),
        })
    }

    /// Set the owning account
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// True if the record came from the historical dataset
    pub fn is_dataset_owned(&self) -> bool {
        self.owner == DATASET_OWNER
    }

    /// Quote-currency value of the record (price * amount)
    ///
    /// `None` when the product does not fit in a `Decimal`.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.amount)
    }

    /// Orders two records by timestamp only
    pub fn compare_by_timestamp(a: &OrderRecord, b: &OrderRecord) -> Ordering {
        a.timestamp.cmp(&b.timestamp)
    }
}
