use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price value - quote currency per unit of base, uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - amount of base currency, uses Decimal for precision
pub type Quantity = Decimal;

/// Simulation timestamp
///
/// An opaque token compared byte-wise as text, never parsed as a date.
/// Ordering is only chronological when the dataset writes timestamps in a
/// fixed-width, zero-padded form such as `2020/03/17 17:01:24.884492`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self(s)
    }
}
