use std::fmt;

use serde::{Deserialize, Serialize};

/// Traded product in `BASE/QUOTE` form (e.g. `ETH/BTC`)
///
/// Price is expressed in QUOTE per unit of BASE. The book only needs the
/// identifier to be comparable; splitting into currencies is left to the
/// ledger, which is the only consumer of the two halves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(String);

impl Product {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into `(base, quote)`; `None` unless both halves are non-empty
    pub fn currencies(&self) -> Option<(&str, &str)> {
        let (base, quote) = self.0.split_once('/')?;
        if base.is_empty() || quote.is_empty() || quote.contains('/') {
            return None;
        }
        Some((base, quote))
    }

    /// Base currency (the one being bought/sold)
    pub fn base(&self) -> Option<&str> {
        self.currencies().map(|(base, _)| base)
    }

    /// Quote currency (the one used to price the base)
    pub fn quote(&self) -> Option<&str> {
        self.currencies().map(|(_, quote)| quote)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Product {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Product {
    fn from(s: String) -> Self {
        Self(s)
    }
}
