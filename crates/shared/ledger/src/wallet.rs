use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use rex_core::{OrderRecord, OrderSide, Quantity};
use rex_ports::{Ledger, LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency balances of one simulation account
///
/// Balances are keyed by currency code (e.g. `BTC`) and kept sorted so the
/// wallet always prints in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    currencies: BTreeMap<String, Decimal>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add currency to the wallet
    pub fn deposit(&mut self, currency: impl Into<String>, amount: Quantity) -> LedgerResult<()> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }
        let currency = currency.into();
        let balance = self
            .balance(&currency)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(currency.clone()))?;
        debug!("Deposit: currency={}, amount={}", currency, amount);
        self.currencies.insert(currency, balance);
        Ok(())
    }

    /// Remove currency from the wallet
    ///
    /// Returns `Ok(false)` and leaves the wallet untouched when the currency
    /// is not held in at least `amount`.
    pub fn withdraw(&mut self, currency: &str, amount: Quantity) -> LedgerResult<bool> {
        if !self.contains(currency, amount)? {
            return Ok(false);
        }
        if let Some(balance) = self.currencies.get_mut(currency) {
            *balance -= amount;
        }
        Ok(true)
    }

    /// Check whether the wallet holds at least `amount` of `currency`
    pub fn contains(&self, currency: &str, amount: Quantity) -> LedgerResult<bool> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(self
            .currencies
            .get(currency)
            .is_some_and(|balance| *balance >= amount))
    }

    /// Current balance, zero for currencies never held
    pub fn balance(&self, currency: &str) -> Decimal {
        self.currencies
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of currencies held
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.currencies.iter().map(|(c, b)| (c.as_str(), *b))
    }

    fn notional_of(record: &OrderRecord, quote: &str) -> LedgerResult<Decimal> {
        record
            .notional()
            .ok_or_else(|| LedgerError::Overflow(quote.to_string()))
    }

    fn currencies_of(record: &OrderRecord) -> LedgerResult<(&str, &str)> {
        record
            .product
            .currencies()
            .ok_or_else(|| LedgerError::MalformedProduct(record.product.to_string()))
    }
}

impl Ledger for Wallet {
    fn can_afford(&self, order: &OrderRecord) -> LedgerResult<bool> {
        let (base, quote) = Self::currencies_of(order)?;

        // An ask sells base for quote, a bid spends quote to buy base
        let (currency, required) = match order.side {
            OrderSide::Ask => (base, order.amount),
            OrderSide::Bid => (quote, Self::notional_of(order, quote)?),
            side => return Err(LedgerError::UnsupportedSide(side)),
        };

        let affordable = self.contains(currency, required)?;
        debug!(
            "Affordability: currency={}, required={}, held={}, affordable={}",
            currency,
            required,
            self.balance(currency),
            affordable
        );
        Ok(affordable)
    }

    fn settle(&mut self, trade: &OrderRecord) -> LedgerResult<()> {
        let (base, quote) = Self::currencies_of(trade)?;

        let (outgoing, outgoing_amount, incoming, incoming_amount) = match trade.side {
            OrderSide::AskTrade => (base, trade.amount, quote, Self::notional_of(trade, quote)?),
            OrderSide::BidTrade => (quote, Self::notional_of(trade, quote)?, base, trade.amount),
            side => return Err(LedgerError::UnsupportedSide(side)),
        };

        if self.balance(outgoing) < outgoing_amount {
            warn!(
                "Settlement overdraws {}: balance={}, debit={}",
                outgoing,
                self.balance(outgoing),
                outgoing_amount
            );
        }

        // Both legs are computed before either balance changes
        let outgoing_balance = self
            .balance(outgoing)
            .checked_sub(outgoing_amount)
            .ok_or_else(|| LedgerError::Overflow(outgoing.to_string()))?;
        let incoming_start = if incoming == outgoing {
            outgoing_balance
        } else {
            self.balance(incoming)
        };
        let incoming_balance = incoming_start
            .checked_add(incoming_amount)
            .ok_or_else(|| LedgerError::Overflow(incoming.to_string()))?;

        self.currencies
            .insert(outgoing.to_string(), outgoing_balance);
        self.currencies
            .insert(incoming.to_string(), incoming_balance);

        info!(
            "Settled {}: -{} {}, +{} {}",
            trade.side, outgoing_amount, outgoing, incoming_amount, incoming
        );
        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (currency, amount) in &self.currencies {
            writeln!(f, "{} : {}", currency, amount)?;
        }
        Ok(())
    }
}
