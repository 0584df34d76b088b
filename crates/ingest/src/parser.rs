use rex_core::{OrderRecord, OrderSide};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::IngestError;

/// Number of fields in one record line
pub const FIELD_COUNT: usize = 5;

/// Split a line on `separator`
///
/// Separators at either end are ignored and every token is whitespace
/// trimmed, so `",a,b,"` gives `["a", "b"]` and a line made only of
/// separators gives no tokens at all. Empty fields in the middle are kept.
pub fn tokenise(line: &str, separator: char) -> Vec<&str> {
    let line = line.trim().trim_matches(separator);
    if line.is_empty() {
        return Vec::new();
    }
    line.split(separator).map(str::trim).collect()
}

/// Parse a decimal field, accepting plain and scientific notation
pub fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, IngestError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| IngestError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Build a record from `timestamp, product, side, price, amount` tokens
pub fn parse_tokens(tokens: &[&str]) -> Result<OrderRecord, IngestError> {
    let [timestamp, product, side, price, amount] = tokens else {
        return Err(IngestError::FieldCount {
            expected: FIELD_COUNT,
            found: tokens.len(),
        });
    };

    let side: OrderSide = side.parse()?;
    let price = parse_decimal("price", price)?;
    let amount = parse_decimal("amount", amount)?;

    Ok(OrderRecord::new(*timestamp, *product, side, price, amount)?)
}

/// Tokenise and parse one line of text
pub fn parse_line(line: &str) -> Result<OrderRecord, IngestError> {
    parse_tokens(&tokenise(line, ','))
}
