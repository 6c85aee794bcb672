//! Unit price and quantity parsing for line-item cells.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_PATTERN, QUANTITY_PATTERN};
use crate::error::ExtractionError;

/// Parse a currency-prefixed price such as `$1,234.56`.
///
/// The cell must start with `symbol`; `row` is only used for error reporting.
pub fn parse_unit_price(cell: &str, symbol: &str, row: usize) -> Result<Decimal, ExtractionError> {
    let invalid = || ExtractionError::InvalidPrice {
        row,
        value: cell.to_string(),
    };

    let amount = cell.trim().strip_prefix(symbol).ok_or_else(invalid)?.trim();
    if !AMOUNT_PATTERN.is_match(amount) {
        return Err(invalid());
    }

    Decimal::from_str(&amount.replace(',', "")).map_err(|_| invalid())
}

/// Parse an integer quantity; fractional or non-numeric cells are rejected.
pub fn parse_quantity(cell: &str, row: usize) -> Result<i64, ExtractionError> {
    let value = cell.trim();
    if !QUANTITY_PATTERN.is_match(value) {
        return Err(ExtractionError::InvalidQuantity {
            row,
            value: cell.to_string(),
        });
    }

    value.parse().map_err(|_| ExtractionError::InvalidQuantity {
        row,
        value: cell.to_string(),
    })
}

/// Format a price back with its currency symbol, two decimals.
pub fn format_price(price: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, price)
}
