//! Labels and patterns of the invoice template.

use lazy_static::lazy_static;
use regex::Regex;

pub const INVOICE_NUMBER_LABEL: &str = "Invoice Number:";
pub const INVOICE_DATE_LABEL: &str = "Invoice Date:";
pub const DUE_DATE_LABEL: &str = "Due Date:";

lazy_static! {
    // Decimal amount, optionally with comma thousands separators: 1234.5, 1,234.56
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$"
    ).unwrap();

    // Whole number with optional sign
    pub static ref QUANTITY_PATTERN: Regex = Regex::new(
        r"^[+-]?\d+$"
    ).unwrap();
}
