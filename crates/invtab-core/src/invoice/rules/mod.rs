//! Rule-based field parsing for the invoice template.

pub mod amounts;
pub mod fields;
pub mod patterns;

pub use amounts::{format_price, parse_quantity, parse_unit_price};
pub use fields::{FieldLocator, FieldSpec, HeaderField, HeaderSchema};
pub use patterns::*;
