//! Invoice data models and the combined output table.

use std::io::Read;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document-level fields, repeated onto every line-item row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    /// Invoice number/identifier.
    pub invoice_number: String,

    /// Date the invoice was issued, as printed.
    pub invoice_date: String,

    /// Payment due date, as printed.
    pub due_date: String,

    /// Client (buyer) name.
    pub client_name: String,

    /// Payment terms line.
    pub payment_terms: String,

    /// Client address, single line.
    pub client_address: String,
}

/// A single row of the billing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Unit price with the currency symbol stripped.
    pub unit_price: Decimal,

    /// Quantity.
    pub quantity: i64,
}

/// Everything extracted from one invoice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub header: InvoiceHeader,
    pub line_items: Vec<LineItem>,
}

impl InvoiceRecord {
    /// Denormalize into one row per line item.
    ///
    /// A record without line items yields no rows.
    pub fn rows(&self) -> Vec<InvoiceRow> {
        self.line_items
            .iter()
            .map(|item| InvoiceRow::new(&self.header, item))
            .collect()
    }
}

/// One output row: header fields followed by line-item fields.
///
/// Field order here is the column order of every output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub client_name: String,
    pub payment_terms: String,
    pub client_address: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl InvoiceRow {
    pub fn new(header: &InvoiceHeader, item: &LineItem) -> Self {
        Self {
            invoice_number: header.invoice_number.clone(),
            invoice_date: header.invoice_date.clone(),
            due_date: header.due_date.clone(),
            client_name: header.client_name.clone(),
            payment_terms: header.payment_terms.clone(),
            client_address: header.client_address.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }

    /// Header part of this row.
    pub fn header(&self) -> InvoiceHeader {
        InvoiceHeader {
            invoice_number: self.invoice_number.clone(),
            invoice_date: self.invoice_date.clone(),
            due_date: self.due_date.clone(),
            client_name: self.client_name.clone(),
            payment_terms: self.payment_terms.clone(),
            client_address: self.client_address.clone(),
        }
    }

    /// String cells in column order, for writers that need plain text.
    pub fn text_cells(&self) -> [&str; 7] {
        [
            &self.invoice_number,
            &self.invoice_date,
            &self.due_date,
            &self.client_name,
            &self.payment_terms,
            &self.client_address,
            &self.description,
        ]
    }
}

/// Row-wise union of all documents' rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTable {
    rows: Vec<InvoiceRow>,
}

impl CombinedTable {
    /// Column names, in output order.
    pub const COLUMNS: [&'static str; 9] = [
        "invoice_number",
        "invoice_date",
        "due_date",
        "client_name",
        "payment_terms",
        "client_address",
        "description",
        "unit_price",
        "quantity",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[InvoiceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one document's rows, keeping them contiguous.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = InvoiceRow>) {
        self.rows.extend(rows);
    }

    /// Read a table back from delimited text with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::Reader::from_reader(reader);
        let rows = rdr
            .deserialize::<InvoiceRow>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }
}

impl From<Vec<InvoiceRow>> for CombinedTable {
    fn from(rows: Vec<InvoiceRow>) -> Self {
        Self { rows }
    }
}
