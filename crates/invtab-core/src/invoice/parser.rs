//! Template invoice parser: header schema plus first-table line items.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, HeaderLayout, PdfConfig};
use crate::models::invoice::{InvoiceRecord, LineItem};
use crate::pdf::{PdfPage, Table};

use super::rules::{HeaderSchema, parse_quantity, parse_unit_price};
use super::{InvoiceExtractor, Result};

/// Columns a line-item row must have: description, unit price, quantity.
const LINE_ITEM_COLUMNS: usize = 3;

/// Parser for the single fixed invoice template.
#[derive(Debug, Clone)]
pub struct TemplateInvoiceParser {
    /// Where header fields are found.
    schema: HeaderSchema,
    /// Symbol every unit price starts with.
    currency_symbol: String,
    /// Minimum cells per table row when detecting tables from plain text.
    min_table_columns: usize,
}

impl TemplateInvoiceParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            schema: HeaderSchema::default(),
            currency_symbol: "$".to_string(),
            min_table_columns: PdfConfig::default().min_table_columns,
        }
    }

    /// Build a parser from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_layout(config.layout)
            .with_currency_symbol(&config.currency_symbol)
    }

    /// Use a built-in header layout.
    pub fn with_layout(mut self, layout: HeaderLayout) -> Self {
        self.schema = HeaderSchema::for_layout(layout);
        self
    }

    /// Use a custom header schema.
    pub fn with_schema(mut self, schema: HeaderSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the expected currency symbol.
    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }

    fn extract_line_items(&self, table: &Table) -> Result<Vec<LineItem>> {
        let data_rows = table.data_rows();
        if data_rows.is_empty() {
            return Err(ExtractionError::EmptyTable);
        }

        data_rows
            .iter()
            .enumerate()
            .map(|(i, cells)| -> Result<LineItem> {
                // Row numbers count the header as row 0.
                let row = i + 1;
                let [description, price, quantity, ..] = cells.as_slice() else {
                    return Err(ExtractionError::ShortRow {
                        row,
                        found: cells.len(),
                    });
                };

                Ok(LineItem {
                    description: description.trim().to_string(),
                    unit_price: parse_unit_price(price, &self.currency_symbol, row)?,
                    quantity: parse_quantity(quantity, row)?,
                })
            })
            .collect()
    }
}

impl Default for TemplateInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for TemplateInvoiceParser {
    fn extract(&self, page: &PdfPage) -> Result<InvoiceRecord> {
        let header = self.schema.locate(&page.lines())?;

        let table = page.first_table().ok_or(ExtractionError::MissingTable)?;
        let line_items = self.extract_line_items(table)?;

        debug!(
            "Extracted invoice {} with {} line items (table is {} columns wide, {} used)",
            header.invoice_number,
            line_items.len(),
            table.num_cols(),
            LINE_ITEM_COLUMNS
        );

        Ok(InvoiceRecord { header, line_items })
    }

    fn extract_from_text(&self, text: &str) -> Result<InvoiceRecord> {
        self.extract(&PdfPage::from_text(1, text, self.min_table_columns))
    }
}
