//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::TemplateInvoiceParser;

use crate::error::ExtractionError;
use crate::models::invoice::InvoiceRecord;
use crate::pdf::PdfPage;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for invoice field extractors.
pub trait InvoiceExtractor {
    /// Extract the invoice record from a document's first page.
    fn extract(&self, page: &PdfPage) -> Result<InvoiceRecord>;

    /// Extract the invoice record from plain page text.
    fn extract_from_text(&self, text: &str) -> Result<InvoiceRecord>;
}
