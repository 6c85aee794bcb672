//! Core library for invoice table extraction.
//!
//! This crate provides:
//! - PDF text and table reconstruction for the first page of a document
//! - Invoice header and line-item extraction for a fixed template
//! - Batch aggregation of a directory into one combined table
//! - CSV, XLSX and SQLite export of the combined table

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
pub mod output;
pub mod pdf;

#[cfg(test)]
mod testutil;

pub use batch::{BatchAggregator, BatchOutcome, DocumentLoader, PdfDocumentLoader, list_documents};
pub use error::{ErrorKind, ExtractionError, InvtabError, PdfError, Result};
pub use invoice::{InvoiceExtractor, TemplateInvoiceParser};
pub use models::config::{ErrorPolicy, HeaderLayout, InvtabConfig};
pub use models::invoice::{CombinedTable, InvoiceHeader, InvoiceRecord, InvoiceRow, LineItem};
pub use output::{WriteReport, write_all};
pub use pdf::{PdfExtractor, PdfPage, PdfProcessor, Table};
