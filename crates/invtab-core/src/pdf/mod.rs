//! PDF text/table source.
//!
//! Yields a page's text as lines plus the tables detected on it. Everything
//! downstream works on [`PdfPage`], so tests can build pages from plain text.

mod collector;
mod extractor;
pub mod layout;
pub mod table;

pub use extractor::PdfExtractor;
pub use table::Table;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Content from a single PDF page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Reconstructed text, one line per `\n`.
    pub text: String,
    /// Tables detected on this page, in page order.
    pub tables: Vec<Table>,
}

impl PdfPage {
    /// Build a page from text, detecting tables with the given minimum width.
    pub fn from_text(number: u32, text: impl Into<String>, min_table_columns: usize) -> Self {
        let text = text.into();
        let tables = table::detect_tables(text.split('\n'), min_table_columns);
        Self {
            number,
            text,
            tables,
        }
    }

    /// Text lines in page order.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    pub fn first_table(&self) -> Option<&Table> {
        self.tables.first()
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text and tables from a specific page.
    fn extract_page(&self, page: u32) -> Result<PdfPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_text() {
        let page = PdfPage::from_text(1, "Title\nItem  Price  Qty\nWidget  $1.00  2", 3);
        assert_eq!(page.lines().len(), 3);
        assert_eq!(page.first_table().unwrap().data_rows().len(), 1);
    }
}
