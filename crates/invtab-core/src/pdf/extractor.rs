//! PDF page text and table extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::collector::RunCollector;
use super::layout::group_lines;
use super::{PdfPage, PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF content extractor.
///
/// lopdf opens and decrypts the file; pdf-extract interprets page content
/// so text positions and characters come out fully resolved.
pub struct PdfExtractor {
    document: Option<Document>,
    text_document: Option<pdf_extract::Document>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            text_document: None,
            config: PdfConfig::default(),
        }
    }

    /// Set line grouping and table detection options.
    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    /// Text lines of a page, top of page first, cells separated by tabs.
    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        let doc = self
            .text_document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        let mut collector = RunCollector::new();
        pdf_extract::output_doc_page(doc, &mut collector, page)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let runs = collector.into_runs();
        trace!("Collected {} text runs from page {}", runs.len(), page);
        Ok(group_lines(&runs, self.config.line_tolerance))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let loaded = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            pdf_extract::Document::load_mem(&decrypted_data)
        } else {
            pdf_extract::Document::load_mem(data)
        };
        let text_document = loaded.map_err(|e| PdfError::Parse(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.text_document = Some(text_document);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page(&self, page: u32) -> Result<PdfPage> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let text = self.page_lines(page)?.join("\n");
        let pdf_page = PdfPage::from_text(page, text, self.config.min_table_columns);
        debug!(
            "Page {}: {} lines, {} tables",
            page,
            pdf_page.lines().len(),
            pdf_page.tables.len()
        );
        Ok(pdf_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        pdf_with_flipped_lines, pdf_with_runs, pdf_with_translated_lines, template_pdf,
    };
    use pretty_assertions::assert_eq;

    fn first_page(data: &[u8]) -> PdfPage {
        let mut extractor = PdfExtractor::new();
        extractor.load(data).unwrap();
        extractor.extract_page(1).unwrap()
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_extract_page_groups_runs() {
        let data = pdf_with_runs(&[
            (72, 720, "Acme Corp"),
            (72, 400, "Widget"),
            (300, 400, "$12.34"),
            (450, 400, "3"),
            (72, 420, "Description"),
            (300, 420, "Unit Price"),
            (450, 420, "Quantity"),
        ]);

        let page = first_page(&data);
        assert_eq!(
            page.lines(),
            vec!["Acme Corp", "Description\tUnit Price\tQuantity", "Widget\t$12.34\t3"]
        );
        assert_eq!(page.first_table().unwrap().data_rows().len(), 1);
    }

    #[test]
    fn test_template_pdf_has_twelve_header_lines() {
        let data = template_pdf("INV-100", &[("Widget", "$12.34", "3")]);

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.page_count(), 1);

        let page = extractor.extract_page(1).unwrap();
        let lines = page.lines();
        assert_eq!(lines[8], "Invoice Number: INV-100");
        assert_eq!(lines[11], "Payment Terms: Net 30");
        assert!(matches!(extractor.extract_page(2), Err(PdfError::InvalidPage(2))));
    }

    #[test]
    fn test_lines_placed_with_cm_stay_apart() {
        let data = pdf_with_translated_lines(&[
            (720, "Acme Corp"),
            (700, "1 Main St"),
            (680, "Invoice Number: INV-1"),
        ]);

        assert_eq!(
            first_page(&data).lines(),
            vec!["Acme Corp", "1 Main St", "Invoice Number: INV-1"]
        );
    }

    #[test]
    fn test_flipped_page_reads_top_down() {
        let data = pdf_with_flipped_lines(&[
            (100, "Invoice Number: INV-2"),
            (120, "Invoice Date: May 1"),
            (140, "Due Date: May 31"),
        ]);

        assert_eq!(
            first_page(&data).lines(),
            vec!["Invoice Number: INV-2", "Invoice Date: May 1", "Due Date: May 31"]
        );
    }
}
