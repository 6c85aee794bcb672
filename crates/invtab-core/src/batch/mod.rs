//! Batch aggregation over a directory of invoice documents.
//!
//! Documents are processed one at a time in file-name order and their rows
//! appended to a single [`CombinedTable`], each document's rows contiguous.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{InvtabError, PdfError, Result};
use crate::invoice::{InvoiceExtractor, TemplateInvoiceParser};
use crate::models::config::{ErrorPolicy, InvtabConfig, PdfConfig};
use crate::models::invoice::{CombinedTable, InvoiceRow};
use crate::pdf::{PdfExtractor, PdfPage, PdfProcessor};

/// File extension of input documents, compared case-insensitively.
const DOCUMENT_EXTENSION: &str = "pdf";

/// Turns a document's bytes into its first page.
pub trait DocumentLoader {
    fn first_page(&self, data: &[u8]) -> std::result::Result<PdfPage, PdfError>;
}

/// Loads real PDFs through [`PdfExtractor`].
#[derive(Debug, Clone, Default)]
pub struct PdfDocumentLoader {
    config: PdfConfig,
}

impl PdfDocumentLoader {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl DocumentLoader for PdfDocumentLoader {
    fn first_page(&self, data: &[u8]) -> std::result::Result<PdfPage, PdfError> {
        let mut extractor = PdfExtractor::new().with_config(self.config.clone());
        extractor.load(data)?;
        extractor.extract_page(1)
    }
}

/// A document left out under [`ErrorPolicy::Skip`].
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: InvtabError,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Rows of every successfully extracted document.
    pub table: CombinedTable,
    /// Number of documents that contributed to the table.
    pub processed: usize,
    /// Documents that failed and were skipped.
    pub skipped: Vec<SkippedDocument>,
}

/// Runs the extractor over many documents and unions the rows.
pub struct BatchAggregator<L = PdfDocumentLoader, E = TemplateInvoiceParser> {
    loader: L,
    extractor: E,
    policy: ErrorPolicy,
}

impl BatchAggregator {
    /// Aggregator with the PDF loader and template parser from configuration.
    pub fn from_config(config: &InvtabConfig) -> Self {
        Self::with_parts(
            PdfDocumentLoader::new(config.pdf.clone()),
            TemplateInvoiceParser::from_config(&config.extraction),
        )
        .with_policy(config.extraction.error_policy)
    }
}

impl<L: DocumentLoader, E: InvoiceExtractor> BatchAggregator<L, E> {
    pub fn with_parts(loader: L, extractor: E) -> Self {
        Self {
            loader,
            extractor,
            policy: ErrorPolicy::default(),
        }
    }

    /// Set the failure policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Aggregate every document in `dir`.
    pub fn aggregate(&self, dir: &Path) -> Result<BatchOutcome> {
        let documents = list_documents(dir)?;
        self.aggregate_documents(&documents, |_| {})
    }

    /// Aggregate the given documents in order, calling `on_done` after each.
    pub fn aggregate_documents<F>(&self, documents: &[PathBuf], mut on_done: F) -> Result<BatchOutcome>
    where
        F: FnMut(&Path),
    {
        let mut outcome = BatchOutcome::default();

        for path in documents {
            match self.process_document(path) {
                Ok(rows) => {
                    debug!("{}: {} rows", path.display(), rows.len());
                    outcome.table.extend(rows);
                    outcome.processed += 1;
                }
                Err(error) => match self.policy {
                    ErrorPolicy::Abort => return Err(error),
                    ErrorPolicy::Skip => {
                        warn!("Skipping {}: {}", path.display(), error);
                        outcome.skipped.push(SkippedDocument {
                            path: path.clone(),
                            error,
                        });
                    }
                },
            }
            on_done(path);
        }

        info!(
            "Aggregated {} rows from {} documents ({} skipped)",
            outcome.table.len(),
            outcome.processed,
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Extract one document's rows, attaching its path to any failure.
    pub fn process_document(&self, path: &Path) -> Result<Vec<InvoiceRow>> {
        let data = fs::read(path).map_err(|e| InvtabError::io(path, e))?;

        let page = self
            .loader
            .first_page(&data)
            .map_err(|source| InvtabError::Document {
                path: path.to_path_buf(),
                source,
            })?;

        let record = self
            .extractor
            .extract(&page)
            .map_err(|source| InvtabError::MalformedDocument {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(record.rows())
    }
}

/// Input documents in `dir`, sorted by file name.
///
/// Sub-directories and files without a `.pdf` extension are skipped.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| InvtabError::io(dir, e))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| InvtabError::io(dir, e))?.path();

        let is_document = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION));

        if is_document {
            documents.push(path);
        } else {
            debug!("Ignoring non-document entry {}", path.display());
        }
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} documents in {}", documents.len(), dir.display());
    Ok(documents)
}
