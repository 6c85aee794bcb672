//! Error types for the invtab-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the invtab library.
#[derive(Error, Debug)]
pub enum InvtabError {
    /// A document does not match the expected invoice template.
    #[error("malformed document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    /// A document could not be opened or read as a PDF.
    #[error("cannot open document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    /// I/O error on an input or output path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited-text output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet output error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Relational store error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse error category, as reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document does not follow the invoice template.
    MalformedDocument,
    /// Something could not be opened, read or written.
    IoFailure,
}

impl InvtabError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            _ => ErrorKind::IoFailure,
        }
    }

    /// Path of the offending document or file, if known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::MalformedDocument { path, .. }
            | Self::Document { path, .. }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Ways a page can fail to match the invoice template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The page text is shorter than the header layout needs.
    #[error("page text has {found} lines, at least {required} required")]
    TooFewLines { found: usize, required: usize },

    /// A header label was not found on the page.
    #[error("missing header label {label:?}")]
    MissingLabel { label: String },

    /// A relative field points outside the page text.
    #[error("field {field} is {offset:+} lines from {anchor:?}, outside the page text")]
    OutOfRange {
        field: String,
        anchor: String,
        offset: isize,
    },

    /// No table was detected on the page.
    #[error("no line-item table found")]
    MissingTable,

    /// The first table has a header row but no data rows.
    #[error("line-item table has no data rows")]
    EmptyTable,

    /// A data row has too few cells.
    #[error("table row {row}: expected at least 3 columns, found {found}")]
    ShortRow { row: usize, found: usize },

    /// A unit price is not a currency-prefixed decimal.
    #[error("table row {row}: invalid unit_price {value:?}")]
    InvalidPrice { row: usize, value: String },

    /// A quantity is not an integer.
    #[error("table row {row}: invalid quantity {value:?}")]
    InvalidQuantity { row: usize, value: String },
}

/// Result type for the invtab library.
pub type Result<T> = std::result::Result<T, InvtabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let malformed = InvtabError::MalformedDocument {
            path: PathBuf::from("data/raw/a.pdf"),
            source: ExtractionError::MissingTable,
        };
        assert_eq!(malformed.kind(), ErrorKind::MalformedDocument);

        let unreadable = InvtabError::Document {
            path: PathBuf::from("data/raw/b.pdf"),
            source: PdfError::NoPages,
        };
        assert_eq!(unreadable.kind(), ErrorKind::IoFailure);
        assert_eq!(unreadable.path(), Some(std::path::Path::new("data/raw/b.pdf")));
    }

    #[test]
    fn test_message_names_path_and_field() {
        let err = InvtabError::MalformedDocument {
            path: PathBuf::from("data/raw/inv-7.pdf"),
            source: ExtractionError::InvalidPrice {
                row: 2,
                value: "12.34".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("data/raw/inv-7.pdf"));
        assert!(msg.contains("unit_price"));
        assert!(msg.contains("row 2"));
    }
}
