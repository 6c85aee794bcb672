//! Declarative header field location.

use crate::error::ExtractionError;
use crate::models::config::HeaderLayout;
use crate::models::invoice::InvoiceHeader;

use super::patterns::{DUE_DATE_LABEL, INVOICE_DATE_LABEL, INVOICE_NUMBER_LABEL};

/// Header columns of the invoice template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    ClientName,
    PaymentTerms,
    ClientAddress,
}

impl HeaderField {
    /// Output column name.
    pub fn column(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "invoice_number",
            Self::InvoiceDate => "invoice_date",
            Self::DueDate => "due_date",
            Self::ClientName => "client_name",
            Self::PaymentTerms => "payment_terms",
            Self::ClientAddress => "client_address",
        }
    }

    fn assign(&self, header: &mut InvoiceHeader, value: String) {
        let slot = match self {
            Self::InvoiceNumber => &mut header.invoice_number,
            Self::InvoiceDate => &mut header.invoice_date,
            Self::DueDate => &mut header.due_date,
            Self::ClientName => &mut header.client_name,
            Self::PaymentTerms => &mut header.payment_terms,
            Self::ClientAddress => &mut header.client_address,
        };
        *slot = value;
    }
}

/// Where a field's line is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLocator {
    /// Fixed index into the raw page lines.
    Line(usize),
    /// First non-blank line starting with the label; the label is removed.
    Labeled(String),
    /// The non-blank line `offset` lines away from the line starting with `anchor`.
    Relative { anchor: String, offset: isize },
}

/// One header field and how to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: HeaderField,
    pub locator: FieldLocator,
    /// Prefix removed from the located line, when present.
    pub strip_label: Option<String>,
}

impl FieldSpec {
    pub fn new(field: HeaderField, locator: FieldLocator) -> Self {
        Self {
            field,
            locator,
            strip_label: None,
        }
    }

    /// Remove `label` from the start of the located line.
    pub fn stripping(mut self, label: &str) -> Self {
        self.strip_label = Some(label.to_string());
        self
    }
}

/// The full set of header fields for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    fields: Vec<FieldSpec>,
}

impl HeaderSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Schema for a built-in layout.
    pub fn for_layout(layout: HeaderLayout) -> Self {
        match layout {
            HeaderLayout::Labeled => Self::labeled(),
            HeaderLayout::Positional => Self::positional(),
        }
    }

    /// Fixed offsets 6-11 of the template page.
    pub fn positional() -> Self {
        use FieldLocator::Line;
        use HeaderField::*;

        Self::new(vec![
            FieldSpec::new(InvoiceNumber, Line(8)).stripping(INVOICE_NUMBER_LABEL),
            FieldSpec::new(InvoiceDate, Line(9)).stripping(INVOICE_DATE_LABEL),
            FieldSpec::new(DueDate, Line(10)).stripping(DUE_DATE_LABEL),
            FieldSpec::new(ClientName, Line(6)),
            FieldSpec::new(PaymentTerms, Line(11)),
            FieldSpec::new(ClientAddress, Line(7)),
        ])
    }

    /// Label-anchored: unlabeled fields sit at fixed distances from a label.
    pub fn labeled() -> Self {
        use FieldLocator::{Labeled, Relative};
        use HeaderField::*;

        let relative = |anchor: &str, offset| Relative {
            anchor: anchor.to_string(),
            offset,
        };

        Self::new(vec![
            FieldSpec::new(InvoiceNumber, Labeled(INVOICE_NUMBER_LABEL.to_string())),
            FieldSpec::new(InvoiceDate, Labeled(INVOICE_DATE_LABEL.to_string())),
            FieldSpec::new(DueDate, Labeled(DUE_DATE_LABEL.to_string())),
            FieldSpec::new(ClientName, relative(INVOICE_NUMBER_LABEL, -2)),
            FieldSpec::new(PaymentTerms, relative(DUE_DATE_LABEL, 1)),
            FieldSpec::new(ClientAddress, relative(INVOICE_NUMBER_LABEL, -1)),
        ])
    }

    /// Number of raw lines the positional fields need.
    pub fn required_lines(&self) -> usize {
        self.fields
            .iter()
            .filter_map(|spec| match spec.locator {
                FieldLocator::Line(index) => Some(index + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Locate every field in the page lines.
    pub fn locate(&self, lines: &[&str]) -> Result<InvoiceHeader, ExtractionError> {
        let required = self.required_lines();
        if lines.len() < required {
            return Err(ExtractionError::TooFewLines {
                found: lines.len(),
                required,
            });
        }

        let content: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let mut header = InvoiceHeader::default();
        for spec in &self.fields {
            let raw = match &spec.locator {
                FieldLocator::Line(index) => lines[*index].trim(),
                FieldLocator::Labeled(label) => {
                    let index = find_label(&content, label)?;
                    content[index].trim()[label.len()..].trim()
                }
                FieldLocator::Relative { anchor, offset } => {
                    let index = find_label(&content, anchor)?;
                    index
                        .checked_add_signed(*offset)
                        .and_then(|i| content.get(i))
                        .ok_or_else(|| ExtractionError::OutOfRange {
                            field: spec.field.column().to_string(),
                            anchor: anchor.clone(),
                            offset: *offset,
                        })?
                        .trim()
                }
            };

            let value = match &spec.strip_label {
                Some(label) => raw.strip_prefix(label.as_str()).unwrap_or(raw),
                None => raw,
            };
            spec.field.assign(&mut header, normalize(value));
        }

        Ok(header)
    }
}

impl Default for HeaderSchema {
    fn default() -> Self {
        Self::labeled()
    }
}

fn find_label(lines: &[&str], label: &str) -> Result<usize, ExtractionError> {
    lines
        .iter()
        .position(|line| line.trim_start().starts_with(label))
        .ok_or_else(|| ExtractionError::MissingLabel {
            label: label.to_string(),
        })
}

/// Trim and collapse internal whitespace runs (tabs included) to one space.
fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
