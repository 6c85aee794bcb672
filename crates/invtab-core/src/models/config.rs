//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{InvtabError, Result};

/// Main configuration for the invtab pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvtabConfig {
    /// Input and output roots.
    pub paths: PathsConfig,

    /// PDF text and table reconstruction.
    pub pdf: PdfConfig,

    /// Invoice field extraction.
    pub extraction: ExtractionConfig,

    /// Output artifact names.
    pub output: OutputConfig,
}

/// Where documents are read from and artifacts written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory containing invoice PDFs.
    pub input_dir: PathBuf,

    /// Directory receiving the CSV, spreadsheet and database files.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/processed"),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum baseline distance (points) for text runs on the same line.
    pub line_tolerance: f32,

    /// Minimum cells per line for it to count as a table row.
    pub min_table_columns: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 3.0,
            min_table_columns: 3,
        }
    }
}

/// How header fields are located in the page text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    /// Anchor on the printed labels; blank lines are ignored.
    #[default]
    Labeled,
    /// Fixed line offsets 6-11 of the template.
    Positional,
}

/// What a batch does when one document fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing document.
    #[default]
    Abort,
    /// Log the failure, leave the document out and keep going.
    Skip,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Header field location scheme.
    pub layout: HeaderLayout,

    /// Currency symbol every unit price must start with.
    pub currency_symbol: String,

    /// Batch behaviour on a failing document.
    pub error_policy: ErrorPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layout: HeaderLayout::Labeled,
            currency_symbol: "$".to_string(),
            error_policy: ErrorPolicy::Abort,
        }
    }
}

/// Output artifact names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Delimited-text file name.
    pub csv_file: String,

    /// Spreadsheet file name.
    pub xlsx_file: String,

    /// SQLite store file name.
    pub sqlite_file: String,

    /// Worksheet name inside the spreadsheet.
    pub sheet_name: String,

    /// Table replaced inside the SQLite store.
    pub table_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_file: "invoice_data.csv".to_string(),
            xlsx_file: "invoice_data.xlsx".to_string(),
            sqlite_file: "invoice_data.db".to_string(),
            sheet_name: "Sheet1".to_string(),
            table_name: "invoices".to_string(),
        }
    }
}

impl OutputConfig {
    /// Reject table names that cannot be used as a bare SQL identifier.
    pub fn validate(&self) -> Result<()> {
        let name = &self.table_name;
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(InvtabError::Config(format!(
                "table_name {name:?} must be letters, digits and underscores"
            )));
        }

        for file in [&self.csv_file, &self.xlsx_file, &self.sqlite_file] {
            if file.is_empty() || file.contains(['/', '\\']) {
                return Err(InvtabError::Config(format!(
                    "output file name {file:?} must be a plain file name"
                )));
            }
        }
        Ok(())
    }
}

impl InvtabConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InvtabError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| InvtabError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| InvtabError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| InvtabError::io(path, e))
    }

    /// Value at a dotted key such as `output.table_name`.
    pub fn get_key(&self, key: &str) -> Result<serde_json::Value> {
        let json = self.to_json()?;
        key.split('.')
            .try_fold(&json, |value, part| value.get(part))
            .cloned()
            .ok_or_else(|| unknown_key(key))
    }

    /// Set the value at an existing dotted key.
    ///
    /// `raw` is read as JSON when it parses, as a plain string otherwise.
    /// The updated configuration must still deserialize and validate;
    /// on failure `self` is left unchanged.
    pub fn set_key(&mut self, key: &str, raw: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));

        let (parents, last) = match key.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, key),
        };

        let mut json = self.to_json()?;
        let parent = match parents {
            Some(parents) => parents
                .split('.')
                .try_fold(&mut json, |value, part| value.get_mut(part))
                .ok_or_else(|| unknown_key(key))?,
            None => &mut json,
        };

        match parent.get_mut(last) {
            Some(slot) if !slot.is_object() => *slot = value.clone(),
            Some(_) => {
                return Err(InvtabError::Config(format!(
                    "{key} is a section, set one of its keys instead"
                )));
            }
            None => return Err(unknown_key(key)),
        }

        let updated: InvtabConfig = serde_json::from_value(json)
            .map_err(|e| InvtabError::Config(format!("invalid value for {key}: {e}")))?;
        updated.output.validate()?;

        *self = updated;
        Ok(value)
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| InvtabError::Config(e.to_string()))
    }
}

fn unknown_key(key: &str) -> InvtabError {
    InvtabError::Config(format!("unknown configuration key {key:?}"))
}
