//! Multi-format persistence of the combined table.
//!
//! CSV and XLSX files are written to a temporary file in the output
//! directory and renamed into place; the SQLite table is replaced inside a
//! transaction. The three artifacts are not updated atomically as a set.

mod database;
mod delimited;
mod spreadsheet;

pub use database::{read_table, replace_table};
pub use delimited::write_csv;
pub use spreadsheet::render_xlsx;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{InvtabError, Result};
use crate::models::config::OutputConfig;
use crate::models::invoice::CombinedTable;

/// Paths written by [`write_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub sqlite_path: PathBuf,
    pub rows: usize,
}

/// Write the table as CSV, XLSX and a SQLite table under `output_dir`.
pub fn write_all(
    table: &CombinedTable,
    output_dir: &Path,
    config: &OutputConfig,
) -> Result<WriteReport> {
    config.validate()?;
    fs::create_dir_all(output_dir).map_err(|e| InvtabError::io(output_dir, e))?;

    let report = WriteReport {
        csv_path: output_dir.join(&config.csv_file),
        xlsx_path: output_dir.join(&config.xlsx_file),
        sqlite_path: output_dir.join(&config.sqlite_file),
        rows: table.len(),
    };

    write_atomically(&report.csv_path, |file| write_csv(table, file))?;
    debug!("Wrote {}", report.csv_path.display());

    let workbook = render_xlsx(table, &config.sheet_name)?;
    write_atomically(&report.xlsx_path, |file| {
        file.write_all(&workbook)
            .map_err(|e| InvtabError::io(&report.xlsx_path, e))
    })?;
    debug!("Wrote {}", report.xlsx_path.display());

    replace_table(table, &report.sqlite_path, &config.table_name)?;
    debug!("Wrote {}", report.sqlite_path.display());

    info!("Stored {} rows in {}", report.rows, output_dir.display());
    Ok(report)
}

/// Write through a temporary sibling file, then rename it over `path`.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InvtabError::io(dir, e))?;

    write(tmp.as_file_mut())?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| InvtabError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| InvtabError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::InvoiceRow;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn table() -> CombinedTable {
        let row = |number: &str, description: &str, cents: i64, quantity: i64| InvoiceRow {
            invoice_number: number.to_string(),
            invoice_date: "January 5, 2024".to_string(),
            due_date: "February 4, 2024".to_string(),
            client_name: format!("Client {number}"),
            payment_terms: "Net 30".to_string(),
            client_address: "100 Market St, Shelbyville".to_string(),
            description: description.to_string(),
            unit_price: Decimal::new(cents, 2),
            quantity,
        };
        CombinedTable::from(vec![
            row("INV-1", "Widget", 1234, 3),
            row("INV-1", "Gadget", 0, 1),
            row("INV-2", "Service", 9900, 1),
        ])
    }

    #[test]
    fn test_write_all_creates_directory_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data").join("processed");

        let report = write_all(&table(), &out, &OutputConfig::default()).unwrap();

        assert_eq!(report.rows, 3);
        assert!(report.xlsx_path.is_file());
        let csv = fs::read(&report.csv_path).unwrap();
        assert_eq!(CombinedTable::from_csv_reader(csv.as_slice()).unwrap(), table());
        assert_eq!(read_table(&report.sqlite_path, "invoices").unwrap(), table());

        // Only the three artifacts remain; no temporary files are left behind.
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig::default();

        let first = write_all(&table(), dir.path(), &config).unwrap();
        let csv = fs::read(&first.csv_path).unwrap();
        let xlsx = fs::read(&first.xlsx_path).unwrap();

        let second = write_all(&table(), dir.path(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&second.csv_path).unwrap(), csv);
        assert_eq!(fs::read(&second.xlsx_path).unwrap(), xlsx);
        assert_eq!(read_table(&second.sqlite_path, "invoices").unwrap().len(), 3);
    }

    #[test]
    fn test_empty_table_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_all(&CombinedTable::new(), dir.path(), &OutputConfig::default()).unwrap();

        let csv = fs::read_to_string(&report.csv_path).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("invoice_number,"));
        assert!(report.xlsx_path.is_file());
        assert!(read_table(&report.sqlite_path, "invoices").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_table_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            table_name: "drop me".to_string(),
            ..OutputConfig::default()
        };

        let err = write_all(&table(), &dir.path().join("out"), &config).unwrap_err();
        assert!(matches!(err, InvtabError::Config(_)));
        assert!(!dir.path().join("out").exists());
    }
}
