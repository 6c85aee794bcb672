//! SQLite table output with drop-and-recreate semantics.

use std::path::Path;
use std::str::FromStr;

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::error::Result;
use crate::models::invoice::{CombinedTable, InvoiceRow};

/// Replace `table_name` in the store at `path` with the table's rows.
///
/// The drop, create and inserts share one transaction; other tables in the
/// store are left alone. `table_name` must already be a validated identifier.
pub fn replace_table(table: &CombinedTable, path: &Path, table_name: &str) -> Result<()> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS \"{table_name}\";
         CREATE TABLE \"{table_name}\" (
             invoice_number TEXT,
             invoice_date TEXT,
             due_date TEXT,
             client_name TEXT,
             payment_terms TEXT,
             client_address TEXT,
             description TEXT,
             unit_price REAL,
             quantity INTEGER
         );"
    ))?;

    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO \"{table_name}\" ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            CombinedTable::COLUMNS.join(", ")
        ))?;

        for row in table.rows() {
            stmt.execute(params![
                row.invoice_number,
                row.invoice_date,
                row.due_date,
                row.client_name,
                row.payment_terms,
                row.client_address,
                row.description,
                row.unit_price.to_f64().unwrap_or_default(),
                row.quantity,
            ])?;
        }
    }

    tx.commit()?;
    debug!("Replaced table {} with {} rows", table_name, table.len());
    Ok(())
}

/// Read `table_name` back in insertion order.
pub fn read_table(path: &Path, table_name: &str) -> Result<CombinedTable> {
    let conn = Connection::open(path)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT invoice_number, invoice_date, due_date, client_name, payment_terms,
                client_address, description, CAST(unit_price AS TEXT), quantity
         FROM \"{table_name}\" ORDER BY rowid"
    ))?;

    let rows = stmt
        .query_map([], |r| {
            let price: String = r.get(7)?;
            Ok(InvoiceRow {
                invoice_number: r.get(0)?,
                invoice_date: r.get(1)?,
                due_date: r.get(2)?,
                client_name: r.get(3)?,
                payment_terms: r.get(4)?,
                client_address: r.get(5)?,
                description: r.get(6)?,
                unit_price: Decimal::from_str(&price).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        7,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                quantity: r.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(CombinedTable::from(rows))
}
