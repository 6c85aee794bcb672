//! Comma-separated output.

use std::io::Write;

use crate::error::Result;
use crate::models::invoice::CombinedTable;

/// Write the table with a header row; the header is present even when empty.
pub fn write_csv<W: Write>(table: &CombinedTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CombinedTable::COLUMNS)?;
    for row in table.rows() {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::InvoiceRow;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_table_writes_header_only() {
        let mut buf = Vec::new();
        write_csv(&CombinedTable::new(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "invoice_number,invoice_date,due_date,client_name,payment_terms,\
             client_address,description,unit_price,quantity\n"
        );
    }

    #[test]
    fn test_quoting_and_round_trip() {
        let table = CombinedTable::from(vec![InvoiceRow {
            invoice_number: "INV-1".to_string(),
            invoice_date: "January 5, 2024".to_string(),
            due_date: "February 4, 2024".to_string(),
            client_name: "Globex \"West\"".to_string(),
            payment_terms: "Net 30".to_string(),
            client_address: "100 Market St, Shelbyville".to_string(),
            description: "Widget".to_string(),
            unit_price: Decimal::new(1234, 2),
            quantity: 3,
        }]);

        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        let data_line = text.lines().nth(1).unwrap();
        assert_eq!(
            data_line,
            r#"INV-1,"January 5, 2024","February 4, 2024","Globex ""West""",Net 30,"100 Market St, Shelbyville",Widget,12.34,3"#
        );

        assert_eq!(CombinedTable::from_csv_reader(buf.as_slice()).unwrap(), table);
    }
}
