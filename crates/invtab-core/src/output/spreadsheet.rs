//! Single-sheet XLSX output.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use crate::error::Result;
use crate::models::invoice::CombinedTable;

/// Render the table as an XLSX workbook.
///
/// The creation timestamp is pinned so identical tables give identical bytes.
pub fn render_xlsx(table: &CombinedTable, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let bold = Format::new().set_bold();
    for (col, name) in CombinedTable::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let r = i as u32 + 1;
        for (col, text) in row.text_cells().iter().enumerate() {
            worksheet.write_string(r, col as u16, *text)?;
        }
        worksheet.write_number(r, 7, row.unit_price.to_f64().unwrap_or_default())?;
        worksheet.write_number(r, 8, row.quantity as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}
