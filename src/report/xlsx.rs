use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::Result;
use crate::pipeline::cytotox::CytotoxTable;
use crate::report::round_3;

pub const DEFAULT_OUTPUT: &str = "output.xlsx";
pub const READING_NUM_FORMAT: &str = "0.000";

/// Writes the reshaped table to a single-sheet workbook.
pub fn write_cytotox_xlsx(table: &CytotoxTable, path: &Path) -> Result<()> {
    let mut workbook = build_cytotox_workbook(table)?;
    workbook.save(path)?;
    tracing::info!("wrote {} rows to {}", table.records.len(), path.display());
    Ok(())
}

/// Column 0 holds the plate row label, then one numeric column per reshape
/// column, then `drug` and `filename`. The index header cell stays empty.
pub fn build_cytotox_workbook(table: &CytotoxTable) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let reading = Format::new().set_num_format(READING_NUM_FORMAT);
    let sheet = workbook.add_worksheet();

    for (i, column) in table.columns.iter().enumerate() {
        sheet.write_number_with_format(0, (i + 1) as u16, *column as f64, &bold)?;
    }
    let drug_col = (table.columns.len() + 1) as u16;
    sheet.write_string_with_format(0, drug_col, "drug", &bold)?;
    sheet.write_string_with_format(0, drug_col + 1, "filename", &bold)?;

    for (r, rec) in table.records.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string_with_format(row, 0, &rec.row_label, &bold)?;
        for (i, &v) in rec.values.iter().enumerate() {
            write_reading(sheet, row, (i + 1) as u16, v, &reading)?;
        }
        sheet.write_string(row, drug_col, &rec.drug)?;
        sheet.write_string(row, drug_col + 1, &rec.filename)?;
    }

    Ok(workbook)
}

/// Excel has no NaN or infinity: NaN stays blank, infinities become text.
fn write_reading(sheet: &mut Worksheet, row: u32, col: u16, v: f64, format: &Format) -> Result<()> {
    if v.is_nan() {
        return Ok(());
    }
    if v.is_infinite() {
        sheet.write_string(row, col, if v > 0.0 { "inf" } else { "-inf" })?;
    } else {
        sheet.write_number_with_format(row, col, round_3(v), format)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/xlsx.rs"]
mod tests;
