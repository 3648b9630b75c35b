use std::io::Write;

use crate::error::Result;
use crate::pipeline::cytotox::CytotoxTable;
use crate::plate::table::PlateTable;
use crate::report::format_f64_3;

pub const TIME_INDEX_HEADER: &str = "Time";

/// Comma-delimited dump of `table`: a `Time` index column followed by the
/// table's columns, readings at three decimals.
pub fn write_table_csv<W: Write>(table: &PlateTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(TIME_INDEX_HEADER.to_string());
    header.extend(table.columns().iter().cloned());
    writer.write_record(&header)?;

    for (label, row) in table.labels().iter().zip(table.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label.clone());
        record.extend(row.iter().map(|&v| format_f64_3(v)));
        writer.write_record(&record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Whitespace-aligned console rendering of the reshaped cytotox table.
pub fn render_cytotox_text(table: &CytotoxTable) -> String {
    let mut header = vec![String::new()];
    header.extend(table.columns.iter().map(|c| c.to_string()));
    header.push("drug".to_string());
    header.push("filename".to_string());

    let mut lines = vec![header];
    for rec in &table.records {
        let mut line = Vec::with_capacity(rec.values.len() + 3);
        line.push(rec.row_label.clone());
        line.extend(rec.values.iter().map(|&v| format_f64_3(v)));
        line.push(rec.drug.clone());
        line.push(rec.filename.clone());
        lines.push(line);
    }

    let n_cols = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; n_cols];
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
