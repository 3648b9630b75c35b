use std::collections::HashSet;

use crate::config::{CytotoxGroups, CytotoxLayout, DrugLayout};
use crate::error::{PlateError, Result};
use crate::plate::WellCoordinate;
use crate::plate::table::PlateTable;

pub const BACKGROUND_COLUMN: &str = "BG";
pub const DRUG1_CONTROL_COLUMN: &str = "DR1C";
pub const DRUG2_CONTROL_COLUMN: &str = "DR2C";

/// One reshaped plate row for one drug at one time point.
#[derive(Debug, Clone, PartialEq)]
pub struct CytotoxRecord {
    pub row_label: String,
    pub values: Vec<f64>,
    pub drug: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CytotoxTable {
    pub columns: Vec<u32>,
    pub records: Vec<CytotoxRecord>,
}

#[derive(Debug)]
pub struct CytotoxOutput {
    /// Ingested table plus BG/DR1C/DR2C after subtraction and normalization.
    pub normalized: PlateTable,
    pub table: CytotoxTable,
}

pub fn run_cytotox(
    table: &PlateTable,
    groups: &CytotoxGroups,
    layout: &CytotoxLayout,
) -> Result<CytotoxOutput> {
    check_shape(&layout.drug1, &groups.experimental1)?;
    check_shape(&layout.drug2, &groups.experimental2)?;
    if layout.drug1.columns != layout.drug2.columns {
        return Err(PlateError::Layout(
            "drug1 and drug2 must share the same reshape columns".to_string(),
        ));
    }

    let normalized = normalize(table, groups)?;

    let exp1 = normalized.positions(&groups.experimental1)?;
    let exp2 = normalized.positions(&groups.experimental2)?;
    let mut records = Vec::with_capacity(normalized.n_rows() * 2 * layout.drug1.rows.len());
    for (label, row) in normalized.labels().iter().zip(normalized.rows()) {
        reshape_into(&mut records, row, &exp1, &layout.drug1, label);
        reshape_into(&mut records, row, &exp2, &layout.drug2, label);
    }

    tracing::info!(
        "cytotox: {} time points reshaped into {} rows",
        normalized.n_rows(),
        records.len()
    );
    Ok(CytotoxOutput {
        normalized,
        table: CytotoxTable {
            columns: layout.drug1.columns.clone(),
            records,
        },
    })
}

fn check_shape(drug: &DrugLayout, group: &[WellCoordinate]) -> Result<()> {
    if drug.rows.is_empty() || drug.columns.is_empty() {
        return Err(PlateError::Layout(format!(
            "{} needs at least one reshape row and column",
            drug.name
        )));
    }
    let expected = drug.expected_wells();
    if group.len() != expected {
        return Err(PlateError::ShapeMismatch {
            drug: drug.name.clone(),
            expected,
            actual: group.len(),
        });
    }
    Ok(())
}

/// Background subtraction, control averaging and percent-of-control on a
/// copy of `table`.
pub fn normalize(table: &PlateTable, groups: &CytotoxGroups) -> Result<PlateTable> {
    let background = table.positions(&groups.background)?;
    let control1 = table.positions(&groups.control1)?;
    let control2 = table.positions(&groups.control2)?;
    let exp1 = unique(table.positions(&groups.experimental1)?);
    let exp2 = unique(table.positions(&groups.experimental2)?);

    let mut out = table.clone();
    let bg = out.row_means(&background);
    out.append_column(BACKGROUND_COLUMN, bg.clone());
    for (row, bg) in out.rows_mut().iter_mut().zip(&bg) {
        for v in row.iter_mut() {
            *v -= bg;
        }
    }

    let dr1c = out.row_means(&control1);
    let dr2c = out.row_means(&control2);
    out.append_column(DRUG1_CONTROL_COLUMN, dr1c.clone());
    out.append_column(DRUG2_CONTROL_COLUMN, dr2c.clone());

    for (row, (c1, c2)) in out.rows_mut().iter_mut().zip(dr1c.iter().zip(&dr2c)) {
        for &p in &exp1 {
            row[p] = row[p] / c1 * 100.0;
        }
        for &p in &exp2 {
            row[p] = row[p] / c2 * 100.0;
        }
    }
    Ok(out)
}

fn unique(positions: Vec<usize>) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(positions.len());
    positions.into_iter().filter(|p| seen.insert(*p)).collect()
}

fn reshape_into(
    records: &mut Vec<CytotoxRecord>,
    row: &[f64],
    positions: &[usize],
    drug: &DrugLayout,
    filename: &str,
) {
    let width = drug.columns.len();
    for (row_label, block) in drug.rows.iter().zip(positions.chunks(width)) {
        records.push(CytotoxRecord {
            row_label: row_label.clone(),
            values: block.iter().map(|&p| row[p]).collect(),
            drug: drug.name.clone(),
            filename: filename.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/cytotox.rs"]
mod tests;
