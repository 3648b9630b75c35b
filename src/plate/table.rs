use std::collections::HashMap;

use crate::error::{PlateError, Result};
use crate::input::TimeSource;
use crate::input::raw::{CHUNK_ROWS, RawGrid};
use crate::plate::{PLATE_COLUMNS, WELL_COUNT, WellCoordinate, plate_wells};

/// Time-indexed table of well readings. Rows are only ever appended.
#[derive(Debug, Clone)]
pub struct PlateTable {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Default for PlateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PlateTable {
    /// Empty table with the 96 well columns in plate order.
    pub fn new() -> Self {
        let columns = plate_wells()
            .into_iter()
            .map(|w| w.as_str().to_string())
            .collect();
        Self::with_columns(columns)
    }

    fn with_columns(columns: Vec<String>) -> Self {
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            column_index.entry(name.clone()).or_insert(idx);
        }
        PlateTable {
            columns,
            column_index,
            labels: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| PlateError::UnknownColumn(name.to_string()))
    }

    pub fn positions(&self, coords: &[WellCoordinate]) -> Result<Vec<usize>> {
        coords
            .iter()
            .map(|c| self.column_position(c.as_str()))
            .collect()
    }

    /// Appends one row per chunk of `content`. Nothing is appended when the
    /// file fails to parse. Returns the number of rows added.
    pub fn ingest(&mut self, source_name: &str, content: &str, source: &TimeSource) -> Result<usize> {
        let grid = RawGrid::parse(content);
        let n_chunks = grid.n_chunks();
        let remainder = grid.n_rows() % CHUNK_ROWS;
        if remainder != 0 {
            tracing::warn!(
                "{}: {} trailing rows do not form a full chunk and are ignored",
                source_name,
                remainder
            );
        }

        let labels = match source {
            TimeSource::FromFile => grid.time_labels(),
            TimeSource::FromFilename(label) => vec![label.clone()],
        };
        if labels.len() != n_chunks {
            return Err(PlateError::integrity(
                source_name,
                format!(
                    "{} time labels for {} chunks of {} rows",
                    labels.len(),
                    n_chunks,
                    CHUNK_ROWS
                ),
            ));
        }

        let mut new_rows = Vec::with_capacity(n_chunks);
        for chunk in 0..n_chunks {
            let mut values = Vec::with_capacity(WELL_COUNT);
            for (line, cells) in grid.chunk(chunk) {
                if cells.len() != PLATE_COLUMNS as usize {
                    return Err(PlateError::integrity(
                        source_name,
                        format!(
                            "line {} holds {} readings, expected {}",
                            line,
                            cells.len(),
                            PLATE_COLUMNS
                        ),
                    ));
                }
                for cell in cells {
                    values.push(parse_reading(source_name, line, cell)?);
                }
            }
            new_rows.push(values);
        }

        self.labels.extend(labels);
        self.rows.extend(new_rows);
        tracing::debug!("{}: ingested {} time points", source_name, n_chunks);
        Ok(n_chunks)
    }

    /// New table restricted to `coords`, in the given order, same rows.
    pub fn column_subset(&self, coords: &[WellCoordinate]) -> Result<PlateTable> {
        let positions = self.positions(coords)?;
        let mut out = Self::with_columns(coords.iter().map(|c| c.as_str().to_string()).collect());
        out.labels = self.labels.clone();
        out.rows = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|&p| row[p]).collect())
            .collect();
        Ok(out)
    }

    /// Per-row mean over the columns at `positions`, skipping NaN.
    pub fn row_means(&self, positions: &[usize]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| nan_mean(positions.iter().map(|&p| row[p])))
            .collect()
    }

    pub fn append_column(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.column_index
            .entry(name.to_string())
            .or_insert(self.columns.len());
        self.columns.push(name.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.rows
    }
}

fn parse_reading(source_name: &str, line: usize, cell: &str) -> Result<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| PlateError::Parse {
        source_name: source_name.to_string(),
        line,
        value: cell.to_string(),
    })
}

pub fn nan_mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        if !v.is_nan() {
            sum += v;
            n += 1;
        }
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/table.rs"]
mod tests;
