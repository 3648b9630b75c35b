//! Positional parsing of the plate reader's tab-delimited kinetic export.
//!
//! Layout after the 3 header lines and before the 2 footer lines:
//!
//! ```text
//! time  temp  v1 .. v12  <artifact> <artifact>    <- row A, time set on first row only
//!             v1 .. v12                           <- rows B..H
//! (separator)                                     <- 9th row of each chunk
//! ```

pub const HEADER_LINES: usize = 3;
pub const FOOTER_LINES: usize = 2;
pub const TRAILING_ARTIFACT_COLUMNS: usize = 2;
/// Time label column plus temperature/index column.
pub const LEADING_COLUMNS: usize = 2;
pub const CHUNK_ROWS: usize = 9;
pub const DATA_ROWS_PER_CHUNK: usize = 8;

#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: usize,
    pub cells: Vec<String>,
}

/// Body of a raw export with header, footer and the trailing artifact
/// columns removed. Every row has the same width.
#[derive(Debug, Clone, Default)]
pub struct RawGrid {
    pub rows: Vec<RawRow>,
}

impl RawGrid {
    pub fn parse(content: &str) -> RawGrid {
        let lines: Vec<&str> = content
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if lines.len() <= HEADER_LINES + FOOTER_LINES {
            return RawGrid::default();
        }
        let body = &lines[HEADER_LINES..lines.len() - FOOTER_LINES];

        let split: Vec<Vec<&str>> = body.iter().map(|l| l.split('\t').collect()).collect();
        let width = split.iter().map(|c| c.len()).max().unwrap_or(0);
        let kept = width.saturating_sub(TRAILING_ARTIFACT_COLUMNS);

        let rows = split
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| {
                let mut cells: Vec<String> = cells.into_iter().map(|c| c.trim().to_string()).collect();
                cells.resize(width, String::new());
                cells.truncate(kept);
                RawRow {
                    line: HEADER_LINES + idx + 1,
                    cells,
                }
            })
            .collect();
        RawGrid { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_chunks(&self) -> usize {
        self.rows.len() / CHUNK_ROWS
    }

    /// Non-empty entries of the first column, in row order.
    pub fn time_labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.first())
            .filter(|c| !c.is_empty())
            .cloned()
            .collect()
    }

    /// The 8 data rows of chunk `idx`, with the leading columns stripped.
    pub fn chunk(&self, idx: usize) -> impl Iterator<Item = (usize, &[String])> {
        let start = idx * CHUNK_ROWS;
        self.rows[start..start + DATA_ROWS_PER_CHUNK]
            .iter()
            .map(|r| (r.line, r.cells.get(LEADING_COLUMNS..).unwrap_or(&[])))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/raw.rs"]
mod tests;
