use crate::error::Result;
use crate::plate::coords::expand;
use crate::plate::table::PlateTable;

/// Expands `spec` and restricts `table` to the resulting wells.
pub fn run_query(table: &PlateTable, spec: &str) -> Result<PlateTable> {
    tracing::info!("processing coordinates: {}", spec);
    let coords = expand(spec)?;
    tracing::info!(
        "expanded coordinates: {}",
        coords
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    tracing::info!("read total of {} time points", table.n_rows());
    table.column_subset(&coords)
}
