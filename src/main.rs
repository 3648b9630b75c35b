mod config;
mod error;
mod input;
mod logging;
mod pipeline;
mod plate;
mod report;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::{CytotoxLayout, load_layout};
use crate::error::{PlateError, Result};
use crate::input::{DEFAULT_EXTENSION, collect_input_files, read_raw_file};
use crate::pipeline::cytotox::{DRUG1_CONTROL_COLUMN, DRUG2_CONTROL_COLUMN, run_cytotox};
use crate::pipeline::query::run_query;
use crate::plate::table::PlateTable;
use crate::report::text::{render_cytotox_text, write_table_csv};
use crate::report::xlsx::{DEFAULT_OUTPUT, write_cytotox_xlsx};

const CYTOTOX_MODE: &str = "cytotox";

/// Reshape 96-well plate reader exports and run coordinate queries or the
/// cytotoxicity percent-of-control analysis.
#[derive(Debug, Parser)]
#[command(name = "plate-cytotox", version)]
struct Cli {
    /// Raw export file, or a directory of exports (one time point per file).
    input: PathBuf,

    /// Comma-separated wells such as `B-D1,B2-11,F3`, or `cytotox`.
    mode: String,

    /// JSON plate layout for cytotox mode.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Spreadsheet written in cytotox mode.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// File extension collected in directory mode.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RunMode {
    Query(String),
    Cytotox,
}

impl RunMode {
    fn from_arg(mode: &str) -> Self {
        if mode == CYTOTOX_MODE {
            RunMode::Cytotox
        } else {
            RunMode::Query(mode.to_string())
        }
    }
}

fn main() {
    logging::init_logging();
    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = parse_cli(std::env::args_os())?;
    let mode = RunMode::from_arg(&cli.mode);

    let table = load_table(&cli.input, &cli.extension)?;

    match mode {
        RunMode::Query(spec) => {
            let subset = run_query(&table, &spec)?;
            let stdout = std::io::stdout();
            write_table_csv(&subset, stdout.lock())?;
        }
        RunMode::Cytotox => {
            tracing::info!("running cytotox");
            let layout = match &cli.layout {
                Some(path) => load_layout(path)?,
                None => CytotoxLayout::default(),
            };
            let groups = layout.groups()?;
            let output = run_cytotox(&table, &groups, &layout)?;
            log_controls(&output.normalized)?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(render_cytotox_text(&output.table).as_bytes())
                .map_err(|e| PlateError::io("<stdout>", e))?;
            write_cytotox_xlsx(&output.table, &cli.output)?;
        }
    }
    Ok(())
}

fn parse_cli<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => Err(PlateError::Usage(format!(
            "required both arguments: input file(s) and comma separated coordinates or just {}\n{}",
            CYTOTOX_MODE,
            e.render()
        ))),
    }
}

fn log_controls(normalized: &PlateTable) -> Result<()> {
    let dr1c = normalized.column_position(DRUG1_CONTROL_COLUMN)?;
    let dr2c = normalized.column_position(DRUG2_CONTROL_COLUMN)?;
    for (label, row) in normalized.labels().iter().zip(normalized.rows()) {
        tracing::debug!(
            "{}: {}={:.3} {}={:.3}",
            label,
            DRUG1_CONTROL_COLUMN,
            row[dr1c],
            DRUG2_CONTROL_COLUMN,
            row[dr2c]
        );
    }
    Ok(())
}

/// Ingests every input file, in sorted path order, into a fresh table.
fn load_table(input: &Path, extension: &str) -> Result<PlateTable> {
    let inputs = collect_input_files(input, extension)?;
    tracing::info!("will process {} file(s) from {}", inputs.files.len(), input.display());

    let mut table = PlateTable::new();
    for path in &inputs.files {
        let content = read_raw_file(path)?;
        let source = inputs.time_source(path);
        let name = path.display().to_string();
        table.ingest(&name, &content, &source)?;
    }
    Ok(table)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
