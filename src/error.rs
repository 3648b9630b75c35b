use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlateError>;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("malformed range item '{item}': {reason}")]
    MalformedRange { item: String, reason: String },

    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    #[error("shape mismatch for {drug}: expected {expected} experimental wells, got {actual}")]
    ShapeMismatch {
        drug: String,
        expected: usize,
        actual: usize,
    },

    #[error("data integrity error in {source_name}: {detail}")]
    DataIntegrity { source_name: String, detail: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {source_name} line {line}: '{value}' is not a number")]
    Parse {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("delimited output failed: {0}")]
    Csv(#[from] csv::Error),
}

impl PlateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlateError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(item: &str, reason: impl Into<String>) -> Self {
        PlateError::MalformedRange {
            item: item.to_string(),
            reason: reason.into(),
        }
    }

    pub fn integrity(source_name: &str, detail: impl Into<String>) -> Self {
        PlateError::DataIntegrity {
            source_name: source_name.to_string(),
            detail: detail.into(),
        }
    }
}
