use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{PlateError, Result};

pub mod raw;

pub const DEFAULT_EXTENSION: &str = "txt";

/// Where the time label of an ingested file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSource {
    /// Embedded first column, one label per chunk.
    FromFile,
    /// Single label derived from the file name (folder input).
    FromFilename(String),
}

#[derive(Debug, Clone)]
pub struct InputSet {
    pub files: Vec<PathBuf>,
    pub is_folder: bool,
}

impl InputSet {
    pub fn time_source(&self, path: &Path) -> TimeSource {
        if self.is_folder {
            TimeSource::FromFilename(label_from_filename(path))
        } else {
            TimeSource::FromFile
        }
    }
}

/// Resolves `input` to a sorted list of raw files. A directory contributes
/// every entry whose name ends in `.{extension}`.
pub fn collect_input_files(input: &Path, extension: &str) -> Result<InputSet> {
    if !input.is_dir() {
        if !input.exists() {
            return Err(PlateError::io(
                input,
                std::io::Error::new(std::io::ErrorKind::NotFound, "input path does not exist"),
            ));
        }
        return Ok(InputSet {
            files: vec![input.to_path_buf()],
            is_folder: false,
        });
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files = Vec::new();
    let entries = std::fs::read_dir(input).map_err(|e| PlateError::io(input, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PlateError::io(input, e))?;
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(&suffix) {
            files.push(entry.path());
        }
    }
    files.sort();

    if files.is_empty() {
        tracing::warn!(
            "no *{} files found in {}",
            suffix,
            input.display()
        );
    }
    Ok(InputSet {
        files,
        is_folder: true,
    })
}

/// Reads a raw export, gunzipping `.gz` paths. Bytes that are not valid
/// UTF-8 are dropped.
pub fn read_raw_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| PlateError::io(path, e))?;
    let mut reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| PlateError::io(path, e))?;
    Ok(decode_lossy(&bytes))
}

fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// `0_5.txt` -> `0.5`, `0_5.txt.gz` -> `0.5`
pub fn label_from_filename(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    let name = name.strip_suffix(".gz").unwrap_or(&*name);
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().replace('_', "."))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
