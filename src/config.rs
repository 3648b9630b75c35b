use std::path::Path;

use serde::Deserialize;

use crate::error::{PlateError, Result};
use crate::plate::coords::{CoordinateGroup, expand};

/// Well assignment of the cytotoxicity plate. Every field falls back to the
/// standard two-drug layout when omitted from a layout file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CytotoxLayout {
    pub background: String,
    pub drug1: DrugLayout,
    pub drug2: DrugLayout,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrugLayout {
    pub name: String,
    pub control: String,
    pub experimental: String,
    /// Row labels of the reshaped block, one per block of `columns.len()` wells.
    pub rows: Vec<String>,
    pub columns: Vec<u32>,
}

impl DrugLayout {
    pub fn expected_wells(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    fn standard(name: &str, control: &str, experimental: &str, rows: &str) -> Self {
        DrugLayout {
            name: name.to_string(),
            control: control.to_string(),
            experimental: experimental.to_string(),
            rows: rows.chars().map(|c| c.to_string()).collect(),
            columns: (2..=11).collect(),
        }
    }
}

impl Default for CytotoxLayout {
    fn default() -> Self {
        CytotoxLayout {
            background: "B-D1".to_string(),
            drug1: DrugLayout::standard("drug1", "B-D2", "B2-11,C2-11,D2-11", "BCD"),
            drug2: DrugLayout::standard("drug2", "E-G2", "E2-11,F2-11,G2-11", "EFG"),
        }
    }
}

/// The five expanded groups the cytotox pipeline consumes.
#[derive(Debug, Clone)]
pub struct CytotoxGroups {
    pub background: CoordinateGroup,
    pub control1: CoordinateGroup,
    pub control2: CoordinateGroup,
    pub experimental1: CoordinateGroup,
    pub experimental2: CoordinateGroup,
}

impl CytotoxLayout {
    pub fn groups(&self) -> Result<CytotoxGroups> {
        Ok(CytotoxGroups {
            background: expand(&self.background)?,
            control1: expand(&self.drug1.control)?,
            control2: expand(&self.drug2.control)?,
            experimental1: expand(&self.drug1.experimental)?,
            experimental2: expand(&self.drug2.experimental)?,
        })
    }
}

pub fn load_layout(path: &Path) -> Result<CytotoxLayout> {
    let text = std::fs::read_to_string(path).map_err(|e| PlateError::io(path, e))?;
    parse_layout(&text)
}

pub fn parse_layout(text: &str) -> Result<CytotoxLayout> {
    serde_json::from_str(text).map_err(|e| PlateError::Layout(e.to_string()))
}
