use std::fmt;

pub mod coords;
pub mod table;

pub const PLATE_ROWS: &str = "ABCDEFGH";
pub const PLATE_COLUMNS: u32 = 12;
pub const WELL_COUNT: usize = 96;

/// Row letter plus column number, e.g. `B11`. Tokens supplied verbatim by the
/// user are kept as-is and only fail later when looked up in a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WellCoordinate(String);

impl WellCoordinate {
    pub fn new(row: char, column: u32) -> Self {
        WellCoordinate(format!("{row}{column}"))
    }

    pub fn from_token(token: &str) -> Self {
        WellCoordinate(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All 96 wells in table column order: A1..A12, B1..B12, ..., H1..H12.
pub fn plate_wells() -> Vec<WellCoordinate> {
    let mut out = Vec::with_capacity(WELL_COUNT);
    for row in PLATE_ROWS.chars() {
        for column in 1..=PLATE_COLUMNS {
            out.push(WellCoordinate::new(row, column));
        }
    }
    out
}
