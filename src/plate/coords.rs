use crate::error::{PlateError, Result};
use crate::plate::{PLATE_COLUMNS, PLATE_ROWS, WellCoordinate};

/// Ordered expansion of one range specification. Duplicates are kept.
pub type CoordinateGroup = Vec<WellCoordinate>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeItem {
    Single(String),
    /// `B-D1`: rows B through D, fixed column 1.
    RowRange { start: char, end: char, column: u32 },
    /// `B2-11`: fixed row B, columns 2 through 11.
    ColumnRange { row: char, start: u32, end: u32 },
}

impl RangeItem {
    pub fn parse(item: &str) -> Result<RangeItem> {
        let Some((first, second)) = item.split_once('-') else {
            return Ok(RangeItem::Single(item.to_string()));
        };

        let mut first_chars = first.chars();
        match (first_chars.next(), first_chars.next()) {
            (Some(start), None) if start.is_ascii_alphabetic() => {
                let mut second_chars = second.chars();
                let end = match second_chars.next() {
                    Some(c) if c.is_ascii_alphabetic() => c,
                    Some(c) => {
                        return Err(PlateError::malformed(
                            item,
                            format!("expected end row letter, found '{c}'"),
                        ));
                    }
                    None => return Err(PlateError::malformed(item, "missing end row letter")),
                };
                check_row(item, start)?;
                check_row(item, end)?;
                let column = parse_column(item, second_chars.as_str(), "column")?;
                if end < start {
                    return Err(PlateError::malformed(item, "descending row range"));
                }
                Ok(RangeItem::RowRange { start, end, column })
            }
            (Some(row), _) if row.is_ascii_alphabetic() => {
                check_row(item, row)?;
                let start = parse_column(item, &first[row.len_utf8()..], "start column")?;
                let end = parse_column(item, second, "end column")?;
                if end < start {
                    return Err(PlateError::malformed(item, "descending column range"));
                }
                Ok(RangeItem::ColumnRange { row, start, end })
            }
            _ => Err(PlateError::malformed(
                item,
                "range must start with a row letter",
            )),
        }
    }

    pub fn expand(&self) -> CoordinateGroup {
        match self {
            RangeItem::Single(token) => vec![WellCoordinate::from_token(token)],
            RangeItem::RowRange { start, end, column } => (*start..=*end)
                .map(|row| WellCoordinate::new(row, *column))
                .collect(),
            RangeItem::ColumnRange { row, start, end } => (*start..=*end)
                .map(|column| WellCoordinate::new(*row, column))
                .collect(),
        }
    }
}

/// Range bounds must lie on the plate; bare tokens are not checked.
fn parse_column(item: &str, text: &str, what: &str) -> Result<u32> {
    let column = text
        .parse::<u32>()
        .map_err(|_| PlateError::malformed(item, format!("{what} '{text}' is not an integer")))?;
    if !(1..=PLATE_COLUMNS).contains(&column) {
        return Err(PlateError::malformed(
            item,
            format!("{what} {column} outside 1-{PLATE_COLUMNS}"),
        ));
    }
    Ok(column)
}

fn check_row(item: &str, row: char) -> Result<()> {
    if PLATE_ROWS.contains(row) {
        Ok(())
    } else {
        Err(PlateError::malformed(
            item,
            format!("row '{row}' outside {PLATE_ROWS}"),
        ))
    }
}

/// Expands a comma-separated coordinate specification such as
/// `"B-D1,B2-11,F3"` into explicit wells, preserving item order.
pub fn expand(spec: &str) -> Result<CoordinateGroup> {
    let mut out = Vec::new();
    for item in spec.split(',') {
        out.extend(RangeItem::parse(item)?.expand());
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/coords.rs"]
mod tests;
