use super::*;

fn names(group: &[WellCoordinate]) -> Vec<&str> {
    group.iter().map(|c| c.as_str()).collect()
}

#[test]
fn test_row_range_expands_letters() {
    let group = expand("B-D1").unwrap();
    assert_eq!(names(&group), vec!["B1", "C1", "D1"]);
}

#[test]
fn test_column_range_expands_numbers() {
    let group = expand("B2-11").unwrap();
    assert_eq!(group.len(), 10);
    assert_eq!(group[0].as_str(), "B2");
    assert_eq!(group[9].as_str(), "B11");
}

#[test]
fn test_bare_items_kept_in_order() {
    let group = expand("F3,G7,B5").unwrap();
    assert_eq!(names(&group), vec!["F3", "G7", "B5"]);
}

#[test]
fn test_mixed_items_concatenate() {
    let group = expand("A2-3,A-D4").unwrap();
    assert_eq!(names(&group), vec!["A2", "A3", "A4", "B4", "C4", "D4"]);
}

#[test]
fn test_blocks_of_ten_keep_row_order() {
    let group = expand("B2-11,C2-11,D2-11").unwrap();
    assert_eq!(group.len(), 30);
    assert_eq!(group[10].as_str(), "C2");
    assert_eq!(group[29].as_str(), "D11");
}

#[test]
fn test_duplicates_are_preserved() {
    let group = expand("A1,A1-2").unwrap();
    assert_eq!(names(&group), vec!["A1", "A1", "A2"]);
}

#[test]
fn test_bare_tokens_not_validated() {
    let group = expand("Z99").unwrap();
    assert_eq!(names(&group), vec!["Z99"]);
}

#[test]
fn test_parse_tags_range_kind() {
    assert_eq!(
        RangeItem::parse("B-D1").unwrap(),
        RangeItem::RowRange {
            start: 'B',
            end: 'D',
            column: 1
        }
    );
    assert_eq!(
        RangeItem::parse("E2-11").unwrap(),
        RangeItem::ColumnRange {
            row: 'E',
            start: 2,
            end: 11
        }
    );
    assert_eq!(
        RangeItem::parse("H12").unwrap(),
        RangeItem::Single("H12".to_string())
    );
}

#[test]
fn test_malformed_items_name_the_token() {
    for bad in ["1-5", "BC-D1", "B-1", "B-", "B-Dx", "Bx-4", "B2-", "B5-2", "D-B1"] {
        match expand(&format!("A1,{bad}")) {
            Err(PlateError::MalformedRange { item, .. }) => assert_eq!(item, bad),
            other => panic!("expected malformed range for {bad}, got {other:?}"),
        }
    }
}

#[test]
fn test_range_bounds_must_lie_on_plate() {
    for bad in ["A1-4000000000", "A0-3", "B2-13", "B-D13", "B-D0", "A-Z1", "b-d1", "J2-4"] {
        match RangeItem::parse(bad) {
            Err(PlateError::MalformedRange { item, .. }) => assert_eq!(item, bad),
            other => panic!("expected malformed range for {bad}, got {other:?}"),
        }
    }
    assert_eq!(expand("A-H12").unwrap().len(), 8);
    assert_eq!(expand("H1-12").unwrap().len(), 12);
}
