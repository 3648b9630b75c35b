use std::fs;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::*;
use crate::pipeline::cytotox::CytotoxRecord;

fn sample_table() -> CytotoxTable {
    CytotoxTable {
        columns: vec![2, 3, 4, 5],
        records: vec![
            CytotoxRecord {
                row_label: "B".to_string(),
                values: vec![100.0 / 3.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY],
                drug: "drug1".to_string(),
                filename: "0.5".to_string(),
            },
            CytotoxRecord {
                row_label: "E".to_string(),
                values: vec![150.0, -2.0 / 3.0, 0.0, 12.3456],
                drug: "drug2".to_string(),
                filename: "0.5".to_string(),
            },
        ],
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut out = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}

fn unpack(buf: Vec<u8>) -> (String, Vec<String>, String) {
    let mut archive = ZipArchive::new(Cursor::new(buf)).unwrap();
    let sheet = read_part(&mut archive, "xl/worksheets/sheet1.xml");
    let shared = read_part(&mut archive, "xl/sharedStrings.xml");
    let styles = read_part(&mut archive, "xl/styles.xml");
    (sheet, shared_strings(&shared), styles)
}

fn shared_strings(xml: &str) -> Vec<String> {
    let mut out = Vec::new();
    for si in xml.split("<si>").skip(1) {
        let start = si.find("<t").unwrap();
        let open_end = start + si[start..].find('>').unwrap() + 1;
        let close = si.find("</t>").unwrap();
        out.push(si[open_end..close].to_string());
    }
    out
}

/// The `<c r="..">` element for `cell_ref`, if written.
fn cell<'a>(sheet: &'a str, cell_ref: &str) -> Option<&'a str> {
    let needle = format!("<c r=\"{cell_ref}\"");
    let mut from = 0;
    while let Some(pos) = sheet[from..].find(&needle) {
        let start = from + pos;
        let after = &sheet[start + needle.len()..];
        if after.starts_with(' ') || after.starts_with('>') || after.starts_with('/') {
            let end = after
                .find("</c>")
                .map(|e| e + 4)
                .unwrap_or_else(|| after.find("/>").unwrap() + 2);
            return Some(&sheet[start..start + needle.len() + end]);
        }
        from = start + needle.len();
    }
    None
}

fn value(cell: &str) -> &str {
    let start = cell.find("<v>").unwrap() + 3;
    let end = cell.find("</v>").unwrap();
    &cell[start..end]
}

fn number_at(sheet: &str, cell_ref: &str) -> f64 {
    value(cell(sheet, cell_ref).unwrap()).parse().unwrap()
}

fn string_at(sheet: &str, strings: &[String], cell_ref: &str) -> String {
    let c = cell(sheet, cell_ref).unwrap();
    assert!(c.contains("t=\"s\""), "{cell_ref} is not a string cell: {c}");
    strings[value(c).parse::<usize>().unwrap()].clone()
}

#[test]
fn test_header_row_layout() {
    let mut workbook = build_cytotox_workbook(&sample_table()).unwrap();
    let (sheet, strings, styles) = unpack(workbook.save_to_buffer().unwrap());

    assert!(cell(&sheet, "A1").is_none());
    assert_eq!(number_at(&sheet, "B1"), 2.0);
    assert_eq!(number_at(&sheet, "E1"), 5.0);
    assert_eq!(string_at(&sheet, &strings, "F1"), "drug");
    assert_eq!(string_at(&sheet, &strings, "G1"), "filename");
    assert!(cell(&sheet, "F1").unwrap().contains(" s=\""));
    assert!(styles.contains("<b/>"));
}

#[test]
fn test_record_rows() {
    let mut workbook = build_cytotox_workbook(&sample_table()).unwrap();
    let (sheet, strings, _) = unpack(workbook.save_to_buffer().unwrap());

    assert_eq!(string_at(&sheet, &strings, "A2"), "B");
    assert_eq!(string_at(&sheet, &strings, "A3"), "E");
    assert_eq!(string_at(&sheet, &strings, "F2"), "drug1");
    assert_eq!(string_at(&sheet, &strings, "F3"), "drug2");
    assert_eq!(string_at(&sheet, &strings, "G3"), "0.5");
}

#[test]
fn test_readings_rounded_and_formatted() {
    let mut workbook = build_cytotox_workbook(&sample_table()).unwrap();
    let (sheet, _, styles) = unpack(workbook.save_to_buffer().unwrap());

    assert_eq!(number_at(&sheet, "B2"), 33.333);
    assert_eq!(number_at(&sheet, "B3"), 150.0);
    assert_eq!(number_at(&sheet, "C3"), -0.667);
    assert_eq!(number_at(&sheet, "E3"), 12.346);
    assert!(cell(&sheet, "B2").unwrap().contains(" s=\""));
    assert!(styles.contains(&format!("formatCode=\"{READING_NUM_FORMAT}\"")));
}

#[test]
fn test_non_finite_readings() {
    let mut workbook = build_cytotox_workbook(&sample_table()).unwrap();
    let (sheet, strings, _) = unpack(workbook.save_to_buffer().unwrap());

    assert!(cell(&sheet, "C2").is_none());
    assert_eq!(string_at(&sheet, &strings, "D2"), "inf");
    assert_eq!(string_at(&sheet, &strings, "E2"), "-inf");
}

#[test]
fn test_write_cytotox_xlsx_creates_file() {
    let dir = std::env::temp_dir().join(format!("plate_cytotox_xlsx_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(DEFAULT_OUTPUT);

    write_cytotox_xlsx(&sample_table(), &path).unwrap();
    let (sheet, _, _) = unpack(fs::read(&path).unwrap());
    assert_eq!(number_at(&sheet, "B2"), 33.333);
}
