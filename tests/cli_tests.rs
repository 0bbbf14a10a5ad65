//! CLI command tests

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use sheetmap::cli::commands::{self, column_letter, header_columns, keyed_rows, HeaderColumn};
use sheetmap::excel::WorkbookReader;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two sheets: "Staff" with an offset header and a duplicate, "Empty" blank
fn create_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("staff.xlsx");
    let mut workbook = Workbook::new();

    let staff = workbook.add_worksheet();
    staff.set_name("Staff").unwrap();
    staff.write_string(1, 1, "Name").unwrap();
    staff.write_string(1, 2, "Team").unwrap();
    staff.write_string(1, 3, "Name").unwrap();
    staff.write_string(2, 1, "Ann").unwrap();
    staff.write_string(2, 2, "Ops").unwrap();
    staff.write_string(2, 3, "ignored").unwrap();
    staff.write_string(3, 1, "Bo").unwrap();

    let empty = workbook.add_worksheet();
    empty.set_name("Empty").unwrap();

    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_column_letter_round_numbers() {
    assert_eq!(column_letter(0), "A");
    assert_eq!(column_letter(25), "Z");
    assert_eq!(column_letter(26), "AA");
    assert_eq!(column_letter(16_383), "XFD");
}

#[test]
fn test_header_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());
    let worksheet = WorkbookReader::open(&path)
        .unwrap()
        .worksheet("Staff")
        .unwrap();

    assert_eq!(
        header_columns(&worksheet),
        vec![
            HeaderColumn {
                name: "Name".to_string(),
                index: 1,
                letter: "B".to_string(),
            },
            HeaderColumn {
                name: "Team".to_string(),
                index: 2,
                letter: "C".to_string(),
            },
        ]
    );
}

#[test]
fn test_keyed_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());
    let worksheet = WorkbookReader::open(&path)
        .unwrap()
        .worksheet("Staff")
        .unwrap();

    let rows = keyed_rows(&worksheet);

    let mut first = BTreeMap::new();
    first.insert("Name".to_string(), "Ann".to_string());
    first.insert("Team".to_string(), "Ops".to_string());

    let mut second = BTreeMap::new();
    second.insert("Name".to_string(), "Bo".to_string());
    second.insert("Team".to_string(), String::new());

    assert_eq!(rows, vec![first, second]);
}

#[test]
fn test_keyed_rows_empty_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());
    let worksheet = WorkbookReader::open(&path)
        .unwrap()
        .worksheet("Empty")
        .unwrap();

    assert!(keyed_rows(&worksheet).is_empty());
    assert!(header_columns(&worksheet).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sheets_command() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());
    assert!(commands::sheets(path).is_ok());
}

#[test]
fn test_sheets_command_missing_file() {
    let result = commands::sheets(PathBuf::from("nonexistent.xlsx"));
    assert!(result.is_err(), "Sheets should fail on nonexistent file");
}

#[test]
fn test_headers_command() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());

    assert!(commands::headers(path.clone(), "Staff".to_string(), false).is_ok());
    assert!(commands::headers(path.clone(), "Staff".to_string(), true).is_ok());
    assert!(commands::headers(path, "Empty".to_string(), false).is_ok());
}

#[test]
fn test_headers_command_missing_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());

    let result = commands::headers(path, "Sheet1".to_string(), false);
    assert!(result.is_err(), "Headers should fail on missing sheet");
}

#[test]
fn test_rows_command() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_workbook(temp_dir.path());

    assert!(commands::rows(path.clone(), "Staff".to_string(), false, None).is_ok());
    assert!(commands::rows(path.clone(), "staff".to_string(), true, Some(1)).is_ok());
    assert!(commands::rows(path, "Staff".to_string(), false, Some(0)).is_ok());
}
