//! FILENAME: tests/test_json.rs
//! Integration tests for saving and loading spreadsheets.

use engine::{CellContents, CellValue, SheetOptions, Spreadsheet, SpreadsheetError};
use persistence::{from_json, load_sheet, save_sheet, to_json, PersistenceError};

fn sample_sheet() -> Spreadsheet {
    let mut sheet = Spreadsheet::with_options(SheetOptions::new().with_version("1.1"));
    sheet.set_contents_of_cell("A1", "3").unwrap();
    sheet.set_contents_of_cell("A2", "label").unwrap();
    sheet.set_contents_of_cell("B1", "= A1 * (2 + A1)").unwrap();
    sheet.set_contents_of_cell("C1", "=B1 / 0").unwrap();
    sheet
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[test]
fn test_to_json_shape() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents_of_cell("B1", "=A1*2").unwrap();
    sheet.set_contents_of_cell("A1", "2.5").unwrap();

    let json = to_json(&sheet).unwrap();
    assert_eq!(
        json,
        r#"{"Cells":{"A1":{"StringForm":"2.5"},"B1":{"StringForm":"=A1*2"}},"Version":"default"}"#
    );
}

#[test]
fn test_empty_cells_are_not_saved() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents_of_cell("A1", "x").unwrap();
    sheet.set_contents_of_cell("A1", "").unwrap();

    assert_eq!(to_json(&sheet).unwrap(), r#"{"Cells":{},"Version":"default"}"#);
}

#[test]
fn test_from_json_reads_foreign_document() {
    let json = r#"{
        "Version": "default",
        "Cells": {
            "C1": {"StringForm": "=A1 + B1"},
            "A1": {"StringForm": "1"},
            "B1": {"StringForm": "2"}
        }
    }"#;
    let sheet = from_json(json, SheetOptions::default()).unwrap();

    assert_eq!(sheet.names_of_nonempty_cells(), vec!["A1", "B1", "C1"]);
    assert_eq!(sheet.cell_value("C1").unwrap(), &CellValue::Number(3.0));
    assert!(!sheet.changed());
}

#[test]
fn test_json_round_trip_preserves_contents_and_values() {
    let sheet = sample_sheet();
    let loaded = from_json(
        &to_json(&sheet).unwrap(),
        SheetOptions::new().with_version("1.1"),
    )
    .unwrap();

    assert_eq!(loaded.names_of_nonempty_cells(), sheet.names_of_nonempty_cells());
    for name in sheet.names_of_nonempty_cells() {
        assert_eq!(loaded.cell_contents(&name).unwrap(), sheet.cell_contents(&name).unwrap());
        assert_eq!(loaded.cell_value(&name).unwrap(), sheet.cell_value(&name).unwrap());
    }
    assert_eq!(loaded.cell_value("B1").unwrap(), &CellValue::Number(15.0));
    assert_eq!(loaded.version(), "1.1");
}

#[test]
fn test_overflowing_literals_do_not_corrupt_saved_files() {
    let mut sheet = Spreadsheet::new();
    let err = sheet.set_contents_of_cell("A1", "=1e400").unwrap_err();
    assert!(matches!(err, SpreadsheetError::Format(_)));

    // As plain content the literal is kept as text and reloads unchanged.
    sheet.set_contents_of_cell("A1", "1e400").unwrap();
    let json = to_json(&sheet).unwrap();
    assert_eq!(json, r#"{"Cells":{"A1":{"StringForm":"1e400"}},"Version":"default"}"#);

    let loaded = from_json(&json, SheetOptions::default()).unwrap();
    assert_eq!(
        loaded.cell_contents("A1").unwrap(),
        &CellContents::Text("1e400".to_string())
    );

    let json = r#"{"Cells":{"A1":{"StringForm":"=1e400"}},"Version":"default"}"#;
    assert!(matches!(
        from_json(json, SheetOptions::default()),
        Err(PersistenceError::Sheet { .. })
    ));
}

// ============================================================================
// LOAD FAILURES
// ============================================================================

#[test]
fn test_version_mismatch() {
    let json = to_json(&sample_sheet()).unwrap();
    match from_json(&json, SheetOptions::default()) {
        Err(PersistenceError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, "default");
            assert_eq!(found, "1.1");
        }
        other => panic!("expected a version mismatch, got {:?}", other),
    }
}

#[test]
fn test_missing_cells() {
    let result = from_json(r#"{"Version":"default"}"#, SheetOptions::default());
    assert!(matches!(result, Err(PersistenceError::MissingCells)));
}

#[test]
fn test_malformed_json() {
    let result = from_json(r#"{"Cells": [1, 2"#, SheetOptions::default());
    assert!(matches!(result, Err(PersistenceError::Json(_))));
}

#[test]
fn test_rejected_entry_fails_the_whole_load() {
    let json = r#"{"Cells":{"A1":{"StringForm":"=B1"},"B1":{"StringForm":"=A1"}},"Version":"default"}"#;
    match from_json(json, SheetOptions::default()) {
        Err(PersistenceError::Sheet { name, source }) => {
            assert_eq!(name, "B1");
            assert!(matches!(source, SpreadsheetError::Circular(_)));
        }
        other => panic!("expected a rejected cell, got {:?}", other),
    }

    let json = r#"{"Cells":{"1X":{"StringForm":"1"}},"Version":"default"}"#;
    assert!(matches!(
        from_json(json, SheetOptions::default()),
        Err(PersistenceError::Sheet { .. })
    ));
}

#[test]
fn test_load_applies_caller_rules() {
    let json = r#"{"Cells":{"a1":{"StringForm":"4"},"b1":{"StringForm":"=a1+1"}},"Version":"default"}"#;
    let sheet = from_json(
        json,
        SheetOptions::new().with_normalizer(|name| name.to_uppercase()),
    )
    .unwrap();

    assert_eq!(sheet.names_of_nonempty_cells(), vec!["A1", "B1"]);
    assert_eq!(
        sheet.cell_contents("B1").unwrap(),
        &CellContents::Formula("A1+1".parse().unwrap())
    );
    assert_eq!(sheet.cell_value("B1").unwrap(), &CellValue::Number(5.0));
}

// ============================================================================
// FILES
// ============================================================================

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");

    let mut sheet = sample_sheet();
    assert!(sheet.changed());
    save_sheet(&mut sheet, &path).unwrap();
    assert!(!sheet.changed());

    let loaded = load_sheet(&path, SheetOptions::new().with_version("1.1")).unwrap();
    assert_eq!(loaded.names_of_nonempty_cells(), vec!["A1", "A2", "B1", "C1"]);
    assert_eq!(loaded.cell_value("A2").unwrap(), &CellValue::Text("label".to_string()));
    assert!(loaded.cell_value("C1").unwrap().is_error());
    assert!(!loaded.changed());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_sheet(&dir.path().join("absent.json"), SheetOptions::default());
    assert!(matches!(result, Err(PersistenceError::Io(_))));
}

#[test]
fn test_failed_save_leaves_sheet_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("sheet.json");

    let mut sheet = sample_sheet();
    let before = to_json(&sheet).unwrap();

    assert!(matches!(save_sheet(&mut sheet, &path), Err(PersistenceError::Io(_))));
    assert!(sheet.changed());
    assert_eq!(to_json(&sheet).unwrap(), before);
    assert!(!path.exists());
}
