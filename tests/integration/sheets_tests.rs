//! Integration tests for workbook comparison through calamine and rust_xlsxwriter

use crate::common::{int_grid, TestFixture};
use doccompare::progress::ProgressReporter;
use doccompare::sheets::{CalamineReader, SpreadsheetReader, XlsxWriter};
use doccompare::{compare_spreadsheets, CellValue, CompareError};

#[test]
fn test_identical_workbooks() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture.create_int_workbook("a.xlsx", &[vec![1, 2], vec![3, 4]]).unwrap();
    let b = fixture.create_int_workbook("b.xlsx", &[vec![1, 2], vec![3, 4]]).unwrap();
    let output = fixture.path("out.xlsx");

    let diff = compare_spreadsheets(
        &CalamineReader,
        &XlsxWriter::default(),
        &a,
        &b,
        &output,
        &mut ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert!(!diff.has_differences());
    assert_eq!(diff.total_mismatches(), 0);
    assert!(output.exists());
}

#[test]
fn test_single_mismatch_is_reported() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture.create_int_workbook("a.xlsx", &[vec![1, 2], vec![3, 4]]).unwrap();
    let b = fixture.create_int_workbook("b.xlsx", &[vec![1, 9], vec![3, 4]]).unwrap();
    let output = fixture.path("out.xlsx");

    let diff = compare_spreadsheets(
        &CalamineReader,
        &XlsxWriter::default(),
        &a,
        &b,
        &output,
        &mut ProgressReporter::new_minimal(),
    )
    .unwrap();

    let sheet = &diff.sheets[0];
    assert_eq!(sheet.mismatch_count, 1);
    assert_eq!(sheet.mismatches[0].address, "B1");
    assert!(sheet.highlighted.is_highlighted(1, 2));
    assert!(!sheet.had_extra_rows);
    assert!(!sheet.had_extra_columns);

    // The written workbook keeps B's values
    let written = CalamineReader.load(&output).unwrap();
    assert_eq!(written[0].get(1, 2), Some(&CellValue::Int(9)));
}

#[test]
fn test_extra_rows_are_highlighted() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture.create_int_workbook("a.xlsx", &[vec![1, 2], vec![3, 4]]).unwrap();
    let b = fixture
        .create_int_workbook("b.xlsx", &[vec![1, 2], vec![3, 4], vec![5, 6]])
        .unwrap();

    let diff = compare_spreadsheets(
        &CalamineReader,
        &XlsxWriter::default(),
        &a,
        &b,
        &fixture.path("out.xlsx"),
        &mut ProgressReporter::new_minimal(),
    )
    .unwrap();

    let sheet = &diff.sheets[0];
    assert!(sheet.had_extra_rows);
    assert_eq!(sheet.mismatch_count, 0);
    assert!(sheet.highlighted.is_highlighted(3, 1));
    assert!(sheet.highlighted.is_highlighted(3, 2));
    assert_eq!(sheet.notices.len(), 1);
}

#[test]
fn test_sheet_count_mismatch_writes_nothing() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture
        .create_workbook("a.xlsx", &[int_grid("One", &[vec![1]]), int_grid("Two", &[vec![2]])])
        .unwrap();
    let b = fixture.create_int_workbook("b.xlsx", &[vec![1]]).unwrap();
    let output = fixture.path("out.xlsx");

    let err = compare_spreadsheets(
        &CalamineReader,
        &XlsxWriter::default(),
        &a,
        &b,
        &output,
        &mut ProgressReporter::new_minimal(),
    )
    .unwrap_err();

    assert!(matches!(err, CompareError::StructuralMismatch { left: 2, right: 1 }));
    assert!(!output.exists());
}

#[test]
fn test_multiple_sheets_pair_by_position() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture
        .create_workbook("a.xlsx", &[int_grid("First", &[vec![1]]), int_grid("Second", &[vec![2]])])
        .unwrap();
    let b = fixture
        .create_workbook("b.xlsx", &[int_grid("First", &[vec![1]]), int_grid("Second", &[vec![7]])])
        .unwrap();

    let diff = compare_spreadsheets(
        &CalamineReader,
        &XlsxWriter::new(0x00FF00),
        &a,
        &b,
        &fixture.path("out.xlsx"),
        &mut ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert_eq!(diff.sheets.len(), 2);
    assert_eq!(diff.sheets[0].mismatch_count, 0);
    assert_eq!(diff.sheets[1].mismatch_count, 1);
    assert_eq!(diff.sheets[1].sheet, "Second");
}
