//! Cell-by-cell comparison of spreadsheet grids

use crate::error::{CompareError, Result};
use crate::grid::{cell_address, CellValue, Grid};
use serde::{Deserialize, Serialize};

/// Classification of one coordinate during a comparison pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellComparison {
    Match,
    Mismatch,
    RowOverflow,
    ColumnOverflow,
}

/// Which dimension differs between the two sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Rows,
    Columns,
}

/// Advisory raised when the two sheets have different sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionNotice {
    pub sheet: String,
    pub dimension: Dimension,
    pub left: u32,
    pub right: u32,
}

/// A cell whose values differ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMismatch {
    pub row: u32,
    pub column: u32,
    pub address: String,
    pub before: Option<CellValue>,
    pub after: Option<CellValue>,
}

/// Result of comparing one pair of sheets.
///
/// `highlighted` is the working copy of the right-hand grid with every
/// differing or overflowing coordinate highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDiff {
    pub sheet: String,
    pub highlighted: Grid,
    pub mismatch_count: usize,
    pub had_extra_rows: bool,
    pub had_extra_columns: bool,
    pub mismatches: Vec<CellMismatch>,
    pub notices: Vec<DimensionNotice>,
}

impl SheetDiff {
    pub fn has_differences(&self) -> bool {
        self.mismatch_count > 0 || self.had_extra_rows || self.had_extra_columns
    }
}

/// Result of comparing two workbooks sheet by sheet
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookDiff {
    pub sheets: Vec<SheetDiff>,
}

impl WorkbookDiff {
    pub fn total_mismatches(&self) -> usize {
        self.sheets.iter().map(|s| s.mismatch_count).sum()
    }

    pub fn has_differences(&self) -> bool {
        self.sheets.iter().any(SheetDiff::has_differences)
    }

    /// Highlighted right-hand sheets in workbook order
    pub fn highlighted_sheets(&self) -> Vec<Grid> {
        self.sheets.iter().map(|s| s.highlighted.clone()).collect()
    }

    pub fn into_highlighted_sheets(self) -> Vec<Grid> {
        self.sheets.into_iter().map(|s| s.highlighted).collect()
    }
}

/// State of a single sheet comparison.
///
/// Borrows the left grid and owns the working copy of the right one, so
/// only the right-hand side can ever be highlighted.
pub struct DiffSession<'a> {
    left: &'a Grid,
    right: Grid,
    row_max: u32,
    column_max: u32,
    mismatch_count: usize,
    had_extra_rows: bool,
    had_extra_columns: bool,
    mismatches: Vec<CellMismatch>,
    notices: Vec<DimensionNotice>,
}

impl<'a> DiffSession<'a> {
    pub fn new(left: &'a Grid, right: Grid) -> Self {
        let (rows_a, cols_a) = left.dimensions();
        let (rows_b, cols_b) = right.dimensions();

        Self {
            left,
            row_max: rows_a.max(rows_b),
            column_max: cols_a.max(cols_b),
            right,
            mismatch_count: 0,
            had_extra_rows: false,
            had_extra_columns: false,
            mismatches: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Classify a coordinate without touching any state
    pub fn classify(&self, row: u32, col: u32) -> CellComparison {
        let (rows_a, cols_a) = self.left.dimensions();
        let (rows_b, cols_b) = self.right.dimensions();

        if row > rows_a || row > rows_b {
            CellComparison::RowOverflow
        } else if col > cols_a || col > cols_b {
            CellComparison::ColumnOverflow
        } else if self.left.get(row, col) == self.right.get(row, col) {
            CellComparison::Match
        } else {
            CellComparison::Mismatch
        }
    }

    fn record_dimension_notices(&mut self) {
        let sheet = self.left.name.clone();
        let (rows_a, cols_a) = self.left.dimensions();
        let (rows_b, cols_b) = self.right.dimensions();

        if rows_a != rows_b {
            log::warn!(
                "Number of rows differs for sheet '{}': {} vs {}",
                sheet,
                rows_a,
                rows_b
            );
            self.notices.push(DimensionNotice {
                sheet: sheet.clone(),
                dimension: Dimension::Rows,
                left: rows_a,
                right: rows_b,
            });
        }

        if cols_a != cols_b {
            log::warn!(
                "Number of columns differs for sheet '{}': {} vs {}",
                sheet,
                cols_a,
                cols_b
            );
            self.notices.push(DimensionNotice {
                sheet,
                dimension: Dimension::Columns,
                left: cols_a,
                right: cols_b,
            });
        }
    }

    /// Walk every coordinate in row-major order and consume the session
    pub fn run(mut self) -> SheetDiff {
        self.record_dimension_notices();

        for row in 1..=self.row_max {
            for col in 1..=self.column_max {
                match self.classify(row, col) {
                    CellComparison::RowOverflow => {
                        self.right.set_highlight(row, col);
                        self.had_extra_rows = true;
                    }
                    CellComparison::ColumnOverflow => {
                        self.right.set_highlight(row, col);
                        self.had_extra_columns = true;
                    }
                    CellComparison::Match => {}
                    CellComparison::Mismatch => {
                        self.right.set_highlight(row, col);
                        self.mismatch_count += 1;
                        self.mismatches.push(CellMismatch {
                            row,
                            column: col,
                            address: cell_address(row, col),
                            before: self.left.get(row, col).cloned(),
                            after: self.right.get(row, col).cloned(),
                        });
                    }
                }
            }
        }

        log::debug!(
            "Sheet '{}': {} mismatches, extra rows: {}, extra columns: {}",
            self.left.name,
            self.mismatch_count,
            self.had_extra_rows,
            self.had_extra_columns
        );

        SheetDiff {
            sheet: self.left.name.clone(),
            highlighted: self.right,
            mismatch_count: self.mismatch_count,
            had_extra_rows: self.had_extra_rows,
            had_extra_columns: self.had_extra_columns,
            mismatches: self.mismatches,
            notices: self.notices,
        }
    }
}

/// Compare two sheets, highlighting differences on a copy of `right`.
pub fn compare(left: &Grid, right: &Grid) -> SheetDiff {
    DiffSession::new(left, right.clone()).run()
}

/// Compare two workbooks sheet by sheet, pairing sheets by position.
///
/// Differing sheet counts abort the whole pair before any sheet is
/// compared.
pub fn compare_workbooks(left: &[Grid], right: &[Grid]) -> Result<WorkbookDiff> {
    if left.len() != right.len() {
        return Err(CompareError::structural_mismatch(left.len(), right.len()));
    }

    let sheets = left
        .iter()
        .zip(right.iter())
        .map(|(a, b)| compare(a, b))
        .collect();

    Ok(WorkbookDiff { sheets })
}
