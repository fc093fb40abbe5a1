//! Spreadsheet input/output
//!
//! Workbooks are read with calamine and highlighted results are written back
//! with rust_xlsxwriter.

use crate::error::{CompareError, Result};
use crate::grid::{CellValue, Grid};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};
use std::path::Path;

/// Loads a workbook as one grid per sheet, in workbook order
pub trait SpreadsheetReader {
    fn load(&self, path: &Path) -> Result<Vec<Grid>>;
}

/// Persists sheets, replacing any existing file at `path`
pub trait SpreadsheetWriter {
    fn save(&self, sheets: &[Grid], path: &Path) -> Result<()>;
}

/// Reader for xlsx/xlsm/xls/ods workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl SpreadsheetReader for CalamineReader {
    fn load(&self, path: &Path) -> Result<Vec<Grid>> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| CompareError::unreadable(path, e))?;

        let mut grids = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| CompareError::unreadable(path, e))?;

            // Dimensions are measured from A1, not from the first used cell.
            let (rows, columns) = match range.end() {
                Some((r, c)) => (r + 1, c + 1),
                None => (0, 0),
            };
            let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

            let mut grid = Grid::new(name.clone(), rows, columns);
            for (r, c, data) in range.used_cells() {
                let row = row_offset + r as u32 + 1;
                let col = col_offset + c as u32 + 1;
                grid.set(row, col, convert_cell(data));
            }

            log::debug!(
                "Loaded sheet '{}' from {} ({} x {})",
                name,
                path.display(),
                rows,
                columns
            );
            grids.push(grid);
        }

        Ok(grids)
    }
}

fn convert_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::DateTime(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Error(e.to_string())),
    }
}

/// Writes sheets to xlsx, filling highlighted cells with a solid color
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    highlight: Format,
    date: Format,
    highlighted_date: Format,
}

impl XlsxWriter {
    /// `rgb` is a `0xRRGGBB` fill color
    pub fn new(rgb: u32) -> Self {
        let highlight = Format::new()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb));
        let date = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let highlighted_date = highlight.clone().set_num_format("yyyy-mm-dd hh:mm:ss");

        Self {
            highlight,
            date,
            highlighted_date,
        }
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, grid: &Grid, path: &Path) -> Result<()> {
        worksheet
            .set_name(&grid.name)
            .map_err(|e| CompareError::write_failure(path, e))?;

        for ((row, col), value) in grid.cells() {
            let (r, c) = to_zero_based(row, col, path)?;
            let highlighted = grid.is_highlighted(row, col);
            let result = match (value, highlighted) {
                (CellValue::Text(s), false) | (CellValue::Error(s), false) => {
                    worksheet.write_string(r, c, s).map(|_| ())
                }
                (CellValue::Text(s), true) | (CellValue::Error(s), true) => worksheet
                    .write_string_with_format(r, c, s, &self.highlight)
                    .map(|_| ()),
                (CellValue::Int(i), false) => worksheet.write_number(r, c, *i as f64).map(|_| ()),
                (CellValue::Int(i), true) => worksheet
                    .write_number_with_format(r, c, *i as f64, &self.highlight)
                    .map(|_| ()),
                (CellValue::Float(f), false) => worksheet.write_number(r, c, *f).map(|_| ()),
                (CellValue::Float(f), true) => worksheet
                    .write_number_with_format(r, c, *f, &self.highlight)
                    .map(|_| ()),
                (CellValue::Bool(b), false) => worksheet.write_boolean(r, c, *b).map(|_| ()),
                (CellValue::Bool(b), true) => worksheet
                    .write_boolean_with_format(r, c, *b, &self.highlight)
                    .map(|_| ()),
                (CellValue::DateTime(f), false) => worksheet
                    .write_number_with_format(r, c, *f, &self.date)
                    .map(|_| ()),
                (CellValue::DateTime(f), true) => worksheet
                    .write_number_with_format(r, c, *f, &self.highlighted_date)
                    .map(|_| ()),
            };
            result.map_err(|e| CompareError::write_failure(path, e))?;
        }

        // Highlighted coordinates without a value still get the fill.
        for (row, col) in grid.highlighted_cells() {
            if grid.get(row, col).is_some() {
                continue;
            }
            let (r, c) = to_zero_based(row, col, path)?;
            worksheet
                .write_blank(r, c, &self.highlight)
                .map_err(|e| CompareError::write_failure(path, e))?;
        }

        Ok(())
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(0xFF3333)
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn save(&self, sheets: &[Grid], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        for grid in sheets {
            let worksheet = workbook.add_worksheet();
            self.write_sheet(worksheet, grid, path)?;
        }

        workbook
            .save(path)
            .map_err(|e| CompareError::write_failure(path, e))?;
        log::info!("Wrote {} sheet(s) to {}", sheets.len(), path.display());
        Ok(())
    }
}

fn to_zero_based(row: u32, col: u32, path: &Path) -> Result<(u32, u16)> {
    let c = u16::try_from(col - 1).map_err(|_| {
        CompareError::write_failure(path, format!("column {} is out of range", col))
    })?;
    Ok((row - 1, c))
}
