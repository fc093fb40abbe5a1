//! In-memory grid model for a single spreadsheet sheet

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A scalar cell value.
///
/// Equality is type-sensitive: a number never equals text with the same
/// printed form. Integers and floats compare numerically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Spreadsheet date-time serial number
    DateTime(f64),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a == b,
            (CellValue::Int(i), CellValue::Float(f)) | (CellValue::Float(f), CellValue::Int(i)) => {
                *i as f64 == *f
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            (CellValue::Error(a), CellValue::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) | CellValue::DateTime(v) => write!(f, "{}", v),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// A named rectangular grid of cells addressed 1-based by `(row, column)`.
///
/// Values are stored sparsely; empty cells inside the declared dimensions
/// and addresses outside them both read as `None`. Highlights are tracked
/// separately and may fall outside the declared dimensions, which is how
/// overflow rows and columns of the other grid get marked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub name: String,
    rows: u32,
    columns: u32,
    cells: HashMap<(u32, u32), CellValue>,
    highlights: BTreeSet<(u32, u32)>,
}

impl Grid {
    pub fn new(name: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
            cells: HashMap::new(),
            highlights: BTreeSet::new(),
        }
    }

    /// Build a grid from row-major values; `None` leaves the cell empty.
    ///
    /// The column count is the length of the longest row.
    pub fn from_rows<I, R>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<CellValue>>,
    {
        let mut grid = Grid::new(name, 0, 0);
        for (r, row) in rows.into_iter().enumerate() {
            let row_index = r as u32 + 1;
            grid.rows = row_index;
            for (c, value) in row.into_iter().enumerate() {
                let col_index = c as u32 + 1;
                grid.columns = grid.columns.max(col_index);
                if let Some(value) = value {
                    grid.cells.insert((row_index, col_index), value);
                }
            }
        }
        grid
    }

    /// Declared `(rows, columns)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    pub fn row_count(&self) -> u32 {
        self.rows
    }

    pub fn column_count(&self) -> u32 {
        self.columns
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= 1 && col >= 1 && row <= self.rows && col <= self.columns
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells.get(&(row, col))
    }

    /// Store a value; returns false (and stores nothing) outside the
    /// declared dimensions.
    pub fn set(&mut self, row: u32, col: u32, value: Option<CellValue>) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        match value {
            Some(value) => {
                self.cells.insert((row, col), value);
            }
            None => {
                self.cells.remove(&(row, col));
            }
        }
        true
    }

    pub fn set_highlight(&mut self, row: u32, col: u32) {
        self.highlights.insert((row, col));
    }

    pub fn is_highlighted(&self, row: u32, col: u32) -> bool {
        self.highlights.contains(&(row, col))
    }

    /// Highlighted coordinates in row-major order
    pub fn highlighted_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.highlights.iter().copied()
    }

    pub fn highlight_count(&self) -> usize {
        self.highlights.len()
    }

    /// Stored (non-empty) cells, unordered
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &CellValue)> {
        self.cells.iter().map(|(addr, value)| (*addr, value))
    }

    /// Smallest rectangle covering both the declared dimensions and every
    /// highlight.
    pub fn extent(&self) -> (u32, u32) {
        self.highlights
            .iter()
            .fold((self.rows, self.columns), |(r, c), &(hr, hc)| {
                (r.max(hr), c.max(hc))
            })
    }
}

/// Convert a 1-based column index into spreadsheet letters (`1 -> "A"`).
pub fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1-style address for a 1-based `(row, col)`.
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row)
}
