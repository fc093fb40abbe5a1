//! # doccompare
//!
//! Cell-by-cell comparison of spreadsheet workbooks with highlighted output,
//! and character-level similarity scoring of text documents with
//! side-by-side diff reports.

pub mod cli;
pub mod error;
pub mod config;
pub mod grid;
pub mod tabular;
pub mod matcher;
pub mod similarity;
pub mod render;
pub mod sheets;
pub mod extract;
pub mod discovery;
pub mod report;
pub mod commands;
pub mod output;
pub mod progress;

pub use config::{CompareConfig, ReportFormat};
pub use error::{CompareError, Result};
pub use grid::{CellValue, Grid};
pub use render::{render, DiffDocument};
pub use report::{compare_documents, compare_spreadsheets, score_batch, BatchResult, TextSource};
pub use similarity::{similarity, TextPair};
pub use tabular::{compare, compare_workbooks, CellComparison, DiffSession, SheetDiff, WorkbookDiff};
