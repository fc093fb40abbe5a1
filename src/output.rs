//! Output formatting and report writers

use crate::error::{CompareError, Result};
use crate::render::{DiffDocument, DiffRow, LineSide, RowStatus, SpanKind};
use crate::report::BatchResult;
use crate::tabular::{Dimension, WorkbookDiff};
use std::fs;
use std::path::Path;

/// Persists a rendered diff, overwriting `destination`
pub trait ReportWriter {
    fn write(&self, document: &DiffDocument, destination: &Path) -> Result<()>;
}

/// Writes self-contained HTML side-by-side reports
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReportWriter {
    pub context: Option<usize>,
}

impl HtmlReportWriter {
    pub fn new(context: Option<usize>) -> Self {
        Self { context }
    }
}

impl ReportWriter for HtmlReportWriter {
    fn write(&self, document: &DiffDocument, destination: &Path) -> Result<()> {
        let html = HtmlRenderer::render(document, self.context);
        write_report(destination, html.as_bytes())
    }
}

/// Writes the structured diff document as pretty JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter;

impl ReportWriter for JsonReportWriter {
    fn write(&self, document: &DiffDocument, destination: &Path) -> Result<()> {
        let json = JsonFormatter::format(document)?;
        write_report(destination, json.as_bytes())
    }
}

fn write_report(destination: &Path, contents: &[u8]) -> Result<()> {
    fs::write(destination, contents).map_err(|e| CompareError::write_failure(destination, e))?;
    log::info!("Wrote report {}", destination.display());
    Ok(())
}

const HTML_STYLE: &str = "\
table.diff {font-family: Courier, monospace; border: medium;}
.diff_header {background-color: #e0e0e0;}
td.diff_header {text-align: right;}
.diff_next {background-color: #c0c0c0;}
.diff_add {background-color: #aaffaa;}
.diff_chg {background-color: #ffff77;}
.diff_sub {background-color: #ffaaaa;}";

/// Side-by-side HTML rendering of a [`DiffDocument`]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Full HTML page. With `context`, unchanged rows further than that many
    /// rows from a change are folded away.
    pub fn render(document: &DiffDocument, context: Option<usize>) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{} vs {}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
            escape_html(&document.label_a),
            escape_html(&document.label_b),
            HTML_STYLE
        ));
        html.push_str(&Self::render_table(document, context));
        html.push_str(&format!(
            "<table class=\"diff\" summary=\"Legends\">\n<tr><th>Legends</th></tr>\n\
             <tr><td><span class=\"diff_add\">Added</span> \
             <span class=\"diff_chg\">Changed</span> \
             <span class=\"diff_sub\">Deleted</span></td></tr>\n</table>\n\
             <p>Generated {}</p>\n</body>\n</html>\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        html
    }

    /// The diff table alone
    pub fn render_table(document: &DiffDocument, context: Option<usize>) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<table class=\"diff\">\n<thead><tr>\
             <th class=\"diff_header\" colspan=\"2\">{}</th>\
             <th class=\"diff_header\" colspan=\"2\">{}</th></tr></thead>\n<tbody>\n",
            escape_html(&document.label_a),
            escape_html(&document.label_b)
        ));

        match context {
            None => {
                for row in &document.rows {
                    Self::render_row(&mut html, row);
                }
            }
            Some(n) => {
                let hunks = document.context_hunks(n);
                if hunks.is_empty() {
                    html.push_str("<tr><td colspan=\"4\">No Differences Found</td></tr>\n");
                }
                for (idx, hunk) in hunks.into_iter().enumerate() {
                    if idx > 0 {
                        html.push_str("<tr><td class=\"diff_next\" colspan=\"4\">&hellip;</td></tr>\n");
                    }
                    for row in &document.rows[hunk] {
                        Self::render_row(&mut html, row);
                    }
                }
            }
        }

        html.push_str("</tbody>\n</table>\n");
        html
    }

    fn render_row(html: &mut String, row: &DiffRow) {
        html.push_str("<tr>");
        Self::render_side(html, row.left.as_ref(), row.status);
        Self::render_side(html, row.right.as_ref(), row.status);
        html.push_str("</tr>\n");
    }

    fn render_side(html: &mut String, side: Option<&LineSide>, status: RowStatus) {
        let Some(side) = side else {
            html.push_str("<td class=\"diff_header\"></td><td nowrap=\"nowrap\"></td>");
            return;
        };

        html.push_str(&format!(
            "<td class=\"diff_header\">{}</td><td nowrap=\"nowrap\">",
            side.line_no
        ));
        for span in &side.spans {
            let text = escape_html(span.text.trim_end_matches(['\n', '\r']));
            let class = match (span.kind, status) {
                (SpanKind::Unchanged, _) => None,
                (_, RowStatus::Changed) => Some("diff_chg"),
                (SpanKind::Deleted, _) => Some("diff_sub"),
                (SpanKind::Inserted, _) => Some("diff_add"),
            };
            match class {
                Some(class) => {
                    html.push_str(&format!("<span class=\"{}\">{}</span>", class, text));
                }
                None => html.push_str(&text),
            }
        }
        html.push_str("</td>");
    }
}

/// Escape text for inclusion in HTML; spaces become `&nbsp;` so
/// indentation survives.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            ' ' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pretty printer for console summaries
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a workbook comparison summary
    pub fn print_workbook_diff(diff: &WorkbookDiff, left: &str, right: &str, output: &Path) {
        println!("🔍 Spreadsheet comparison: {} → {}", left, right);

        for sheet in &diff.sheets {
            if sheet.has_differences() {
                println!("├─ ❌ Sheet '{}': {} mismatch(es)", sheet.sheet, sheet.mismatch_count);
            } else {
                println!("├─ ✅ Sheet '{}': identical", sheet.sheet);
            }

            for notice in &sheet.notices {
                let what = match notice.dimension {
                    Dimension::Rows => "Rows",
                    Dimension::Columns => "Columns",
                };
                println!("│  ├─ {} differ: {} vs {}", what, notice.left, notice.right);
            }

            if !sheet.mismatches.is_empty() {
                let sample: Vec<&str> = sheet
                    .mismatches
                    .iter()
                    .take(5)
                    .map(|m| m.address.as_str())
                    .collect();
                let more = if sheet.mismatches.len() > 5 { ", ..." } else { "" };
                println!("│  └─ Mismatched cells: {}{}", sample.join(", "), more);
            }
        }

        println!("└─ Highlighted workbook: {}", output.display());
    }

    /// Print similarity scores for a document batch
    pub fn print_batch_result(batch: &BatchResult) {
        println!("📄 Similarity to '{}'", batch.reference);

        for (id, score) in &batch.scores {
            println!("├─ {}: {:.2}%", id, score);
        }
        for id in &batch.skipped {
            println!("├─ ⚠️  {}: skipped (unsupported input)", id);
        }
        for (id, message) in &batch.failures {
            println!("├─ ❌ {}: {}", id, message);
        }

        match batch.best_match() {
            Some((id, score)) => println!("└─ Best match: {} ({:.2}%)", id, score),
            None => println!("└─ No candidates scored"),
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format a workbook comparison as JSON
    pub fn format_workbook_diff(diff: &WorkbookDiff) -> Result<String> {
        let sheets: Vec<serde_json::Value> = diff
            .sheets
            .iter()
            .map(|sheet| {
                serde_json::json!({
                    "sheet": sheet.sheet,
                    "mismatch_count": sheet.mismatch_count,
                    "had_extra_rows": sheet.had_extra_rows,
                    "had_extra_columns": sheet.had_extra_columns,
                    "highlighted_cells": sheet.highlighted.highlight_count(),
                    "notices": sheet.notices,
                    "mismatches": sheet.mismatches,
                })
            })
            .collect();

        let json = serde_json::json!({
            "total_mismatches": diff.total_mismatches(),
            "sheets": sheets,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }
}
