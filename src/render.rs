//! Side-by-side line diff with intra-line change spans
//!
//! Lines are aligned with [`SequenceMatcher`]; replaced regions are further
//! broken down by pairing the most similar lines and diffing each pair
//! character by character. The output is a structured [`DiffDocument`];
//! markup is left to the presentation layer.

use crate::matcher::{OpTag, SequenceMatcher};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Minimum character ratio for two lines to be shown as one changed line
const PAIR_CUTOFF: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Unchanged,
    /// Present only on the left side
    Deleted,
    /// Present only on the right side
    Inserted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Unchanged,
    Deleted,
    Inserted,
    Changed,
}

/// One side of a row: a 1-based line number and the line split into spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSide {
    pub line_no: usize,
    pub spans: Vec<Span>,
}

impl LineSide {
    fn whole(line_no: usize, kind: SpanKind, text: &str) -> Self {
        Self {
            line_no,
            spans: vec![Span::new(kind, text)],
        }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub status: RowStatus,
    pub left: Option<LineSide>,
    pub right: Option<LineSide>,
}

/// Row counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub deleted: usize,
    pub inserted: usize,
    pub changed: usize,
}

/// Structured side-by-side diff of two texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffDocument {
    pub label_a: String,
    pub label_b: String,
    pub rows: Vec<DiffRow>,
}

impl DiffDocument {
    /// Reassemble the left text from unchanged and left-only spans
    pub fn left_text(&self) -> String {
        self.rows
            .iter()
            .filter_map(|r| r.left.as_ref())
            .flat_map(|side| side.spans.iter())
            .filter(|s| s.kind != SpanKind::Inserted)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Reassemble the right text from unchanged and right-only spans
    pub fn right_text(&self) -> String {
        self.rows
            .iter()
            .filter_map(|r| r.right.as_ref())
            .flat_map(|side| side.spans.iter())
            .filter(|s| s.kind != SpanKind::Deleted)
            .map(|s| s.text.as_str())
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        self.rows.iter().any(|r| r.status != RowStatus::Unchanged)
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for row in &self.rows {
            match row.status {
                RowStatus::Unchanged => stats.unchanged += 1,
                RowStatus::Deleted => stats.deleted += 1,
                RowStatus::Inserted => stats.inserted += 1,
                RowStatus::Changed => stats.changed += 1,
            }
        }
        stats
    }

    /// Row ranges to display when only `context` rows around each change
    /// are kept. Overlapping or touching ranges are merged; an unchanged
    /// document yields no ranges.
    pub fn context_hunks(&self, context: usize) -> Vec<Range<usize>> {
        let mut hunks: Vec<Range<usize>> = Vec::new();
        for (idx, row) in self.rows.iter().enumerate() {
            if row.status == RowStatus::Unchanged {
                continue;
            }
            let start = idx.saturating_sub(context);
            let end = (idx + context + 1).min(self.rows.len());
            match hunks.last_mut() {
                Some(last) if start <= last.end => last.end = last.end.max(end),
                _ => hunks.push(start..end),
            }
        }
        hunks
    }

    /// Copy of the document keeping only rows inside [`context_hunks`](Self::context_hunks)
    pub fn with_context(&self, context: usize) -> DiffDocument {
        let rows = self
            .context_hunks(context)
            .into_iter()
            .flat_map(|hunk| self.rows[hunk].iter().cloned())
            .collect();
        DiffDocument {
            label_a: self.label_a.clone(),
            label_b: self.label_b.clone(),
            rows,
        }
    }
}

/// Split text into lines, keeping terminators so the lines concatenate
/// back to the input.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Render a side-by-side diff of two texts
pub fn render(text_a: &str, text_b: &str, label_a: &str, label_b: &str) -> DiffDocument {
    render_lines(&split_lines(text_a), &split_lines(text_b), label_a, label_b)
}

/// Render a side-by-side diff of two pre-split line sequences
pub fn render_lines(lines_a: &[&str], lines_b: &[&str], label_a: &str, label_b: &str) -> DiffDocument {
    let mut builder = RowBuilder {
        a: lines_a,
        b: lines_b,
        rows: Vec::new(),
    };

    for op in SequenceMatcher::new(lines_a, lines_b).opcodes() {
        match op.tag {
            OpTag::Equal => builder.equal(op.a, op.b),
            OpTag::Delete => builder.deleted(op.a),
            OpTag::Insert => builder.inserted(op.b),
            OpTag::Replace => builder.fancy_replace(op.a, op.b),
        }
    }

    log::debug!(
        "Rendered diff {} -> {}: {} rows",
        label_a,
        label_b,
        builder.rows.len()
    );

    DiffDocument {
        label_a: label_a.to_string(),
        label_b: label_b.to_string(),
        rows: builder.rows,
    }
}

enum Pending {
    Region(Range<usize>, Range<usize>),
    Pair { i: usize, j: usize, identical: bool },
}

struct RowBuilder<'s, 'a> {
    a: &'s [&'a str],
    b: &'s [&'a str],
    rows: Vec<DiffRow>,
}

impl RowBuilder<'_, '_> {
    fn equal(&mut self, a: Range<usize>, b: Range<usize>) {
        for (i, j) in a.zip(b) {
            self.rows.push(DiffRow {
                status: RowStatus::Unchanged,
                left: Some(LineSide::whole(i + 1, SpanKind::Unchanged, self.a[i])),
                right: Some(LineSide::whole(j + 1, SpanKind::Unchanged, self.b[j])),
            });
        }
    }

    fn deleted(&mut self, a: Range<usize>) {
        for i in a {
            self.rows.push(DiffRow {
                status: RowStatus::Deleted,
                left: Some(LineSide::whole(i + 1, SpanKind::Deleted, self.a[i])),
                right: None,
            });
        }
    }

    fn inserted(&mut self, b: Range<usize>) {
        for j in b {
            self.rows.push(DiffRow {
                status: RowStatus::Inserted,
                left: None,
                right: Some(LineSide::whole(j + 1, SpanKind::Inserted, self.b[j])),
            });
        }
    }

    /// Lines with no close counterpart are laid out next to each other
    fn plain_replace(&mut self, a: Range<usize>, b: Range<usize>) {
        let count = a.len().max(b.len());
        for k in 0..count {
            let i = a.start + k;
            let j = b.start + k;
            let left = (i < a.end).then(|| LineSide::whole(i + 1, SpanKind::Deleted, self.a[i]));
            let right = (j < b.end).then(|| LineSide::whole(j + 1, SpanKind::Inserted, self.b[j]));
            let status = match (&left, &right) {
                (Some(_), Some(_)) => RowStatus::Changed,
                (Some(_), None) => RowStatus::Deleted,
                _ => RowStatus::Inserted,
            };
            self.rows.push(DiffRow { status, left, right });
        }
    }

    /// Pair the most similar lines of a replaced block, then handle the
    /// lines before and after each pair. Regions wait on an explicit stack
    /// so the call depth stays flat for long rewritten blocks.
    fn fancy_replace(&mut self, a: Range<usize>, b: Range<usize>) {
        let mut pending = vec![Pending::Region(a, b)];

        while let Some(task) = pending.pop() {
            match task {
                Pending::Pair { i, j, identical: true } => self.equal(i..i + 1, j..j + 1),
                Pending::Pair { i, j, identical: false } => self.changed_pair(i, j),
                Pending::Region(a, b) => match (a.is_empty(), b.is_empty()) {
                    (true, true) => {}
                    (false, true) => self.deleted(a),
                    (true, false) => self.inserted(b),
                    (false, false) => match self.best_pair(a.clone(), b.clone()) {
                        None => self.plain_replace(a, b),
                        Some((i, j, identical)) => {
                            // Popped in reverse: before, pair, after.
                            pending.push(Pending::Region(i + 1..a.end, j + 1..b.end));
                            pending.push(Pending::Pair { i, j, identical });
                            pending.push(Pending::Region(a.start..i, b.start..j));
                        }
                    },
                },
            }
        }
    }

    /// Most similar line pair at or above the cutoff, else the first
    /// identical pair, else nothing.
    fn best_pair(&self, a: Range<usize>, b: Range<usize>) -> Option<(usize, usize, bool)> {
        let chars_a: Vec<Vec<char>> = self.a[a.clone()]
            .iter()
            .map(|line| line.chars().collect())
            .collect();

        let mut best_ratio = PAIR_CUTOFF - 0.01;
        let mut best: Option<(usize, usize)> = None;
        let mut identical: Option<(usize, usize)> = None;

        for j in b {
            let line_b: Vec<char> = self.b[j].chars().collect();
            for (i, line_a) in a.clone().zip(&chars_a) {
                if self.a[i] == self.b[j] {
                    identical.get_or_insert((i, j));
                    continue;
                }
                let cruncher = SequenceMatcher::new(line_a, &line_b);
                if cruncher.real_quick_ratio() > best_ratio
                    && cruncher.quick_ratio() > best_ratio
                    && cruncher.ratio() > best_ratio
                {
                    best_ratio = cruncher.ratio();
                    best = Some((i, j));
                }
            }
        }

        match best {
            Some((i, j)) if best_ratio >= PAIR_CUTOFF => Some((i, j, false)),
            _ => identical.map(|(i, j)| (i, j, true)),
        }
    }

    fn changed_pair(&mut self, i: usize, j: usize) {
        let (left, right) = intraline_spans(self.a[i], self.b[j]);
        self.rows.push(DiffRow {
            status: RowStatus::Changed,
            left: Some(LineSide {
                line_no: i + 1,
                spans: left,
            }),
            right: Some(LineSide {
                line_no: j + 1,
                spans: right,
            }),
        });
    }
}

/// Character-level spans for a changed line pair
pub fn intraline_spans(line_a: &str, line_b: &str) -> (Vec<Span>, Vec<Span>) {
    let a: Vec<char> = line_a.chars().collect();
    let b: Vec<char> = line_b.chars().collect();
    let mut left: Vec<Span> = Vec::new();
    let mut right: Vec<Span> = Vec::new();

    for op in SequenceMatcher::new(&a, &b).opcodes() {
        let text_a: String = a[op.a.clone()].iter().collect();
        let text_b: String = b[op.b.clone()].iter().collect();
        match op.tag {
            OpTag::Equal => {
                push_span(&mut left, SpanKind::Unchanged, text_a);
                push_span(&mut right, SpanKind::Unchanged, text_b);
            }
            OpTag::Delete => push_span(&mut left, SpanKind::Deleted, text_a),
            OpTag::Insert => push_span(&mut right, SpanKind::Inserted, text_b),
            OpTag::Replace => {
                push_span(&mut left, SpanKind::Deleted, text_a);
                push_span(&mut right, SpanKind::Inserted, text_b);
            }
        }
    }
    (left, right)
}

fn push_span(spans: &mut Vec<Span>, kind: SpanKind, text: String) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(&text),
        _ => spans.push(Span::new(kind, text)),
    }
}
