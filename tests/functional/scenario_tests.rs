//! Functional tests for the documented comparison scenarios

use crate::common::int_grid;
use doccompare::output::ReportWriter;
use doccompare::progress::ProgressReporter;
use doccompare::render::{render, DiffDocument, RowStatus, SpanKind};
use doccompare::{compare, score_batch, similarity, CompareConfig, Result, TextSource};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[test]
fn test_single_cell_change() {
    let a = int_grid("Sheet1", &[vec![1, 2], vec![3, 4]]);
    let b = int_grid("Sheet1", &[vec![1, 9], vec![3, 4]]);

    let diff = compare(&a, &b);
    assert_eq!(diff.mismatch_count, 1);
    assert!(diff.highlighted.is_highlighted(1, 2));
    assert_eq!(diff.highlighted.highlight_count(), 1);
    assert!(!diff.had_extra_rows);
    assert!(!diff.had_extra_columns);
}

#[test]
fn test_extra_row_in_b() {
    let a = int_grid("Sheet1", &[vec![1, 2], vec![3, 4]]);
    let b = int_grid("Sheet1", &[vec![1, 2], vec![3, 4], vec![5, 6]]);

    let diff = compare(&a, &b);
    assert!(diff.had_extra_rows);
    assert_eq!(diff.mismatch_count, 0);
    assert!(diff.highlighted.is_highlighted(3, 1));
    assert!(diff.highlighted.is_highlighted(3, 2));
    assert!(!diff.highlighted.is_highlighted(1, 1));
}

#[test]
fn test_similarity_ordering() {
    let near = similarity("hello world", "hello world!");
    let far = similarity("hello world", "goodbye");
    assert!(near < 100.0);
    assert!(near > far);
    assert_eq!(similarity("hello world", "hello world"), 100.0);
}

#[test]
fn test_render_pairs_similar_lines() {
    let doc = render(
        "intro\nThe quick brown fox\noutro\n",
        "intro\nThe quick brown cat\noutro\n",
        "a",
        "b",
    );

    assert_eq!(doc.rows.len(), 3);
    let changed = &doc.rows[1];
    assert_eq!(changed.status, RowStatus::Changed);

    let left = changed.left.as_ref().unwrap();
    assert!(left
        .spans
        .iter()
        .any(|s| s.kind == SpanKind::Deleted && s.text.contains("fox")));
    let right = changed.right.as_ref().unwrap();
    assert!(right
        .spans
        .iter()
        .any(|s| s.kind == SpanKind::Inserted && s.text.contains("cat")));
}

#[test]
fn test_render_unpaired_lines() {
    let doc = render("keep\nremoved entirely\n", "keep\n", "a", "b");
    assert_eq!(doc.rows[1].status, RowStatus::Deleted);
    assert!(doc.rows[1].right.is_none());

    let doc = render("keep\n", "keep\nbrand new\n", "a", "b");
    assert_eq!(doc.rows[1].status, RowStatus::Inserted);
    assert!(doc.rows[1].left.is_none());
}

#[derive(Default)]
struct CollectingWriter {
    destinations: Mutex<Vec<PathBuf>>,
}

impl ReportWriter for CollectingWriter {
    fn write(&self, _document: &DiffDocument, destination: &Path) -> Result<()> {
        self.destinations.lock().unwrap().push(destination.to_path_buf());
        Ok(())
    }
}

#[test]
fn test_three_candidates_against_one_reference() {
    let reference = TextSource::new("Document24", "Terms of service.\nVersion two.\n");
    let candidates = vec![
        TextSource::new("Document25", "Terms of service.\nVersion two.\n"),
        TextSource::new("Document26", "Terms of service.\nVersion three.\n"),
        TextSource::new("Document27", "Privacy policy.\n"),
    ];
    let writer = CollectingWriter::default();
    let config = CompareConfig {
        output_dir: Some(PathBuf::from("diffs")),
        ..Default::default()
    };

    let batch = score_batch(
        &reference,
        &candidates,
        &config,
        &writer,
        &ProgressReporter::new_minimal(),
    );

    assert_eq!(batch.scores.len(), 3);
    assert!(batch.scores.values().all(|s| (0.0..=100.0).contains(s)));
    assert!(batch.failures.is_empty());

    let mut written = writer.destinations.into_inner().unwrap();
    written.sort();
    assert_eq!(
        written,
        vec![
            PathBuf::from("diffs/Document25-Document24.html"),
            PathBuf::from("diffs/Document26-Document24.html"),
            PathBuf::from("diffs/Document27-Document24.html"),
        ]
    );
}
