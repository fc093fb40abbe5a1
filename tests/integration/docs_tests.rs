//! Integration tests for document extraction, scoring and report writing

use crate::common::TestFixture;
use doccompare::extract::{DocumentExtractor, TextExtractor};
use doccompare::output::{HtmlReportWriter, JsonReportWriter};
use doccompare::progress::ProgressReporter;
use doccompare::render::DiffDocument;
use doccompare::{compare_documents, CompareConfig, CompareError, ReportFormat};
use std::fs;

#[test]
fn test_docx_extraction() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_docx("memo.docx", &["First paragraph", "Fish & chips <cheap>"])
        .unwrap();

    let text = DocumentExtractor.extract(&path).unwrap().unwrap();
    assert_eq!(text, "First paragraph\nFish & chips <cheap>\n");
}

#[test]
fn test_batch_writes_html_reports() {
    let fixture = TestFixture::new().unwrap();
    let reference = fixture
        .create_docx("reference.docx", &["The contract starts on Monday.", "Payment is due in 30 days."])
        .unwrap();
    let same = fixture
        .create_docx("same.docx", &["The contract starts on Monday.", "Payment is due in 30 days."])
        .unwrap();
    let edited = fixture
        .create_docx("edited.docx", &["The contract starts on Tuesday.", "Payment is due in 45 days."])
        .unwrap();
    let reports = fixture.create_dir("reports").unwrap();

    let config = CompareConfig {
        output_dir: Some(reports.clone()),
        ..Default::default()
    };

    let batch = compare_documents(
        &DocumentExtractor,
        &reference,
        &[same, edited],
        &config,
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert_eq!(batch.reference, "reference");
    assert_eq!(batch.scores["same"], 100.0);
    assert!(batch.scores["edited"] < 100.0);
    assert_eq!(batch.best_match(), Some(("same", 100.0)));

    let html = fs::read_to_string(reports.join("edited-reference.html")).unwrap();
    assert!(html.contains("diff_chg"));
    assert!(html.contains("Tuesday"));
    assert!(reports.join("same-reference.html").exists());
}

#[test]
fn test_batch_writes_json_reports() {
    let fixture = TestFixture::new().unwrap();
    let reference = fixture.create_docx("ref.docx", &["alpha", "beta"]).unwrap();
    let candidate = fixture.create_docx("cand.docx", &["alpha", "gamma"]).unwrap();
    let reports = fixture.create_dir("out").unwrap();

    let config = CompareConfig {
        output_dir: Some(reports.clone()),
        report_format: ReportFormat::Json,
        ..Default::default()
    };

    compare_documents(
        &DocumentExtractor,
        &reference,
        &[candidate],
        &config,
        &JsonReportWriter,
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    let json = fs::read_to_string(reports.join("cand-ref.json")).unwrap();
    let document: DiffDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(document.label_a, "cand");
    assert_eq!(document.label_b, "ref");
    assert_eq!(document.left_text(), "alpha\ngamma\n");
    assert_eq!(document.right_text(), "alpha\nbeta\n");
}

#[test]
fn test_unsupported_candidates_are_skipped() {
    let fixture = TestFixture::new().unwrap();
    let reference = fixture.create_docx("ref.docx", &["text"]).unwrap();
    let notes = fixture.create_file("notes.txt", "text").unwrap();
    let good = fixture.create_docx("good.docx", &["text"]).unwrap();

    let batch = compare_documents(
        &DocumentExtractor,
        &reference,
        &[notes, good],
        &CompareConfig::default(),
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert_eq!(batch.skipped, vec!["notes".to_string()]);
    assert_eq!(batch.scores.len(), 1);
    assert!(batch.reports[0].report_path.is_none());
}

#[test]
fn test_unreadable_candidate_is_recorded() {
    let fixture = TestFixture::new().unwrap();
    let reference = fixture.create_docx("ref.docx", &["text"]).unwrap();
    let broken = fixture.create_corrupted_file("broken.pdf").unwrap();
    let good = fixture.create_docx("good.docx", &["text"]).unwrap();

    let batch = compare_documents(
        &DocumentExtractor,
        &reference,
        &[broken, good],
        &CompareConfig::default(),
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert!(batch.failures.contains_key("broken"));
    assert_eq!(batch.scores.len(), 1);
}

#[test]
fn test_unsupported_reference_is_an_error() {
    let fixture = TestFixture::new().unwrap();
    let reference = fixture.create_file("ref.txt", "text").unwrap();
    let good = fixture.create_docx("good.docx", &["text"]).unwrap();

    let err = compare_documents(
        &DocumentExtractor,
        &reference,
        &[good],
        &CompareConfig::default(),
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap_err();

    assert!(matches!(err, CompareError::UnsupportedInputKind { .. }));
}

#[test]
fn test_pdf_pages_extracted_in_order() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_pdf("report.pdf", &["First page text", "Second page text"])
        .unwrap();

    let text = DocumentExtractor.extract(&path).unwrap().unwrap();
    let first = text.find("First page text").expect("first page missing");
    let second = text.find("Second page text").expect("second page missing");
    assert!(first < second);
}

#[test]
fn test_pdf_candidates_are_scored() {
    let fixture = TestFixture::new().unwrap();
    let pages = ["Quarterly summary", "Revenue grew in every region"];
    let reference = fixture.create_pdf("reference.pdf", &pages).unwrap();
    let copy = fixture.create_pdf("copy.pdf", &pages).unwrap();
    let other = fixture
        .create_pdf("other.pdf", &["Meeting notes", "Nothing was decided"])
        .unwrap();
    let reports = fixture.create_dir("reports").unwrap();

    let config = CompareConfig {
        output_dir: Some(reports.clone()),
        ..Default::default()
    };

    let batch = compare_documents(
        &DocumentExtractor,
        &reference,
        &[copy, other],
        &config,
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert!(batch.failures.is_empty());
    assert_eq!(batch.scores["copy"], 100.0);
    assert!(batch.scores["other"] < 100.0);
    assert!(reports.join("copy-reference.html").exists());
    assert!(reports.join("other-reference.html").exists());
}

#[test]
fn test_same_file_name_in_two_folders() {
    let fixture = TestFixture::new().unwrap();
    fixture.create_dir("one").unwrap();
    fixture.create_dir("two").unwrap();
    let reference = fixture.create_docx("ref.docx", &["hello world"]).unwrap();
    let first = fixture.create_docx("one/draft.docx", &["hello world"]).unwrap();
    let second = fixture.create_docx("two/draft.docx", &["goodbye"]).unwrap();
    let reports = fixture.create_dir("reports").unwrap();

    let config = CompareConfig {
        output_dir: Some(reports.clone()),
        ..Default::default()
    };

    let batch = compare_documents(
        &DocumentExtractor,
        &reference,
        &[first, second],
        &config,
        &HtmlReportWriter::default(),
        &ProgressReporter::new_minimal(),
    )
    .unwrap();

    assert_eq!(batch.scores.len(), 2);
    assert_eq!(batch.scores["draft"], 100.0);
    assert!(batch.scores["draft-2"] < 100.0);

    let written = fs::read_dir(&reports).unwrap().count();
    assert_eq!(written, 2);
    assert!(reports.join("draft-ref.html").exists());
    assert!(reports.join("draft-2-ref.html").exists());
}
