//! Report assembly for both comparison domains
//!
//! Spreadsheets: load both workbooks, compare sheet by sheet, write the
//! highlighted right-hand workbook. Documents: score every candidate
//! against a reference, render a side-by-side diff per pair and hand it to
//! a report writer.

use crate::config::CompareConfig;
use crate::error::{CompareError, Result};
use crate::extract::TextExtractor;
use crate::output::ReportWriter;
use crate::progress::ProgressReporter;
use crate::render::{render, DiffStats};
use crate::sheets::{SpreadsheetReader, SpreadsheetWriter};
use crate::similarity::similarity_with;
use crate::tabular::{compare_workbooks, WorkbookDiff};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Compare two workbooks and write the highlighted copy of `right` to
/// `output`.
///
/// Nothing is written when the sheet counts differ.
pub fn compare_spreadsheets<R, W>(
    reader: &R,
    writer: &W,
    left: &Path,
    right: &Path,
    output: &Path,
    progress: &mut ProgressReporter,
) -> Result<WorkbookDiff>
where
    R: SpreadsheetReader + ?Sized,
    W: SpreadsheetWriter + ?Sized,
{
    let sheets_a = reader.load(left)?;
    let sheets_b = reader.load(right)?;
    progress.finish_loading(&format!(
        "Loaded {} and {} sheet(s)",
        sheets_a.len(),
        sheets_b.len()
    ));

    let diff = compare_workbooks(&sheets_a, &sheets_b)?;
    progress.finish_comparing(&format!("{} mismatch(es)", diff.total_mismatches()));

    writer.save(&diff.highlighted_sheets(), output)?;
    Ok(diff)
}

/// A document's name and its extracted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSource {
    pub id: String,
    pub text: String,
}

impl TextSource {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Outcome for one scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub id: String,
    pub similarity: f64,
    pub stats: DiffStats,
    pub report_path: Option<PathBuf>,
}

/// Result of scoring a batch of candidates against one reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub reference: String,
    pub generated_at: DateTime<Utc>,
    /// Candidate id to similarity percentage, in candidate order
    pub scores: IndexMap<String, f64>,
    pub reports: Vec<CandidateReport>,
    /// Candidates whose input kind has no extractor
    pub skipped: Vec<String>,
    /// Candidates that could not be extracted, scored or written
    pub failures: IndexMap<String, String>,
}

impl BatchResult {
    fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            generated_at: Utc::now(),
            ..Default::default()
        }
    }

    /// Highest scoring candidate
    pub fn best_match(&self) -> Option<(&str, f64)> {
        self.scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, score)| (id.as_str(), *score))
    }
}

/// Score and render every candidate against the reference.
///
/// Each candidate is independent: a failure to write one report is recorded
/// and the rest of the batch still runs. Reports are only written when an
/// output directory is configured. Candidates sharing an id are told apart
/// with a numeric suffix (`draft`, `draft-2`).
pub fn score_batch<W>(
    reference: &TextSource,
    candidates: &[TextSource],
    config: &CompareConfig,
    writer: &W,
    progress: &ProgressReporter,
) -> BatchResult
where
    W: ReportWriter + Sync + ?Sized,
{
    let ids = unique_ids(candidates.iter().map(|c| c.id.as_str()));
    let run = |(candidate, id): (&TextSource, &String)| {
        let outcome = score_candidate(reference, candidate, id, config, writer);
        progress.candidate_done(id);
        (id.clone(), outcome)
    };

    let outcomes: Vec<(String, Result<CandidateReport>)> = if config.parallel {
        candidates.par_iter().zip(ids.par_iter()).map(run).collect()
    } else {
        candidates.iter().zip(ids.iter()).map(run).collect()
    };

    let mut batch = BatchResult::new(&reference.id);
    for (id, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                batch.scores.insert(id, report.similarity);
                batch.reports.push(report);
            }
            Err(e) => {
                log::warn!("Candidate '{}' failed: {}", id, e);
                batch.failures.insert(id, e.to_string());
            }
        }
    }
    batch
}

fn score_candidate<W>(
    reference: &TextSource,
    candidate: &TextSource,
    id: &str,
    config: &CompareConfig,
    writer: &W,
) -> Result<CandidateReport>
where
    W: ReportWriter + ?Sized,
{
    let similarity = similarity_with(&candidate.text, &reference.text, config.autojunk);
    let document = render(&candidate.text, &reference.text, id, &reference.id);

    let report_path = match config.output_dir {
        Some(_) => {
            let path = config.report_path(id, &reference.id)?;
            writer.write(&document, &path)?;
            Some(path)
        }
        None => None,
    };

    log::debug!("Candidate '{}': {:.2}% similar", id, similarity);
    Ok(CandidateReport {
        id: id.to_string(),
        similarity,
        stats: document.stats(),
        report_path,
    })
}

/// Extract the reference and every candidate, then score the batch.
///
/// The reference must be extractable; candidates with an unsupported kind
/// are skipped and candidates that fail to extract are recorded as failures.
pub fn compare_documents<E, W>(
    extractor: &E,
    reference: &Path,
    candidates: &[PathBuf],
    config: &CompareConfig,
    writer: &W,
    progress: &ProgressReporter,
) -> Result<BatchResult>
where
    E: TextExtractor + Sync + ?Sized,
    W: ReportWriter + Sync + ?Sized,
{
    let reference_text = extractor
        .extract(reference)?
        .ok_or_else(|| CompareError::unsupported(reference))?;
    let reference = TextSource::new(document_id(reference), reference_text);

    let stems: Vec<String> = candidates.iter().map(|path| document_id(path)).collect();
    let ids = unique_ids(stems.iter().map(String::as_str));

    let extracted: Vec<(String, Result<Option<String>>)> = if config.parallel {
        candidates
            .par_iter()
            .zip(ids.into_par_iter())
            .map(|(path, id)| (id, extractor.extract(path)))
            .collect()
    } else {
        candidates
            .iter()
            .zip(ids)
            .map(|(path, id)| (id, extractor.extract(path)))
            .collect()
    };

    let mut sources = Vec::new();
    let mut skipped = Vec::new();
    let mut failures = IndexMap::new();
    for (id, outcome) in extracted {
        match outcome {
            Ok(Some(text)) => sources.push(TextSource::new(id, text)),
            Ok(None) => {
                log::warn!("Skipping '{}': unsupported input kind", id);
                progress.candidate_done(&id);
                skipped.push(id);
            }
            Err(e) if !e.is_per_pair() => return Err(e),
            Err(e) => {
                log::warn!("Skipping '{}': {}", id, e);
                progress.candidate_done(&id);
                failures.insert(id, e.to_string());
            }
        }
    }

    let mut batch = score_batch(&reference, &sources, config, writer, progress);
    batch.skipped = skipped;
    for (id, message) in failures {
        batch.failures.insert(id, message);
    }
    Ok(batch)
}

/// File stem used to identify a document in scores and report names
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Suffix repeated ids with `-2`, `-3`, ... so each one names a single
/// score entry and report file
fn unique_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let ids: Vec<&str> = ids.into_iter().collect();
    let mut seen: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();
    let mut claimed = HashSet::new();
    ids.into_iter()
        .map(|id| {
            if claimed.insert(id.to_string()) {
                return id.to_string();
            }
            let mut n = 2;
            loop {
                let candidate = format!("{}-{}", id, n);
                if seen.insert(candidate.clone()) {
                    claimed.insert(candidate.clone());
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}
