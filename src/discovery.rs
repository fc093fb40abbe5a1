//! Candidate discovery for document batches

use crate::error::{CompareError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files directly inside `dir`, sorted by file name.
///
/// Hidden files and office lock files (`~$name.docx`) are ignored.
pub fn collect_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name.starts_with("~$") {
            continue;
        }
        files.push(entry.into_path());
    }

    log::debug!("Found {} candidate(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Expand a mix of folders and files into the candidate list, keeping
/// argument order and dropping the reference itself.
pub fn resolve_candidates(inputs: &[PathBuf], reference: &Path) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for input in inputs {
        if input.is_dir() {
            candidates.extend(collect_candidates(input)?);
        } else if input.is_file() {
            candidates.push(input.clone());
        } else {
            return Err(CompareError::invalid_input(format!(
                "{} does not exist",
                input.display()
            )));
        }
    }

    candidates.retain(|path| !same_file(path, reference));
    Ok(candidates)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
