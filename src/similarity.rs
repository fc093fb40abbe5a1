//! Whole-document similarity scoring

use crate::matcher::SequenceMatcher;
use serde::{Deserialize, Serialize};

/// Two extracted documents and the names they are reported under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPair {
    pub name_a: String,
    pub name_b: String,
    pub record_a: String,
    pub record_b: String,
}

impl TextPair {
    pub fn new(
        name_a: impl Into<String>,
        record_a: impl Into<String>,
        name_b: impl Into<String>,
        record_b: impl Into<String>,
    ) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            record_a: record_a.into(),
            record_b: record_b.into(),
        }
    }

    /// Similarity of the two records, in percent
    pub fn similarity(&self) -> f64 {
        similarity(&self.record_a, &self.record_b)
    }

    pub fn similarity_with(&self, autojunk: bool) -> f64 {
        similarity_with(&self.record_a, &self.record_b, autojunk)
    }
}

/// Strip leading whitespace and fold every newline into a space.
///
/// Line structure does not matter for the holistic score, so this is lossy.
pub fn normalize(text: &str) -> String {
    text.trim_start().replace('\n', " ")
}

/// Percentage similarity of two texts in `[0, 100]`.
///
/// Two empty texts are 100% similar.
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    similarity_with(text_a, text_b, false)
}

pub fn similarity_with(text_a: &str, text_b: &str, autojunk: bool) -> f64 {
    let mut a: Vec<char> = normalize(text_a).chars().collect();
    let mut b: Vec<char> = normalize(text_b).chars().collect();

    // Greedy matching depends on argument order; fix one so the score is symmetric.
    if (a.len(), &a) > (b.len(), &b) {
        std::mem::swap(&mut a, &mut b);
    }

    let ratio = SequenceMatcher::with_autojunk(&a, &b, autojunk).ratio();
    (ratio * 100.0).clamp(0.0, 100.0)
}
