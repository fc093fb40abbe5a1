//! Error types for doccompare operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Structural mismatch: left has {left} sheets, right has {right} sheets")]
    StructuralMismatch { left: usize, right: usize },

    #[error("Unreadable source {path}: {message}")]
    UnreadableSource { path: PathBuf, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteFailure { path: PathBuf, message: String },

    #[error("Unsupported input kind: {path}")]
    UnsupportedInputKind { path: PathBuf },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl CompareError {
    pub fn structural_mismatch(left: usize, right: usize) -> Self {
        Self::StructuralMismatch { left, right }
    }

    pub fn unreadable(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    pub fn write_failure(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        Self::WriteFailure {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedInputKind { path: path.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Whether a batch should record this failure and keep going
    pub fn is_per_pair(&self) -> bool {
        matches!(
            self,
            Self::StructuralMismatch { .. }
                | Self::UnreadableSource { .. }
                | Self::WriteFailure { .. }
                | Self::UnsupportedInputKind { .. }
        )
    }
}
