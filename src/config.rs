//! Report configuration
//!
//! Every output location is supplied by the caller; nothing in the library
//! falls back to a hardcoded path.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default fill for highlighted cells (solid red)
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "FF3333";

/// Format of rendered text diff reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid report format: {}. Use 'html' or 'json'", s)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Directory that receives one diff report per candidate
    pub output_dir: Option<PathBuf>,
    pub report_format: ReportFormat,
    /// RGB hex fill used for highlighted cells
    pub highlight_color: String,
    /// Ignore very frequent characters as match anchors on long texts
    pub autojunk: bool,
    /// Score batch candidates on the rayon pool
    pub parallel: bool,
    /// Keep only this many unchanged rows around each change in reports
    pub context_lines: Option<usize>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            report_format: ReportFormat::Html,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            autojunk: false,
            parallel: true,
            context_lines: None,
        }
    }
}

impl CompareConfig {
    /// Load a JSON config file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CompareError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON, refusing to overwrite unless forced
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(CompareError::config(format!(
                "{} already exists, use --force to overwrite",
                path.display()
            )));
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.highlight_rgb()?;
        Ok(())
    }

    /// Highlight color as a `0xRRGGBB` integer
    pub fn highlight_rgb(&self) -> Result<u32> {
        parse_rgb(&self.highlight_color)
    }

    /// Output directory, or an error naming the option that is missing
    pub fn require_output_dir(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .ok_or_else(|| CompareError::config("no output directory configured"))
    }

    /// Report path for a candidate/reference pair: `<candidate>-<reference>.<ext>`
    pub fn report_path(&self, candidate: &str, reference: &str) -> Result<PathBuf> {
        let dir = self.require_output_dir()?;
        Ok(dir.join(format!(
            "{}-{}.{}",
            candidate,
            reference,
            self.report_format.extension()
        )))
    }
}

fn parse_rgb(s: &str) -> Result<u32> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CompareError::config(format!(
            "Invalid highlight color '{}': expected six hex digits",
            s
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| CompareError::config(format!("Invalid highlight color '{}'", s)))
}
