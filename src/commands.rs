//! Command implementations for doccompare CLI

use crate::cli::Commands;
use crate::config::{CompareConfig, ReportFormat};
use crate::discovery::resolve_candidates;
use crate::error::{CompareError, Result};
use crate::extract::DocumentExtractor;
use crate::output::{HtmlReportWriter, JsonFormatter, JsonReportWriter, PrettyPrinter, ReportWriter};
use crate::progress::ProgressReporter;
use crate::report::{compare_documents, compare_spreadsheets};
use crate::sheets::{CalamineReader, XlsxWriter};
use std::path::{Path, PathBuf};

/// Options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

/// Execute a command
pub fn execute_command(command: Commands, options: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Sheets {
            file_a,
            file_b,
            output,
        } => sheets_command(options, &file_a, &file_b, &output),
        Commands::Docs {
            reference,
            inputs,
            output_dir,
            format,
            context,
            autojunk,
            sequential,
            summary,
        } => {
            let overrides = DocsOverrides {
                output_dir,
                format,
                context,
                autojunk,
                sequential,
            };
            docs_command(options, &reference, &inputs, overrides, summary.as_deref())
        }
        Commands::InitConfig { path, force } => init_config_command(&path, force),
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct DocsOverrides {
    pub output_dir: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub context: Option<usize>,
    pub autojunk: bool,
    pub sequential: bool,
}

impl DocsOverrides {
    pub fn apply(self, config: &mut CompareConfig) {
        if let Some(dir) = self.output_dir {
            config.output_dir = Some(dir);
        }
        if let Some(format) = self.format {
            config.report_format = format;
        }
        if let Some(context) = self.context {
            config.context_lines = Some(context);
        }
        if self.autojunk {
            config.autojunk = true;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

fn load_config(options: &GlobalOptions) -> Result<CompareConfig> {
    match &options.config {
        Some(path) => CompareConfig::load(path),
        None => Ok(CompareConfig::default()),
    }
}

/// Compare two workbooks and write the highlighted copy
fn sheets_command(options: &GlobalOptions, file_a: &Path, file_b: &Path, output: &Path) -> Result<()> {
    let config = load_config(options)?;
    let writer = XlsxWriter::new(config.highlight_rgb()?);

    let mut progress = if options.quiet {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_sheets()
    };

    let diff = compare_spreadsheets(&CalamineReader, &writer, file_a, file_b, output, &mut progress)?;
    progress.finish_all("Comparison complete");
    drop(progress);

    PrettyPrinter::print_workbook_diff(
        &diff,
        &file_a.display().to_string(),
        &file_b.display().to_string(),
        output,
    );
    Ok(())
}

/// Score candidates against a reference document
fn docs_command(
    options: &GlobalOptions,
    reference: &Path,
    inputs: &[PathBuf],
    overrides: DocsOverrides,
    summary: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(options)?;
    overrides.apply(&mut config);
    config.validate()?;

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| CompareError::write_failure(dir, e))?;
    }

    let candidates = resolve_candidates(inputs, reference)?;
    if candidates.is_empty() {
        return Err(CompareError::invalid_input("no candidate documents found"));
    }

    let writer: Box<dyn ReportWriter + Sync> = match config.report_format {
        ReportFormat::Html => Box::new(HtmlReportWriter::new(config.context_lines)),
        ReportFormat::Json => Box::new(JsonReportWriter),
    };

    let mut progress = if options.quiet {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_batch(candidates.len() as u64)
    };

    let batch = compare_documents(
        &DocumentExtractor,
        reference,
        &candidates,
        &config,
        writer.as_ref(),
        &progress,
    )?;
    progress.finish_batch();
    drop(progress);

    PrettyPrinter::print_batch_result(&batch);

    if let Some(path) = summary {
        let json = JsonFormatter::format(&batch)?;
        std::fs::write(path, json).map_err(|e| CompareError::write_failure(path, e))?;
        log::info!("Wrote summary {}", path.display());
    }

    Ok(())
}

/// Write a default configuration file
fn init_config_command(path: &Path, force: bool) -> Result<()> {
    CompareConfig::default().save(path, force)?;
    println!("✅ Wrote default configuration to: {}", path.display());
    Ok(())
}
