//! Command-line interface for doccompare

use crate::config::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doccompare")]
#[command(about = "Cell-by-cell spreadsheet diffs and document similarity reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Logger reading `RUST_LOG` with an `info` default; `--verbose` raises
/// the default to `debug`
pub fn logger_builder(verbose: bool) -> env_logger::Builder {
    logger_builder_from(env_logger::Env::default(), verbose)
}

fn logger_builder_from(env: env_logger::Env<'_>, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two workbooks cell by cell and write a highlighted copy of the second
    Sheets {
        /// Original workbook
        file_a: PathBuf,

        /// Modified workbook
        file_b: PathBuf,

        /// Where to write the highlighted workbook
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Score documents against a reference and write side-by-side diff reports
    Docs {
        /// Reference document (PDF or DOCX)
        reference: PathBuf,

        /// Candidate documents or folders containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving one report per candidate
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Report format: "html", "json"
        #[arg(long, value_parser = ReportFormat::parse)]
        format: Option<ReportFormat>,

        /// Unchanged lines kept around each change (whole document if omitted)
        #[arg(long)]
        context: Option<usize>,

        /// Treat very frequent characters as junk on long texts
        #[arg(long)]
        autojunk: bool,

        /// Score candidates one at a time
        #[arg(long)]
        sequential: bool,

        /// Also write the scores as JSON to this file
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Write a configuration file with default settings
    InitConfig {
        /// Destination file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
