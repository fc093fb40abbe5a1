//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use doccompare::cli::{Cli, Commands};
use doccompare::ReportFormat;
use std::path::PathBuf;

#[test]
fn test_cli_sheets_command() {
    let cli = Cli::try_parse_from(["doccompare", "sheets", "a.xlsx", "b.xlsx", "--output", "out.xlsx"])
        .unwrap();
    assert!(!cli.verbose);
    assert!(!cli.quiet);
    match cli.command {
        Commands::Sheets { file_a, file_b, output } => {
            assert_eq!(file_a, PathBuf::from("a.xlsx"));
            assert_eq!(file_b, PathBuf::from("b.xlsx"));
            assert_eq!(output, PathBuf::from("out.xlsx"));
        }
        _ => panic!("Expected Sheets command"),
    }
}

#[test]
fn test_cli_sheets_requires_output() {
    assert!(Cli::try_parse_from(["doccompare", "sheets", "a.xlsx", "b.xlsx"]).is_err());
}

#[test]
fn test_cli_docs_defaults() {
    let cli = Cli::try_parse_from(["doccompare", "docs", "ref.docx", "folder"]).unwrap();
    match cli.command {
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
            assert_eq!(reference, PathBuf::from("ref.docx"));
            assert_eq!(inputs, vec![PathBuf::from("folder")]);
            assert!(output_dir.is_none());
            assert!(format.is_none());
            assert!(context.is_none());
            assert!(!autojunk);
            assert!(!sequential);
            assert!(summary.is_none());
        }
        _ => panic!("Expected Docs command"),
    }
}

#[test]
fn test_cli_docs_with_options() {
    let cli = Cli::try_parse_from([
        "doccompare",
        "docs",
        "ref.pdf",
        "a.pdf",
        "b.docx",
        "--output-dir",
        "reports",
        "--format",
        "JSON",
        "--context",
        "5",
        "--autojunk",
        "--summary",
        "scores.json",
    ])
    .unwrap();

    match cli.command {
        Commands::Docs {
            inputs,
            output_dir,
            format,
            context,
            autojunk,
            summary,
            ..
        } => {
            assert_eq!(inputs.len(), 2);
            assert_eq!(output_dir, Some(PathBuf::from("reports")));
            assert_eq!(format, Some(ReportFormat::Json));
            assert_eq!(context, Some(5));
            assert!(autojunk);
            assert_eq!(summary, Some(PathBuf::from("scores.json")));
        }
        _ => panic!("Expected Docs command"),
    }
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "doccompare",
        "init-config",
        "settings.json",
        "--force",
        "--config",
        "other.json",
        "-q",
    ])
    .unwrap();
    assert!(cli.quiet);
    assert_eq!(cli.config, Some(PathBuf::from("other.json")));
    match cli.command {
        Commands::InitConfig { path, force } => {
            assert_eq!(path, PathBuf::from("settings.json"));
            assert!(force);
        }
        _ => panic!("Expected InitConfig command"),
    }
}

#[test]
fn test_report_format_parse() {
    assert_eq!(ReportFormat::parse("html"), Ok(ReportFormat::Html));
    assert_eq!(ReportFormat::parse("Json"), Ok(ReportFormat::Json));
    assert!(ReportFormat::parse("pdf").is_err());
}
