//! Main entry point for doccompare CLI

use clap::Parser;
use doccompare::cli::{logger_builder, Cli};
use doccompare::commands::{execute_command, GlobalOptions};

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, at debug level when verbose
    logger_builder(cli.verbose).init();

    let options = GlobalOptions {
        config: cli.config,
        quiet: cli.quiet,
    };

    if let Err(e) = execute_command(cli.command, &options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
