//! codeswitch CLI - multi-language code block switcher.
//!
//! Provides commands for:
//! - `apply`: Turn `data-multilang` groups in built HTML into switchers
//! - `check`: Report markup defects without writing anything

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ApplyArgs, CheckArgs};
use output::Output;

/// codeswitch - Multi-language code block switcher.
#[derive(Parser)]
#[command(name = "codeswitch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render language switchers into HTML files.
    Apply(ApplyArgs),
    /// Report multi-language markup defects.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Apply(args) => args.input.verbose,
        Commands::Check(args) => args.input.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Apply(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
