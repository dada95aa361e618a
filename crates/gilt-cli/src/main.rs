//! Gilt command-line driver
//!
//! Evaluates a JSON manifest of decorated class declarations and object
//! literals with the builtin decorator library, then prints the resulting
//! property tables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod manifest;
mod output;

#[derive(Parser)]
#[command(name = "gilt")]
#[command(about = "Apply decorators to classes and object literals", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a manifest and print the decorated properties
    Run {
        /// Manifest file (JSON)
        manifest: PathBuf,
        /// Engine config file (defaults to a discovered gilt.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every decorator invocation to stderr
        #[arg(long)]
        trace: bool,
        /// Color output: auto, always, never
        #[arg(long)]
        color: Option<String>,
    },

    /// Validate a manifest without evaluating it
    Check {
        /// Manifest file (JSON)
        manifest: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            manifest,
            config,
            trace,
            color,
        } => commands::run::execute(commands::run::RunArgs {
            manifest,
            config,
            trace,
            color,
        }),
        Commands::Check { manifest } => commands::check::execute(&manifest),
    }
}
