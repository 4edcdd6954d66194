//! mdcook CLI - cookbook generator for annotated code samples.
//!
//! Provides commands for:
//! - `cookbook`: Render all samples into one cookbook document
//! - `pages`: Render each sample into its own page
//! - `check`: Validate directives and snippet references without writing

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, CookbookArgs, PagesArgs};
use output::Output;

/// mdcook - turn annotated code samples into markdown documentation.
#[derive(Parser)]
#[command(name = "mdcook", version, about)]
struct Cli {
    /// Enable verbose output (log every rendered and written file).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all samples into one cookbook document.
    Cookbook(CookbookArgs),
    /// Render each sample into its own page.
    Pages(PagesArgs),
    /// Check samples for directive and snippet errors without writing output.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise RUST_LOG, falling back to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Cookbook(args) => args.execute(),
        Commands::Pages(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.fatal(&err);
        std::process::exit(1);
    }
}

/// Filter used without `--verbose` when `RUST_LOG` is unset.
///
/// Keeps lenient-mode unknown-directive warnings visible.
fn default_filter() -> EnvFilter {
    EnvFilter::new("warn")
}
