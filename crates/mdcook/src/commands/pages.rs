//! `mdcook pages` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdcook_config::{CliSettings, Config};
use mdcook_renderer::Pages;

use super::build_processor;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Path to configuration file (default: auto-discover mdcook.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving one page per sample (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page file extension without leading dot (overrides config).
    #[arg(long)]
    extension: Option<String>,

    /// Warn about unknown directives instead of failing.
    #[arg(long)]
    lenient: bool,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any sample fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            extension: self.extension,
            strict: self.lenient.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        run(&config, &output).map(|_| ())
    }
}

fn run(config: &Config, output: &Output) -> Result<Vec<PathBuf>, CliError> {
    let inputs = config.require_inputs()?;
    let pages_config = &config.pages_resolved;

    output.rendering(inputs.len(), &pages_config.output_dir);
    if !config.directives.strict {
        output.lenient();
    }

    let processor = build_processor(config, false)?;
    let written = Pages::new(&processor, &pages_config.output_dir)
        .with_extension(pages_config.extension.as_str())
        .build(inputs)?;

    for page in &written {
        output.written(page);
    }
    output.done(format_args!("Wrote {} page(s)", written.len()));
    Ok(written)
}
