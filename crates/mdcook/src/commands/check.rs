//! `mdcook check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdcook_config::{CliSettings, Config};
use mdcook_renderer::check_inputs;

use super::build_processor;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover mdcook.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Always checks strictly, regardless of `directives.strict`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any sample has errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), Some(&CliSettings::default()))?;
        run(&config, &output)
    }
}

fn run(config: &Config, output: &Output) -> Result<(), CliError> {
    let inputs = config.require_inputs()?;
    let processor = build_processor(config, false)?;

    let report = check_inputs(&processor, inputs);
    for failure in &report.failures {
        output.failure(failure);
    }

    if report.is_ok() {
        output.done(format_args!("All {} sample(s) OK", report.passed));
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} of {} samples failed",
            report.failures.len(),
            inputs.len()
        )))
    }
}
