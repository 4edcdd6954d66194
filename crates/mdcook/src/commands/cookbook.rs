//! `mdcook cookbook` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdcook_config::{CliSettings, Config};
use mdcook_renderer::Cookbook;

use super::{build_link_rewriter, build_processor};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cookbook command.
#[derive(Args)]
pub(crate) struct CookbookArgs {
    /// Path to configuration file (default: auto-discover mdcook.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cookbook output file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Warn about unknown directives instead of failing.
    #[arg(long)]
    lenient: bool,
}

impl CookbookArgs {
    /// Execute the cookbook command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any sample fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output: self.output,
            strict: self.lenient.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        run(&config, &output)
    }
}

fn run(config: &Config, output: &Output) -> Result<(), CliError> {
    let inputs = config.require_inputs()?;
    let destination = &config.cookbook_resolved.output;

    output.rendering(inputs.len(), destination);
    if !config.directives.strict {
        output.lenient();
    }

    let processor = build_processor(config, true)?;
    let links = build_link_rewriter(config);
    Cookbook::new(&processor, &links).build(inputs, destination)?;

    output.written(destination);
    output.done("Cookbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::project;
    use pretty_assertions::assert_eq;
    use std::fs;

    const CONFIG: &str = r#"
[cookbook]
inputs = ["basic.js", "contracts.js"]
output = "docs/cookbook.md"

[snippets.entries]
noteA = "Line1\nLine2"
"#;

    #[test]
    fn test_run_writes_cookbook() {
        let (dir, config) = project(
            CONFIG,
            &[
                (
                    "basic.js",
                    "import { x } from \"./samples.js\"; // md-ignore\n\n// ## Basic\n// md-insert:noteA\n",
                ),
                (
                    "contracts.js",
                    "// ## Contracts\n// Use a `class:SmartContractTransactionsFactory`.\n",
                ),
            ],
        );

        run(&config, &Output::new()).unwrap();

        let text = fs::read_to_string(dir.path().join("docs/cookbook.md")).unwrap();
        assert_eq!(
            text,
            "## Basic\nLine1\nLine2\n\n## Contracts\nUse a [SmartContractTransactionsFactory](https://multiversx.github.io/mx-sdk-js-core/v13/classes/SmartContractTransactionsFactory.html).\n"
        );
    }

    #[test]
    fn test_run_fails_on_unknown_snippet() {
        let (dir, config) = project(
            CONFIG,
            &[
                ("basic.js", "// md-insert:noteB\n"),
                ("contracts.js", "// ok\n"),
            ],
        );

        let err = run(&config, &Output::new()).unwrap_err();
        assert!(err.to_string().contains("noteB"));
        assert!(!dir.path().join("docs/cookbook.md").exists());
    }

    #[test]
    fn test_run_requires_inputs() {
        let (_dir, config) = project("", &[]);
        let err = run(&config, &Output::new()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
