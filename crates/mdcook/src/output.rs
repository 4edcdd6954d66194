//! Styled progress and failure reporting on stderr.

use std::fmt::Display;
use std::path::Path;

use console::{Term, style};
use mdcook_renderer::RenderError;

use crate::error::CliError;

/// Reports command progress to the terminal.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, text: impl Display) {
        let _ = self.term.write_line(&text.to_string());
    }

    /// Announce how many samples a command is about to render.
    pub(crate) fn rendering(&self, samples: usize, target: &Path) {
        self.line(format_args!(
            "Rendering {samples} sample(s) into {}",
            style(target.display()).cyan().bold()
        ));
    }

    /// Notice that unknown directives are passed through.
    pub(crate) fn lenient(&self) {
        self.line(style("Strict directive checking disabled").yellow());
    }

    /// One written output file.
    pub(crate) fn written(&self, path: &Path) {
        self.line(format_args!("  {}", style(path.display()).cyan()));
    }

    /// One failing sample in a check run.
    pub(crate) fn failure(&self, error: &RenderError) {
        self.line(format_args!("{} {error}", style("✗").red().bold()));
    }

    pub(crate) fn done(&self, summary: impl Display) {
        self.line(style(summary).green());
    }

    /// Final error of a failed command.
    pub(crate) fn fatal(&self, error: &CliError) {
        self.line(style(format!("Error: {error}")).red());
    }
}
