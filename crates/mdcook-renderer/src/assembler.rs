//! Document assembly: one combined cookbook, or one page per sample.

use std::fs;
use std::path::{Path, PathBuf};

use crate::directive::{DirectiveProcessor, RenderedDocument};
use crate::error::RenderError;
use crate::links::LinkRewriter;

/// Default extension of pages written by [`Pages`].
const DEFAULT_PAGE_EXTENSION: &str = "md";

/// Write `content` to `path`, creating parent directories as needed.
fn write_output(path: &Path, content: &str) -> Result<(), RenderError> {
    let write_err = |source: std::io::Error| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}

/// Concatenates all samples into one document and resolves links.
///
/// Each rendered sample is trimmed of leading and trailing blank lines;
/// samples are separated by exactly one blank line and the document ends
/// with exactly one newline. Samples that render to nothing are skipped.
pub struct Cookbook<'a> {
    processor: &'a DirectiveProcessor,
    links: &'a LinkRewriter,
}

impl<'a> Cookbook<'a> {
    #[must_use]
    pub fn new(processor: &'a DirectiveProcessor, links: &'a LinkRewriter) -> Self {
        Self { processor, links }
    }

    /// Render `inputs` in order and return the link-resolved cookbook text.
    pub fn assemble<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<String, RenderError> {
        let mut sections = Vec::with_capacity(inputs.len());
        for input in inputs {
            let rendered = self.processor.render_file(input.as_ref())?;
            if rendered.is_blank() {
                tracing::debug!(path = %rendered.source().display(), "Sample rendered empty, skipping");
                continue;
            }
            sections.push(rendered.trimmed_text());
        }

        let mut text = sections.join("\n\n");
        text.push('\n');
        Ok(self.links.rewrite(&text))
    }

    /// Assemble the cookbook and write it to `output`, replacing any existing file.
    pub fn build<P: AsRef<Path>>(&self, inputs: &[P], output: &Path) -> Result<(), RenderError> {
        let text = self.assemble(inputs)?;
        write_output(output, &text)?;
        tracing::info!(
            path = %output.display(),
            samples = inputs.len(),
            bytes = text.len(),
            "Wrote cookbook"
        );
        Ok(())
    }
}

/// Renders each sample into its own page.
///
/// Pages are named after the input's file stem with the page extension
/// (`basic.js` → `basic.md`). No links are resolved and no newline is
/// appended beyond the rendered lines.
pub struct Pages<'a> {
    processor: &'a DirectiveProcessor,
    output_dir: PathBuf,
    extension: String,
}

impl<'a> Pages<'a> {
    #[must_use]
    pub fn new(processor: &'a DirectiveProcessor, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            processor,
            output_dir: output_dir.into(),
            extension: DEFAULT_PAGE_EXTENSION.to_owned(),
        }
    }

    /// Set the page extension (without leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Output path for `input`.
    pub fn page_path(&self, input: &Path) -> Result<PathBuf, RenderError> {
        let stem = input
            .file_stem()
            .ok_or_else(|| RenderError::InvalidInput(input.to_path_buf()))?;
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.extension);
        Ok(self.output_dir.join(name))
    }

    /// Render one input into its page text.
    pub fn render(&self, input: &Path) -> Result<RenderedDocument, RenderError> {
        self.processor.render_file(input)
    }

    /// Render and write every input; returns the written page paths in order.
    pub fn build<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<PathBuf>, RenderError> {
        let mut written = Vec::with_capacity(inputs.len());
        for input in inputs {
            let input = input.as_ref();
            let page = self.page_path(input)?;
            let rendered = self.render(input)?;
            write_output(&page, &rendered.text())?;
            tracing::info!(source = %input.display(), path = %page.display(), "Wrote page");
            written.push(page);
        }
        Ok(written)
    }
}

/// Outcome of [`check_inputs`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of inputs that rendered without error.
    pub passed: usize,
    /// First error of every failing input, in input order.
    pub failures: Vec<RenderError>,
}

impl CheckReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every input in memory with strict checking, writing nothing.
///
/// Unlike the builders this does not stop at the first failing input.
pub fn check_inputs<P: AsRef<Path>>(processor: &DirectiveProcessor, inputs: &[P]) -> CheckReport {
    let processor = processor.clone().strict(true);
    let mut report = CheckReport::default();
    for input in inputs {
        match processor.render_file(input.as_ref()) {
            Ok(_) => report.passed += 1,
            Err(e) => report.failures.push(e),
        }
    }
    report
}
