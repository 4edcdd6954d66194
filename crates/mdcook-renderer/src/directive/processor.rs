//! File renderer: applies line directives to a whole code sample.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::snippets::SnippetRegistry;

use super::syntax::DEFAULT_COMMENT_MARKER;
use super::{DirectiveSyntax, TransformContext, transform_line};

/// Configuration for the directive processor.
#[derive(Debug, Clone)]
pub struct DirectiveProcessorConfig {
    /// Single-line comment marker of the sample language.
    ///
    /// Default: `//`
    pub comment_marker: String,
    /// Fail on lines carrying an unknown `md-` directive.
    ///
    /// Default: `true`
    pub strict: bool,
    /// Trim trailing whitespace from every rendered entry.
    ///
    /// Default: `false`
    pub trim_trailing_whitespace: bool,
}

impl Default for DirectiveProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_owned(),
            strict: true,
            trim_trailing_whitespace: false,
        }
    }

    /// Set the comment marker.
    #[must_use]
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    /// Enable or disable strict directive checking.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable trailing whitespace trimming.
    #[must_use]
    pub fn with_trim_trailing_whitespace(mut self, trim: bool) -> Self {
        self.trim_trailing_whitespace = trim;
        self
    }
}

/// Rendered output of one input file.
///
/// Entries keep input order; ignored lines are absent. An inserted snippet is
/// one entry that may contain line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    source: PathBuf,
    entries: Vec<String>,
}

impl RenderedDocument {
    /// Path of the input this document was rendered from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Rendered entries in input order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries joined with line breaks, without a trailing newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.entries.join("\n")
    }

    /// [`text`](Self::text) with leading and trailing blank lines removed.
    ///
    /// Indentation of the first non-blank line is preserved.
    #[must_use]
    pub fn trimmed_text(&self) -> String {
        let text = self.text();
        let Some(first) = text.find(|c: char| !c.is_whitespace()) else {
            return String::new();
        };
        let start = text[..first].rfind('\n').map_or(0, |nl| nl + 1);
        text[start..].trim_end().to_owned()
    }

    /// Whether the document rendered to nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|e| e.trim().is_empty())
    }
}

/// Applies line directives to code samples.
///
/// The processor is immutable once built and may be reused for any number of
/// files; nothing carries over from one file to the next.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use mdcook_renderer::{DirectiveProcessor, DirectiveProcessorConfig, SnippetRegistry};
///
/// let config = DirectiveProcessorConfig::new().with_trim_trailing_whitespace(true);
/// let processor = DirectiveProcessor::with_config(config, SnippetRegistry::new());
///
/// let rendered = processor
///     .render_str(Path::new("basic.js"), "// md-ignore\nkept   \n")
///     .unwrap();
/// assert_eq!(rendered.entries(), ["kept"]);
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveProcessor {
    syntax: DirectiveSyntax,
    snippets: SnippetRegistry,
    strict: bool,
    trim_trailing_whitespace: bool,
}

impl DirectiveProcessor {
    /// Create a processor with default configuration.
    #[must_use]
    pub fn new(snippets: SnippetRegistry) -> Self {
        Self::with_config(DirectiveProcessorConfig::default(), snippets)
    }

    /// Create a processor with custom configuration.
    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig, snippets: SnippetRegistry) -> Self {
        Self {
            syntax: DirectiveSyntax::new(&config.comment_marker),
            snippets,
            strict: config.strict,
            trim_trailing_whitespace: config.trim_trailing_whitespace,
        }
    }

    /// Copy of this processor with a different strictness.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn context(&self) -> TransformContext<'_> {
        TransformContext {
            syntax: &self.syntax,
            snippets: &self.snippets,
            strict: self.strict,
            trim_trailing_whitespace: self.trim_trailing_whitespace,
        }
    }

    /// Render `text`, reporting errors against `source`.
    pub fn render_str(&self, source: &Path, text: &str) -> Result<RenderedDocument, RenderError> {
        let ctx = self.context();
        let mut entries = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_num = idx + 1;

            if !self.strict && self.syntax.recognize(line).unknown {
                tracing::warn!(
                    path = %source.display(),
                    line = line_num,
                    text = line,
                    "Unknown directive, processing line as-is"
                );
            }

            match transform_line(line, &ctx) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => {
                    return Err(RenderError::from_line(e, source.to_path_buf(), line_num, line));
                }
            }
        }

        tracing::debug!(
            path = %source.display(),
            lines = text.lines().count(),
            entries = entries.len(),
            "Rendered sample"
        );

        Ok(RenderedDocument {
            source: source.to_path_buf(),
            entries,
        })
    }

    /// Read and render the file at `path`.
    pub fn render_file(&self, path: &Path) -> Result<RenderedDocument, RenderError> {
        let text = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.render_str(path, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn processor() -> DirectiveProcessor {
        let snippets = SnippetRegistry::new().with_snippet("noteA", "Line1\nLine2");
        DirectiveProcessor::new(snippets)
    }

    fn render(input: &str) -> RenderedDocument {
        processor().render_str(Path::new("sample.js"), input).unwrap()
    }

    #[test]
    fn test_ignore_then_text() {
        let doc = render("// md-ignore\nkept");
        assert_eq!(doc.entries(), ["kept"]);
        assert_eq!(doc.text(), "kept");
    }

    #[test]
    fn test_indented_unindent_comment() {
        let doc = render("  //   md-unindent some comment");
        assert_eq!(doc.text(), "some comment");
    }

    #[test]
    fn test_insert_becomes_two_lines() {
        let doc = render("// md-insert:noteA");
        assert_eq!(doc.entries(), ["Line1\nLine2"]);
        assert_eq!(doc.text().lines().collect::<Vec<_>>(), vec!["Line1", "Line2"]);
    }

    #[test]
    fn test_unknown_snippet_reports_location() {
        let err = processor()
            .render_str(Path::new("transfers.js"), "// intro\n\n// md-insert:missing\n")
            .unwrap_err();
        match err {
            RenderError::UnknownSnippet { path, line, name } => {
                assert_eq!(path, PathBuf::from("transfers.js"));
                assert_eq!(line, 3);
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_directive_strict_reports_line_text() {
        let err = processor()
            .render_str(Path::new("account.js"), "x();\n// Fetch nonce // md-comment\n")
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownDirective { line: 2, .. }));
        assert!(err.to_string().contains("// Fetch nonce // md-comment"));
    }

    #[test]
    fn test_unknown_directive_lenient_passes_through() {
        let doc = processor()
            .strict(false)
            .render_str(Path::new("account.js"), "// Fetch nonce // md-comment")
            .unwrap();
        assert_eq!(doc.text(), "Fetch nonce // md-comment");
    }

    #[test]
    fn test_full_sample() {
        let input = r#"import { addressOfAlice } from "./samples.js"; // md-ignore

// ## Broadcasting

// md-insert:noteA

// ```
try { // md-ignore
    const txHash = await provider.sendTransaction(tx); // md-unindent
    console.log("TX hash:", txHash); // md-unindent
} catch { // md-ignore
} // md-ignore
// ```
"#;
        let config = DirectiveProcessorConfig::new().with_trim_trailing_whitespace(true);
        let doc = DirectiveProcessor::with_config(config, SnippetRegistry::new())
            .render_str(Path::new("broadcasting.js"), input)
            .unwrap();

        let expected = r#"
## Broadcasting

Line1
Line2

```
const txHash = await provider.sendTransaction(tx);
console.log("TX hash:", txHash);
```"#;
        assert_eq!(doc.text(), expected);
        assert_eq!(doc.trimmed_text(), expected.trim_start());
    }

    #[test]
    fn test_block_wrapper_with_glued_ignore_markers() {
        let doc = render("{// md-ignore
kept
}// md-ignore");
        assert_eq!(doc.entries(), ["kept"]);

        let doc = render("x();// md-as-comment");
        assert_eq!(doc.entries(), ["x();"]);

        let err = processor()
            .render_str(Path::new("wallets.js"), "x();// md-bogus")
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownDirective { line: 1, .. }));
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let input = "// # Title\n// md-insert:noteA\ncode(); // md-unindent\n";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn test_crlf_input() {
        let doc = render("// a\r\ncode();\r\n");
        assert_eq!(doc.entries(), ["a", "code();"]);
    }

    #[test]
    fn test_trimmed_text_keeps_first_line_indent() {
        let doc = render("\n   \n    indented\n\n");
        assert_eq!(doc.trimmed_text(), "    indented");
    }

    #[test]
    fn test_blank_document() {
        let doc = render("x(); // md-ignore\n\n");
        assert!(doc.is_blank());
        assert_eq!(doc.trimmed_text(), "");
    }

    #[test]
    fn test_render_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("basic.js");
        fs::write(&path, "// # Basic\nconst x = 1;\n").unwrap();

        let doc = processor().render_file(&path).unwrap();
        assert_eq!(doc.source(), path.as_path());
        assert_eq!(doc.text(), "# Basic\nconst x = 1;");
    }

    #[test]
    fn test_render_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = processor().render_file(&dir.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, RenderError::Read { .. }));
    }

    #[test]
    fn test_custom_comment_marker() {
        let config = DirectiveProcessorConfig::new().with_comment_marker("#");
        let processor = DirectiveProcessor::with_config(config, SnippetRegistry::new());

        let doc = processor
            .render_str(Path::new("sample.py"), "import os  # md-ignore\n# ## Title\nprint(1)")
            .unwrap();
        assert_eq!(doc.text(), "## Title\nprint(1)");
    }
}
