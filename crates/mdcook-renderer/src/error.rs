//! Rendering error types.

use std::io;
use std::path::PathBuf;

/// Failure while transforming a single line.
///
/// Carries no location; [`DirectiveProcessor`](crate::DirectiveProcessor)
/// attaches the source path and line number when converting to [`RenderError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Line carries the directive prefix but no recognized directive.
    #[error("unknown directive")]
    UnknownDirective,
    /// `md-insert:` names a snippet missing from the registry.
    #[error("unknown snippet '{0}'")]
    UnknownSnippet(String),
}

/// Error returned while rendering or assembling documents.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Unknown directive (strict mode only).
    #[error("{}:{line}: unknown directive in line: {text}", path.display())]
    UnknownDirective {
        /// Source file.
        path: PathBuf,
        /// Line number (1-indexed).
        line: usize,
        /// Offending line text.
        text: String,
    },
    /// Insert directive references a snippet that does not exist.
    #[error("{}:{line}: unknown snippet '{name}'", path.display())]
    UnknownSnippet {
        /// Source file.
        path: PathBuf,
        /// Line number (1-indexed).
        line: usize,
        /// Requested snippet name.
        name: String,
    },
    /// Input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Input path has no file stem to derive a page name from.
    #[error("cannot derive page name from input {}", .0.display())]
    InvalidInput(PathBuf),
}

impl RenderError {
    pub(crate) fn from_line(err: LineError, path: PathBuf, line: usize, text: &str) -> Self {
        match err {
            LineError::UnknownDirective => Self::UnknownDirective {
                path,
                line,
                text: text.to_owned(),
            },
            LineError::UnknownSnippet(name) => Self::UnknownSnippet { path, line, name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_directive_message_includes_location_and_text() {
        let err = RenderError::from_line(
            LineError::UnknownDirective,
            PathBuf::from("samples/account.js"),
            80,
            "// Fetch the nonce // md-comment",
        );
        assert_eq!(
            err.to_string(),
            "samples/account.js:80: unknown directive in line: // Fetch the nonce // md-comment"
        );
    }

    #[test]
    fn test_unknown_snippet_message_names_snippet() {
        let err = RenderError::from_line(
            LineError::UnknownSnippet("noteB".to_owned()),
            PathBuf::from("basic.js"),
            3,
            "// md-insert:noteB",
        );
        assert!(matches!(err, RenderError::UnknownSnippet { line: 3, .. }));
        assert!(err.to_string().contains("'noteB'"));
    }
}
