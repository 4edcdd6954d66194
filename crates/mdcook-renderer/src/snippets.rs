//! Named snippet catalog for `md-insert:` directives.
//!
//! A [`SnippetRegistry`] is built once at startup (from configuration and/or a
//! directory of markdown files) and is read-only while rendering.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of snippet files loaded by [`SnippetRegistry::load_dir`].
const SNIPPET_EXTENSION: &str = "md";

/// Snippet catalog loading error.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    /// Snippet directory or file could not be read.
    #[error("failed to read snippet {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read-only mapping from snippet name to markdown text.
///
/// # Example
///
/// ```
/// use mdcook_renderer::SnippetRegistry;
///
/// let registry = SnippetRegistry::new().with_snippet("noteA", "Line1\nLine2");
/// assert_eq!(registry.get("noteA"), Some("Line1\nLine2"));
/// assert_eq!(registry.get("noteB"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnippetRegistry {
    snippets: BTreeMap<String, String>,
}

impl SnippetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snippet, replacing any previous text under the same name.
    #[must_use]
    pub fn with_snippet(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Register a snippet, replacing any previous text under the same name.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.snippets.insert(name.into(), text.into());
    }

    /// Load every `*.md` file in `dir` as a snippet named after the file stem.
    ///
    /// A single trailing line break is dropped from each file so that the
    /// snippet splices in like an inline TOML string. Files are loaded in
    /// name order; entries already registered under the same name are
    /// replaced.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SnippetError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| SnippetError::Io { path, source }
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SNIPPET_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).map_err(io_err(&path))?;
            let content = content
                .strip_suffix("\r\n")
                .or_else(|| content.strip_suffix('\n'))
                .unwrap_or(&content);
            tracing::debug!(name, path = %path.display(), "Loaded snippet");
            self.insert(name, content);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Look up a snippet by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.snippets.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_get_registered_and_missing() {
        let registry = SnippetRegistry::new().with_snippet("noteA", "Line1\n\nLine3");

        assert_eq!(registry.get("noteA"), Some("Line1\n\nLine3"));
        assert_eq!(registry.get("missing"), None);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut registry = SnippetRegistry::new().with_snippet("a", "first");
        registry.insert("b", "other");
        registry.insert("a", "second");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a"), Some("second"));
    }

    #[test]
    fn test_load_dir_reads_markdown_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("important.md"), ":::important\nBe careful.\n:::\n").unwrap();
        fs::write(dir.path().join("crlf.md"), "windows\r\n").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not a snippet").unwrap();

        let mut registry = SnippetRegistry::new();
        let loaded = registry.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.get("important"), Some(":::important\nBe careful.\n:::"));
        assert_eq!(registry.get("crlf"), Some("windows"));
        assert_eq!(registry.get("ignored"), None);
    }

    #[test]
    fn test_load_dir_keeps_inner_blank_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("note.md"), "a\n\nb\n\n").unwrap();

        let mut registry = SnippetRegistry::new();
        registry.load_dir(dir.path()).unwrap();

        assert_eq!(registry.get("note"), Some("a\n\nb\n"));
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut registry = SnippetRegistry::new();

        let err = registry.load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SnippetError::Io { .. }));
    }
}
