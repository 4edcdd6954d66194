//! Cross-reference link resolution for the assembled cookbook.
//!
//! Placeholders are backtick-delimited spans:
//!
//! - `` `func:Class.method()` `` → `[Class.method()](<api>/<version>/classes/Class.html#method)`
//! - `` `class:Class` `` → `[Class](<api>/<version>/classes/Class.html)`
//!
//! After resolution every occurrence of the docs root URL is removed so that
//! absolute links into the docs site become root-relative.

use std::sync::LazyLock;

use regex::Regex;

use crate::replacements::Replacements;

static FUNC_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`func:(\w+)\.(\w+)\(\)`").expect("invalid func reference regex"));

static CLASS_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`class:(\w+)`").expect("invalid class reference regex"));

/// Where resolved links point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// API reference site, e.g. `https://multiversx.github.io/mx-sdk-js-core`.
    pub api_base_url: String,
    /// Version segment appended to the base URL, e.g. `v13`.
    pub api_version: String,
    /// Prefix removed from the final text. Empty disables stripping.
    pub docs_root_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://multiversx.github.io/mx-sdk-js-core".to_owned(),
            api_version: "v13".to_owned(),
            docs_root_url: "https://docs.multiversx.com".to_owned(),
        }
    }
}

/// Resolves link placeholders in assembled text.
///
/// # Example
///
/// ```
/// use mdcook_renderer::{LinkConfig, LinkRewriter};
///
/// let rewriter = LinkRewriter::new(LinkConfig {
///     api_base_url: "https://api.example.com".to_owned(),
///     api_version: "v2".to_owned(),
///     docs_root_url: String::new(),
/// });
///
/// assert_eq!(
///     rewriter.rewrite("Call `func:Foo.bar()`."),
///     "Call [Foo.bar()](https://api.example.com/v2/classes/Foo.html#bar)."
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkRewriter {
    config: LinkConfig,
}

impl LinkRewriter {
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Resolve all placeholders, then strip the docs root URL.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        let mut output = text.to_owned();

        let functions = self.function_references(&output);
        tracing::debug!(count = functions.len(), "Resolving function references");
        functions.apply(&mut output);

        let classes = self.class_references(&output);
        tracing::debug!(count = classes.len(), "Resolving class references");
        classes.apply(&mut output);

        self.strip_docs_root(&mut output);
        output
    }

    fn classes_url(&self) -> String {
        format!(
            "{}/{}/classes",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/')
        )
    }

    fn function_references(&self, text: &str) -> Replacements {
        let classes = self.classes_url();
        let mut replacements = Replacements::new();
        for caps in FUNC_REF.captures_iter(text) {
            let (class, method) = (&caps[1], &caps[2]);
            replacements.add(
                &caps[0],
                format!("[{class}.{method}()]({classes}/{class}.html#{method})"),
            );
        }
        replacements
    }

    fn class_references(&self, text: &str) -> Replacements {
        let classes = self.classes_url();
        let mut replacements = Replacements::new();
        for caps in CLASS_REF.captures_iter(text) {
            let class = &caps[1];
            replacements.add(&caps[0], format!("[{class}]({classes}/{class}.html)"));
        }
        replacements
    }

    fn strip_docs_root(&self, text: &mut String) {
        let root = self.config.docs_root_url.as_str();
        if !root.is_empty() && text.contains(root) {
            *text = text.replace(root, "");
        }
    }
}
