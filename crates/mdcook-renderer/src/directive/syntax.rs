//! Directive recognition.
//!
//! Builds the directive patterns for a given comment marker and classifies
//! single lines against them.

use regex::Regex;

/// Comment marker used when none is configured.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

const IGNORE: &str = "md-ignore";
const UNINDENT: &str = "md-unindent";
const AS_COMMENT: &str = "md-as-comment";
const INSERT: &str = "md-insert:";
const PREFIX: &str = "md-";

/// Directives recognized on a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DirectiveFlags {
    /// `md-ignore`: drop the line.
    pub ignore: bool,
    /// `md-unindent`: strip leading whitespace.
    pub unindent: bool,
    /// Visible text of the line starts with the comment marker.
    pub comment: bool,
    /// `md-as-comment`: keep the comment marker.
    pub keep_as_comment: bool,
    /// `md-insert:`: replace the line with a snippet.
    pub insert: bool,
    /// Directive prefix present without any recognized directive.
    pub unknown: bool,
}

impl DirectiveFlags {
    /// Whether the default comment lead-in stripping applies to this line.
    #[must_use]
    pub fn strips_comment(&self) -> bool {
        self.comment && !self.keep_as_comment
    }

    /// Whether any recognized directive is present.
    #[must_use]
    pub fn has_directive(&self) -> bool {
        self.ignore || self.unindent || self.keep_as_comment || self.insert
    }
}

/// Compiled directive vocabulary for one comment marker.
///
/// A directive is the comment marker, an optional run of spaces or tabs and
/// the directive token, found anywhere in the line. `// md-ignore`,
/// `}// md-ignore` and `x(); //   md-ignore` all match. A marker directly
/// after `:` is a URL scheme, so `https://md-ignore.example` does not.
///
/// # Example
///
/// ```
/// use mdcook_renderer::DirectiveSyntax;
///
/// let syntax = DirectiveSyntax::default();
/// let flags = syntax.recognize("    let x = 1; // md-unindent");
/// assert!(flags.unindent);
/// assert!(!flags.comment);
///
/// let python = DirectiveSyntax::new("#");
/// assert!(python.recognize("import os  # md-ignore").ignore);
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveSyntax {
    comment_marker: String,
    prefix: Regex,
    ignore: Regex,
    unindent: Regex,
    as_comment: Regex,
    insert: Regex,
    unindent_marker: Regex,
    as_comment_marker: Regex,
}

impl Default for DirectiveSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_MARKER)
    }
}

impl DirectiveSyntax {
    /// Build the directive patterns for `comment_marker`.
    ///
    /// # Panics
    ///
    /// Panics if a directive pattern fails to compile. The marker is escaped
    /// before interpolation, so this should never happen.
    #[must_use]
    pub fn new(comment_marker: &str) -> Self {
        let marker = regex::escape(comment_marker);
        let directive = |token: &str| {
            let token = regex::escape(token);
            Regex::new(&format!(r"(?:^|[^:]){marker}[ \t]*{token}"))
                .expect("invalid directive regex")
        };
        let removable = |token: &str| {
            let token = regex::escape(token);
            Regex::new(&format!(r"(?:{marker}[ \t]*)?{token}[ \t]*"))
                .expect("invalid directive marker regex")
        };

        Self {
            comment_marker: comment_marker.to_owned(),
            prefix: directive(PREFIX),
            ignore: directive(IGNORE),
            unindent: directive(UNINDENT),
            as_comment: directive(AS_COMMENT),
            insert: directive(INSERT),
            unindent_marker: removable(UNINDENT),
            as_comment_marker: removable(AS_COMMENT),
        }
    }

    /// Classify a raw line.
    #[must_use]
    pub fn recognize(&self, line: &str) -> DirectiveFlags {
        let mut flags = DirectiveFlags {
            ignore: self.ignore.is_match(line),
            unindent: self.unindent.is_match(line),
            comment: line.trim_start().starts_with(self.comment_marker.as_str()),
            keep_as_comment: self.as_comment.is_match(line),
            insert: self.insert.is_match(line),
            unknown: false,
        };
        flags.unknown = !flags.has_directive() && self.prefix.is_match(line);
        flags
    }

    /// Strip the comment marker and the whitespace run after it from the
    /// start of `line`. Returns `None` if the line does not start with the
    /// marker at column 0.
    pub(crate) fn strip_comment_lead_in<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.comment_marker.as_str())
            .map(str::trim_start)
    }

    /// Remove every `md-unindent` marker, with its comment lead-in if present.
    pub(crate) fn remove_unindent_marker(&self, line: &str) -> String {
        self.unindent_marker.replace_all(line, "").into_owned()
    }

    /// Remove every `md-as-comment` marker, with its comment lead-in if present.
    pub(crate) fn remove_as_comment_marker(&self, line: &str) -> String {
        self.as_comment_marker.replace_all(line, "").into_owned()
    }

    /// Snippet name following `md-insert:`, trimmed.
    pub(crate) fn snippet_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.find(INSERT)
            .map(|idx| line[idx + INSERT.len()..].trim())
    }
}
