//! Per-line directive application.

use crate::error::LineError;
use crate::snippets::SnippetRegistry;

use super::DirectiveSyntax;

/// Everything [`transform_line`] needs besides the line itself.
///
/// Created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// render; cheap to construct by hand in tests.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Compiled directive vocabulary.
    pub syntax: &'a DirectiveSyntax,
    /// Snippets available to `md-insert:`.
    pub snippets: &'a SnippetRegistry,
    /// Reject lines with an unknown `md-` directive.
    pub strict: bool,
    /// Trim trailing whitespace from every produced entry.
    pub trim_trailing_whitespace: bool,
}

/// Apply the directives found on `line`.
///
/// Returns `Ok(None)` for ignored lines. An inserted snippet is returned as
/// a single entry even if it spans several lines.
///
/// Steps run in this order:
///
/// 1. `md-ignore` drops the line.
/// 2. `md-unindent` strips all leading whitespace.
/// 3. Unless `md-as-comment` is present, a comment marker at column 0 is
///    removed together with the whitespace run after it.
/// 4. `md-unindent` / `md-as-comment` markers are removed wherever they appear.
/// 5. `md-insert:name` replaces the whole line with snippet `name`.
/// 6. Trailing whitespace is trimmed if enabled.
///
/// Step 3 only looks at column 0, so an indented comment keeps its marker
/// unless the line is also unindented.
///
/// # Example
///
/// ```
/// use mdcook_renderer::{DirectiveSyntax, SnippetRegistry, TransformContext, transform_line};
///
/// let syntax = DirectiveSyntax::default();
/// let snippets = SnippetRegistry::new();
/// let ctx = TransformContext {
///     syntax: &syntax,
///     snippets: &snippets,
///     strict: true,
///     trim_trailing_whitespace: true,
/// };
///
/// let line = transform_line("    let hash = await send(tx); // md-unindent", &ctx).unwrap();
/// assert_eq!(line.as_deref(), Some("let hash = await send(tx);"));
/// ```
pub fn transform_line(line: &str, ctx: &TransformContext<'_>) -> Result<Option<String>, LineError> {
    let syntax = ctx.syntax;
    let flags = syntax.recognize(line);

    if flags.unknown && ctx.strict {
        return Err(LineError::UnknownDirective);
    }

    if flags.ignore {
        return Ok(None);
    }

    let mut text = if flags.unindent {
        line.trim_start()
    } else {
        line
    }
    .to_owned();

    if flags.strips_comment()
        && let Some(rest) = syntax.strip_comment_lead_in(&text)
    {
        text = rest.to_owned();
    }

    text = syntax.remove_unindent_marker(&text);
    text = syntax.remove_as_comment_marker(&text);

    if flags.insert {
        let name = syntax.snippet_name(&text).unwrap_or_default();
        text = ctx
            .snippets
            .get(name)
            .ok_or_else(|| LineError::UnknownSnippet(name.to_owned()))?
            .to_owned();
    }

    if ctx.trim_trailing_whitespace {
        text.truncate(text.trim_end().len());
    }

    Ok(Some(text))
}
