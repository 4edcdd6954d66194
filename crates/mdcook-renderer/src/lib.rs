//! Directive-driven rendering of annotated code samples into markdown.
//!
//! Code samples carry `// md-*` directive comments that tell the renderer
//! which lines to drop, unindent, keep as comments or replace with a named
//! note. Rendered samples are either concatenated into one cookbook document
//! (with cross-reference links resolved) or written out one page per sample.
//!
//! # Architecture
//!
//! - [`DirectiveSyntax`] classifies a single line into [`DirectiveFlags`].
//! - [`transform_line`] applies the flags to produce zero or one output entry.
//! - [`SnippetRegistry`] holds the named notes consulted by `md-insert:`.
//! - [`DirectiveProcessor`] drives the transform over every line of a file.
//! - [`Cookbook`] and [`Pages`] assemble rendered files into output documents.
//! - [`LinkRewriter`] resolves `` `func:Class.method()` `` and `` `class:Class` ``
//!   placeholders in the assembled cookbook.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use mdcook_renderer::{DirectiveProcessor, SnippetRegistry};
//!
//! let snippets = SnippetRegistry::new().with_snippet("hint", ":::tip\nRead the docs.\n:::");
//! let processor = DirectiveProcessor::new(snippets);
//!
//! let source = "import x from \"x\"; // md-ignore\n// ## Title\n// md-insert:hint\n";
//! let rendered = processor.render_str(Path::new("sample.js"), source).unwrap();
//! assert_eq!(rendered.text(), "## Title\n:::tip\nRead the docs.\n:::");
//! ```

mod assembler;
pub mod directive;
mod error;
mod links;
mod replacements;
mod snippets;

pub use assembler::{CheckReport, Cookbook, Pages, check_inputs};
pub use directive::{
    DirectiveFlags, DirectiveProcessor, DirectiveProcessorConfig, DirectiveSyntax,
    RenderedDocument, TransformContext, transform_line,
};
pub use error::{LineError, RenderError};
pub use links::{LinkConfig, LinkRewriter};
pub use replacements::Replacements;
pub use snippets::{SnippetError, SnippetRegistry};
