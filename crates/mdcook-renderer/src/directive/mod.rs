//! Line directives embedded in code samples.
//!
//! Directives are trailing or whole-line comments using the sample
//! language's single-line comment marker (`//` by default):
//!
//! | Directive | Effect |
//! |---|---|
//! | `// md-ignore` | drop the line |
//! | `// md-unindent` | strip leading whitespace before anything else |
//! | `// md-as-comment` | keep the comment marker instead of stripping it |
//! | `// md-insert:name` | replace the line with snippet `name` |
//!
//! Any other `// md-...` token is an unknown directive, rejected in strict mode.
//!
//! # Processing model
//!
//! 1. [`DirectiveSyntax::recognize`] classifies the raw line into
//!    [`DirectiveFlags`]. Classification is per-line and stateless.
//! 2. [`transform_line`] applies the flags in a fixed order (ignore, unindent,
//!    comment stripping, marker removal, insertion, trailing trim).
//! 3. [`DirectiveProcessor`] runs the transform over every line of a file and
//!    collects a [`RenderedDocument`].

mod processor;
mod syntax;
mod transform;

pub use processor::{DirectiveProcessor, DirectiveProcessorConfig, RenderedDocument};
pub use syntax::{DEFAULT_COMMENT_MARKER, DirectiveFlags, DirectiveSyntax};
pub use transform::{TransformContext, transform_line};
