//! CLI error types.

use mdcook_config::ConfigError;
use mdcook_renderer::{RenderError, SnippetError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Snippet(#[from] SnippetError),

    #[error("{0}")]
    Validation(String),
}
