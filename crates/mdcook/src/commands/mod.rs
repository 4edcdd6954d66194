//! CLI command implementations.

mod check;
mod cookbook;
mod pages;

pub(crate) use check::CheckArgs;
pub(crate) use cookbook::CookbookArgs;
pub(crate) use pages::PagesArgs;

use mdcook_config::Config;
use mdcook_renderer::{
    DirectiveProcessor, DirectiveProcessorConfig, LinkConfig, LinkRewriter, SnippetRegistry,
};

use crate::error::CliError;

/// Build the snippet catalog: files from `snippets.dir`, then inline entries.
fn load_snippets(config: &Config) -> Result<SnippetRegistry, CliError> {
    let mut registry = SnippetRegistry::new();
    if let Some(dir) = &config.snippets_resolved.dir {
        let loaded = registry.load_dir(dir)?;
        tracing::info!(count = loaded, dir = %dir.display(), "Loaded snippet files");
    }
    for (name, text) in &config.snippets_resolved.entries {
        registry.insert(name.as_str(), text.as_str());
    }
    tracing::debug!(count = registry.len(), "Snippet catalog ready");
    Ok(registry)
}

/// Build a directive processor from configuration.
///
/// Trailing whitespace trimming is enabled for cookbook assembly only.
fn build_processor(config: &Config, trim: bool) -> Result<DirectiveProcessor, CliError> {
    let processor_config = DirectiveProcessorConfig::new()
        .with_comment_marker(config.directives.comment_marker.as_str())
        .with_strict(config.directives.strict)
        .with_trim_trailing_whitespace(trim);
    Ok(DirectiveProcessor::with_config(
        processor_config,
        load_snippets(config)?,
    ))
}

fn build_link_rewriter(config: &Config) -> LinkRewriter {
    LinkRewriter::new(LinkConfig {
        api_base_url: config.links.api_base_url.clone(),
        api_version: config.links.api_version.clone(),
        docs_root_url: config.links.docs_root_url.clone(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    use mdcook_config::Config;
    use tempfile::TempDir;

    /// Write `mdcook.toml` plus sample files into a fresh directory and load it.
    pub(crate) fn project(toml: &str, files: &[(&str, &str)]) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let config_path = dir.path().join("mdcook.toml");
        fs::write(&config_path, toml).unwrap();
        let config = Config::load(Some(Path::new(&config_path)), None).unwrap();
        (dir, config)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::project;
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_inline_snippets_override_files() {
        let (_dir, config) = project(
            r#"
[snippets]
dir = "notes"

[snippets.entries]
shared = "inline wins"
"#,
            &[
                ("notes/shared.md", "from file\n"),
                ("notes/only_file.md", ":::note\nFile note.\n:::\n"),
            ],
        );

        let registry = load_snippets(&config).unwrap();
        assert_eq!(registry.get("shared"), Some("inline wins"));
        assert_eq!(registry.get("only_file"), Some(":::note\nFile note.\n:::"));
    }

    #[test]
    fn test_missing_snippet_dir_fails() {
        let (_dir, config) = project("[snippets]\ndir = \"missing\"\n", &[]);
        let err = load_snippets(&config).unwrap_err();
        assert!(matches!(err, CliError::Snippet(_)));
    }

    #[test]
    fn test_processor_uses_configured_comment_marker() {
        let (_dir, config) = project(
            "[directives]\ncomment_marker = \"#\"\nstrict = false\n",
            &[],
        );
        let processor = build_processor(&config, true).unwrap();

        assert!(!processor.is_strict());
        let doc = processor
            .render_str(Path::new("sample.py"), "# ## Title   \nimport os  # md-ignore\n")
            .unwrap();
        assert_eq!(doc.text(), "## Title");
    }

    #[test]
    fn test_link_rewriter_from_config() {
        let (_dir, config) = project(
            r#"
[links]
api_base_url = "https://api.example.com"
api_version = "v2"
docs_root_url = "https://docs.example.com"
"#,
            &[],
        );
        let links = build_link_rewriter(&config);
        assert_eq!(
            links.rewrite("`class:Account` https://docs.example.com/x"),
            "[Account](https://api.example.com/v2/classes/Account.html) /x"
        );
    }
}
