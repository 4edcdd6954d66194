//! Configuration management for mdcook.
//!
//! Parses `mdcook.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [cookbook]
//! inputs = ["basic.js", "transfers.js"]
//! output = "cookbook.md"
//!
//! [pages]
//! output_dir = "pages"
//! extension = "md"
//!
//! [directives]
//! comment_marker = "//"
//! strict = true
//!
//! [links]
//! api_base_url = "https://multiversx.github.io/mx-sdk-js-core"
//! api_version = "v13"
//! docs_root_url = "https://docs.multiversx.com"
//!
//! [snippets]
//! dir = "notes"
//!
//! [snippets.entries]
//! noteA = "Line1\nLine2"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `links.api_base_url`
//! - `links.api_version`
//! - `links.docs_root_url`

mod expand;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override cookbook output file.
    pub output: Option<PathBuf>,
    /// Override per-file output directory.
    pub output_dir: Option<PathBuf>,
    /// Override page extension.
    pub extension: Option<String>,
    /// Override strict directive checking.
    pub strict: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdcook.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cookbook configuration (paths are relative strings from TOML).
    cookbook: CookbookConfigRaw,
    /// Per-file pages configuration (paths are relative strings from TOML).
    pages: PagesConfigRaw,
    /// Snippet catalog configuration (paths are relative strings from TOML).
    snippets: SnippetsConfigRaw,
    /// Directive vocabulary configuration.
    pub directives: DirectivesConfig,
    /// Link resolution configuration.
    pub links: LinksConfig,

    /// Resolved cookbook configuration (set after loading).
    #[serde(skip)]
    pub cookbook_resolved: CookbookConfig,
    /// Resolved pages configuration (set after loading).
    #[serde(skip)]
    pub pages_resolved: PagesConfig,
    /// Resolved snippet configuration (set after loading).
    #[serde(skip)]
    pub snippets_resolved: SnippetsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw cookbook configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CookbookConfigRaw {
    inputs: Vec<String>,
    output: Option<String>,
}

/// Resolved cookbook configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CookbookConfig {
    /// Input samples in output order.
    pub inputs: Vec<PathBuf>,
    /// Combined cookbook document.
    pub output: PathBuf,
}

/// Raw pages configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PagesConfigRaw {
    output_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved per-file pages configuration.
#[derive(Debug)]
pub struct PagesConfig {
    /// Directory receiving one page per input.
    pub output_dir: PathBuf,
    /// Page extension without leading dot.
    pub extension: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("pages"),
            extension: "md".to_owned(),
        }
    }
}

/// Raw snippet configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SnippetsConfigRaw {
    dir: Option<String>,
    entries: BTreeMap<String, String>,
}

/// Resolved snippet catalog configuration.
#[derive(Debug, Default)]
pub struct SnippetsConfig {
    /// Directory of `<name>.md` snippet files.
    pub dir: Option<PathBuf>,
    /// Inline snippets keyed by name. Take precedence over files in `dir`.
    pub entries: BTreeMap<String, String>,
}

/// Directive vocabulary configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    /// Single-line comment marker of the sample language.
    pub comment_marker: String,
    /// Fail on unknown `md-` directives.
    pub strict: bool,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            comment_marker: "//".to_owned(),
            strict: true,
        }
    }
}

/// Link resolution configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// API reference site that `func:` and `class:` references point to.
    pub api_base_url: String,
    /// Version segment appended to the API base URL.
    pub api_version: String,
    /// Prefix stripped from the cookbook so docs links become root-relative.
    pub docs_root_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://multiversx.github.io/mx-sdk-js-core".to_owned(),
            api_version: "v13".to_owned(),
            docs_root_url: "https://docs.multiversx.com".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.api_base_url`").
        field: String,
        /// Error message (e.g., "${`API_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdcook.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.cookbook_resolved.output.clone_from(output);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.pages_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(extension) = &settings.extension {
            self.pages_resolved.extension.clone_from(extension);
        }
        if let Some(strict) = settings.strict {
            self.directives.strict = strict;
        }
    }

    /// Get the configured cookbook inputs.
    ///
    /// Use this instead of accessing `cookbook_resolved.inputs` directly when
    /// the command needs something to render.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no inputs are configured.
    pub fn require_inputs(&self) -> Result<&[PathBuf], ConfigError> {
        if self.cookbook_resolved.inputs.is_empty() {
            return Err(ConfigError::Validation(
                "cookbook.inputs must list at least one file".to_owned(),
            ));
        }
        Ok(&self.cookbook_resolved.inputs)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            cookbook: CookbookConfigRaw::default(),
            pages: PagesConfigRaw::default(),
            snippets: SnippetsConfigRaw::default(),
            directives: DirectivesConfig::default(),
            links: LinksConfig::default(),
            cookbook_resolved: CookbookConfig {
                inputs: Vec::new(),
                output: base.join("cookbook.md"),
            },
            pages_resolved: PagesConfig {
                output_dir: base.join("pages"),
                ..PagesConfig::default()
            },
            snippets_resolved: SnippetsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_directives()?;
        self.validate_pages()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_directives(&self) -> Result<(), ConfigError> {
        let marker = &self.directives.comment_marker;
        require_non_empty(marker, "directives.comment_marker")?;
        if marker.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "directives.comment_marker cannot contain whitespace".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        let extension = &self.pages_resolved.extension;
        require_non_empty(extension, "pages.extension")?;
        if extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "pages.extension must be a bare extension like \"md\", got \"{extension}\""
            )));
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.links.api_base_url, "links.api_base_url")?;
        require_http_url(&self.links.api_base_url, "links.api_base_url")?;
        require_non_empty(&self.links.api_version, "links.api_version")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let links = &mut self.links;
        links.api_base_url = expand::expand_env(&links.api_base_url, "links.api_base_url")?;
        links.api_version = expand::expand_env(&links.api_version, "links.api_version")?;
        links.docs_root_url = expand::expand_env(&links.docs_root_url, "links.docs_root_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.cookbook_resolved = CookbookConfig {
            inputs: self
                .cookbook
                .inputs
                .iter()
                .map(|input| config_dir.join(input))
                .collect(),
            output: resolve(self.cookbook.output.as_deref(), "cookbook.md"),
        };

        self.pages_resolved = PagesConfig {
            output_dir: resolve(self.pages.output_dir.as_deref(), "pages"),
            extension: self
                .pages
                .extension
                .clone()
                .unwrap_or_else(|| PagesConfig::default().extension),
        };

        self.snippets_resolved = SnippetsConfig {
            dir: self.snippets.dir.as_deref().map(|dir| config_dir.join(dir)),
            entries: std::mem::take(&mut self.snippets.entries),
        };
    }
}
