//! Configuration management for mknav.
//!
//! Parses `mknav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories of an explicit
//! start directory.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.template`
//! - `site.site_url`
//! - `site.repo_url`
//! - `batch.repositories_dir`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory name inside a repository.
    pub docs_dir: Option<String>,
    /// Override fragment file name.
    pub fragment: Option<String>,
    /// Override template file path.
    pub template: Option<PathBuf>,
    /// Override the directory containing repositories.
    pub repositories_dir: Option<PathBuf>,
    /// Override maximum fragment nesting depth.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mknav.toml";

/// Placeholder substituted with the repository name in URL patterns.
pub const REPOSITORY_PLACEHOLDER: &str = "{repository}";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content tree configuration.
    pub docs: DocsConfig,
    /// Site output configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Batch configuration (paths are relative strings from TOML).
    batch: BatchConfigRaw,
    /// Repositories processed by `build-all`, in declaration order.
    pub repositories: Vec<RepositoryConfig>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved batch configuration (set after loading).
    #[serde(skip)]
    pub batch_resolved: BatchConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Content tree configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Content root directory name inside each repository.
    pub dir: String,
    /// Fragment file name looked up in every directory.
    pub fragment: String,
    /// Suffix that marks a fragment value as a content file.
    pub suffix: String,
    /// Maximum fragment nesting depth.
    pub max_depth: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: "docs".to_owned(),
            fragment: "mkdocs.yml".to_owned(),
            suffix: ".md".to_owned(),
            max_depth: 32,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    template: Option<String>,
    output: Option<String>,
    site_url: Option<String>,
    repo_url: Option<String>,
}

/// Resolved site output configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Template configuration merged with every generated nav.
    pub template: PathBuf,
    /// Output file name written into each repository.
    pub output: String,
    /// `site_url` pattern; `{repository}` is replaced with the repository name.
    pub site_url: Option<String>,
    /// `repo_url` pattern; `{repository}` is replaced with the repository name.
    pub repo_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("mkdocs-template.yml"),
            output: "mkdocs.yml".to_owned(),
            site_url: None,
            repo_url: None,
        }
    }
}

/// Raw batch configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BatchConfigRaw {
    repositories_dir: Option<String>,
}

/// Resolved batch configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct BatchConfig {
    /// Directory that contains the configured repositories.
    pub repositories_dir: PathBuf,
}

/// One repository entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Repository identifier; must match its directory name on disk.
    pub name: String,
    /// Display name; defaults to `name`.
    #[serde(default)]
    pub site_name: Option<String>,
    /// Directory relative to `batch.repositories_dir`; defaults to `name`.
    #[serde(default)]
    pub path: Option<String>,
}

impl RepositoryConfig {
    /// Display name used as `site_name`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.site_name.as_deref().unwrap_or(&self.name)
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
        /// Config field path (e.g., "`site.site_url`").
        field: String,
        /// Error message (e.g., "${`GH_USER`} not set").
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
    /// Otherwise, searches for `mknav.toml` in `start_dir` and its parents,
    /// falling back to defaults rooted at `start_dir`.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        start_dir: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(start_dir) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_base(start_dir)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs.dir.clone_from(docs_dir);
        }
        if let Some(fragment) = &settings.fragment {
            self.docs.fragment.clone_from(fragment);
        }
        if let Some(max_depth) = settings.max_depth {
            self.docs.max_depth = max_depth;
        }
        if let Some(template) = &settings.template {
            self.site_resolved.template.clone_from(template);
        }
        if let Some(repositories_dir) = &settings.repositories_dir {
            self.batch_resolved
                .repositories_dir
                .clone_from(repositories_dir);
        }
    }

    /// Directory of a configured repository.
    #[must_use]
    pub fn repository_dir(&self, repository: &RepositoryConfig) -> PathBuf {
        self.batch_resolved
            .repositories_dir
            .join(repository.path.as_deref().unwrap_or(&repository.name))
    }

    /// Find a configured repository by name.
    #[must_use]
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.name == name)
    }

    /// Search for config file in `start_dir` and its parents.
    fn discover_config(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
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

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfig::default(),
            site: SiteConfigRaw::default(),
            batch: BatchConfigRaw::default(),
            repositories: Vec::new(),
            site_resolved: SiteConfig {
                template: base.join("mkdocs-template.yml"),
                ..SiteConfig::default()
            },
            batch_resolved: BatchConfig {
                repositories_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_site()?;
        self.validate_repositories()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs.dir, "docs.dir")?;
        require_non_empty(&self.docs.fragment, "docs.fragment")?;
        if self.docs.fragment.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.fragment must be a file name, not a path".to_owned(),
            ));
        }
        if self.docs.suffix.len() < 2 || !self.docs.suffix.starts_with('.') {
            return Err(ConfigError::Validation(
                "docs.suffix must start with '.' followed by an extension".to_owned(),
            ));
        }
        if self.docs.max_depth == 0 {
            return Err(ConfigError::Validation(
                "docs.max_depth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.output, "site.output")?;
        if let Some(ref url) = self.site_resolved.site_url {
            require_http_url(url, "site.site_url")?;
        }
        if let Some(ref url) = self.site_resolved.repo_url {
            require_http_url(url, "site.repo_url")?;
        }
        Ok(())
    }

    fn validate_repositories(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for repository in &self.repositories {
            require_non_empty(&repository.name, "repositories.name")?;
            if !seen.insert(repository.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "repository '{}' is declared more than once",
                    repository.name
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref template) = self.site.template {
            self.site.template = Some(expand::expand_env(template, "site.template")?);
        }
        if let Some(ref url) = self.site.site_url {
            self.site.site_url = Some(expand::expand_env(url, "site.site_url")?);
        }
        if let Some(ref url) = self.site.repo_url {
            self.site.repo_url = Some(expand::expand_env(url, "site.repo_url")?);
        }
        if let Some(ref dir) = self.batch.repositories_dir {
            self.batch.repositories_dir =
                Some(expand::expand_env(dir, "batch.repositories_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            template: resolve(self.site.template.as_deref(), "mkdocs-template.yml"),
            output: self
                .site
                .output
                .clone()
                .unwrap_or_else(|| "mkdocs.yml".to_owned()),
            site_url: self.site.site_url.clone(),
            repo_url: self.site.repo_url.clone(),
        };

        self.batch_resolved = BatchConfig {
            repositories_dir: resolve(self.batch.repositories_dir.as_deref(), "."),
        };
    }
}
