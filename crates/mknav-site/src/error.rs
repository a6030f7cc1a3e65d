//! Site build errors.

use std::path::PathBuf;

use mknav_nav::NavError;

/// Error returned by repository builds and the site writer.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Navigation expansion failed.
    #[error(transparent)]
    Nav(#[from] NavError),
    /// Configured repository name differs from its directory name on disk.
    #[error(
        "Repository name '{name}' does not match its directory '{actual}' ({})",
        dir.display()
    )]
    RepositoryNameMismatch {
        /// Configured name.
        name: String,
        /// Directory name found on disk.
        actual: String,
        /// Resolved repository directory.
        dir: PathBuf,
    },
    /// Repository directory does not exist.
    #[error("Repository '{name}' not found at {}", dir.display())]
    RepositoryNotFound {
        /// Configured name.
        name: String,
        /// Directory that was tried.
        dir: PathBuf,
    },
    /// Repository has no content root.
    #[error("Content root not found: {}", .0.display())]
    ContentRootMissing(PathBuf),
    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        /// Template path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Template is not a YAML mapping.
    #[error("Invalid template {}: {message}", path.display())]
    TemplateParse {
        /// Template path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Site configuration could not be serialized.
    #[error("Failed to serialize site configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
    /// Output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
