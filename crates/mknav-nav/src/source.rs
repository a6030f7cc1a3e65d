//! Content source abstraction.
//!
//! The expander never touches the filesystem directly. It goes through
//! [`ContentSource`], which addresses files by forward-slash paths relative
//! to the content root (`""` is the root itself, `"guide/intro.md"` a file).

use std::path::{Path, PathBuf};

/// Error returned when a source cannot read a file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(String),
    /// File exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Content-relative path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Read access to a content tree.
pub trait ContentSource: Send + Sync {
    /// True if `path` names an existing regular file.
    fn exists(&self, path: &str) -> bool;

    /// Read `path` as UTF-8 text.
    fn read(&self, path: &str) -> Result<String, SourceError>;
}

/// Filesystem content source rooted at an explicit directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a content-relative path.
    #[must_use]
    pub fn full_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ContentSource for FsSource {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        std::fs::read_to_string(self.full_path(path)).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_owned())
            } else {
                SourceError::Io {
                    path: path.to_owned(),
                    source,
                }
            }
        })
    }
}
