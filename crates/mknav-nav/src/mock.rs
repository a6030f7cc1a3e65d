//! Mock content source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::source::{ContentSource, SourceError};

/// In-memory content source keyed by content-relative path.
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    files: HashMap<String, String>,
}

impl MockSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add an empty content file.
    #[must_use]
    pub fn with_page(self, path: impl Into<String>) -> Self {
        self.with_file(path, "")
    }
}

impl ContentSource for MockSource {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_owned()))
    }
}
