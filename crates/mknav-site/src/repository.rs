//! Single repository builds.
//!
//! A repository build locates the repository on disk, expands the fragments
//! under its content root and hands the tree to the [`SiteWriter`]. Nothing
//! is written unless the whole expansion succeeds.

use std::path::{Path, PathBuf};

use mknav_config::Config;
use mknav_nav::{ExpandOptions, FsSource, NavTree, build_nav};

use crate::error::SiteError;
use crate::writer::{SiteIdentity, SiteWriter};

/// A repository located on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository identifier (its directory name).
    pub name: String,
    /// Display name.
    pub site_name: String,
    /// Canonical repository directory.
    pub dir: PathBuf,
}

impl Repository {
    /// Site identity used by the writer.
    #[must_use]
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity {
            repository: self.name.clone(),
            site_name: self.site_name.clone(),
        }
    }
}

/// Builds navigation for one repository at a time.
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    docs_dir: String,
    options: ExpandOptions,
    writer: SiteWriter,
}

impl RepositoryBuilder {
    /// Create a builder.
    ///
    /// `docs_dir` is the content root's name inside each repository.
    #[must_use]
    pub fn new(docs_dir: impl Into<String>, options: ExpandOptions, writer: SiteWriter) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            options,
            writer,
        }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let options = ExpandOptions {
            fragment_name: config.docs.fragment.clone(),
            suffix: config.docs.suffix.clone(),
            max_depth: config.docs.max_depth,
        };
        Self::new(
            config.docs.dir.clone(),
            options,
            SiteWriter::from_config(&config.site_resolved),
        )
    }

    /// The site writer.
    #[must_use]
    pub fn writer(&self) -> &SiteWriter {
        &self.writer
    }

    /// Locate a repository directory and check its name.
    ///
    /// With `name`, the directory's resolved name must match it; without,
    /// the directory name becomes the repository name. `site_name` defaults
    /// to the repository name.
    pub fn locate(
        &self,
        dir: &Path,
        name: Option<&str>,
        site_name: Option<&str>,
    ) -> Result<Repository, SiteError> {
        let not_found = || SiteError::RepositoryNotFound {
            name: name.map_or_else(
                || {
                    dir.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                },
                ToOwned::to_owned,
            ),
            dir: dir.to_path_buf(),
        };

        let canonical = dir.canonicalize().map_err(|_| not_found())?;
        if !canonical.is_dir() {
            return Err(not_found());
        }
        let actual = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(not_found)?;

        let name = match name {
            Some(name) if name != actual => {
                return Err(SiteError::RepositoryNameMismatch {
                    name: name.to_owned(),
                    actual,
                    dir: canonical,
                });
            }
            Some(name) => name.to_owned(),
            None => actual,
        };

        Ok(Repository {
            site_name: site_name.map_or_else(|| name.clone(), ToOwned::to_owned),
            name,
            dir: canonical,
        })
    }

    /// Content root of a repository.
    #[must_use]
    pub fn content_root(&self, repository: &Repository) -> PathBuf {
        repository.dir.join(&self.docs_dir)
    }

    /// Expand the repository's fragments into a navigation tree.
    pub fn expand(&self, repository: &Repository) -> Result<NavTree, SiteError> {
        let root = self.content_root(repository);
        if !root.is_dir() {
            return Err(SiteError::ContentRootMissing(root));
        }

        tracing::info!(repository = %repository.name, root = %root.display(), "Building navigation");
        let tree = build_nav(&FsSource::new(root), &self.options)?;
        tracing::debug!(repository = %repository.name, leaves = tree.leaves().len(), "Navigation built");
        Ok(tree)
    }

    /// Render the merged site configuration without writing it.
    pub fn render(&self, repository: &Repository) -> Result<String, SiteError> {
        let tree = self.expand(repository)?;
        self.writer.render(&tree, &repository.identity())
    }

    /// Expand and write the site configuration. Returns the output path.
    pub fn build(&self, repository: &Repository) -> Result<PathBuf, SiteError> {
        let tree = self.expand(repository)?;
        self.writer
            .write(&tree, &repository.identity(), &repository.dir)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mknav_nav::{NavError, NavPath};
    use pretty_assertions::assert_eq;
    use std::fs;

    /// Create `<parent>/<name>` with a small valid content tree.
    pub(crate) fn create_repository(parent: &Path, name: &str) -> PathBuf {
        let repo = parent.join(name);
        let docs = repo.join("docs");
        fs::create_dir_all(docs.join("guide")).unwrap();
        fs::write(
            docs.join("mkdocs.yml"),
            "nav:\n  - Home: index.md\n  - Guide: guide\n",
        )
        .unwrap();
        fs::write(docs.join("index.md"), "# Home").unwrap();
        fs::write(docs.join("guide/mkdocs.yml"), "nav:\n  - Intro: intro.md\n").unwrap();
        fs::write(docs.join("guide/intro.md"), "# Intro").unwrap();
        repo
    }

    /// Builder with a template stored in `dir`.
    pub(crate) fn builder(dir: &Path) -> RepositoryBuilder {
        let template = dir.join("mkdocs-template.yml");
        fs::write(&template, "theme:\n  name: material\n").unwrap();
        RepositoryBuilder::new(
            "docs",
            ExpandOptions::default(),
            SiteWriter::new(template, "mkdocs.yml"),
        )
    }

    #[test]
    fn test_locate_uses_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "DB");

        let repo = builder(dir.path()).locate(&repo_dir, None, None).unwrap();

        assert_eq!(repo.name, "DB");
        assert_eq!(repo.site_name, "DB");
        assert_eq!(repo.dir, repo_dir.canonicalize().unwrap());
    }

    #[test]
    fn test_locate_with_site_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "dengking.github.io");

        let repo = builder(dir.path())
            .locate(&repo_dir, Some("dengking.github.io"), Some("Website of Kai"))
            .unwrap();

        assert_eq!(repo.name, "dengking.github.io");
        assert_eq!(repo.site_name, "Website of Kai");
    }

    #[test]
    fn test_locate_name_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "Hardware");

        let err = builder(dir.path())
            .locate(&repo_dir, Some("hardware-notes"), None)
            .unwrap_err();

        assert!(matches!(
            err,
            SiteError::RepositoryNameMismatch { ref name, ref actual, .. }
                if name == "hardware-notes" && actual == "Hardware"
        ));
    }

    #[test]
    fn test_locate_missing_directory() {
        let dir = tempfile::tempdir().unwrap();

        let err = builder(dir.path())
            .locate(&dir.path().join("missing"), Some("missing"), None)
            .unwrap_err();

        assert!(matches!(err, SiteError::RepositoryNotFound { .. }));
    }

    #[test]
    fn test_locate_missing_directory_without_name() {
        let dir = tempfile::tempdir().unwrap();

        let err = builder(dir.path())
            .locate(&dir.path().join("Hardware"), None, None)
            .unwrap_err();

        assert!(matches!(
            err,
            SiteError::RepositoryNotFound { ref name, .. } if name == "Hardware"
        ));
        assert!(err.to_string().starts_with("Repository 'Hardware' not found"));
    }

    #[test]
    fn test_build_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "DB");
        let builder = builder(dir.path());
        let repo = builder.locate(&repo_dir, None, None).unwrap();

        let output = builder.build(&repo).unwrap();

        assert_eq!(output, repo.dir.join("mkdocs.yml"));
        let written: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["site_name"], serde_yaml::Value::from("DB"));
        assert_eq!(
            written["nav"][1]["Guide"][0]["Intro"],
            serde_yaml::Value::from("guide/intro.md")
        );
    }

    #[test]
    fn test_expand_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "DB");
        let builder = builder(dir.path());
        let repo = builder.locate(&repo_dir, None, None).unwrap();

        let tree = builder.expand(&repo).unwrap();

        assert_eq!(
            tree.leaves(),
            vec![
                (NavPath::root().child("Home"), "index.md"),
                (
                    NavPath::root().child("Guide").child("Intro"),
                    "guide/intro.md"
                ),
            ]
        );
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = create_repository(dir.path(), "DB");
        fs::remove_file(repo_dir.join("docs/guide/intro.md")).unwrap();
        let builder = builder(dir.path());
        let repo = builder.locate(&repo_dir, None, None).unwrap();

        let err = builder.build(&repo).unwrap_err();

        assert!(matches!(
            err,
            SiteError::Nav(NavError::DanglingLeaf { ref path, .. }) if path == "guide/intro.md"
        ));
        assert!(!repo.dir.join("mkdocs.yml").exists());
    }

    #[test]
    fn test_missing_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join("empty");
        fs::create_dir(&repo_dir).unwrap();
        let builder = builder(dir.path());
        let repo = builder.locate(&repo_dir, None, None).unwrap();

        let err = builder.build(&repo).unwrap_err();

        assert!(matches!(err, SiteError::ContentRootMissing(_)));
    }
}
