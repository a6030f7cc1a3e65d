//! Site configuration writer.
//!
//! Merges a finished [`NavTree`] into a template configuration and persists
//! the result next to the repository's content root.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use mknav_config::{REPOSITORY_PLACEHOLDER, SiteConfig};
use mknav_nav::{NAV_KEY, NavTree};
use serde_yaml::{Mapping, Value};

use crate::error::SiteError;

/// Mode of a newly created output, before the umask is applied.
#[cfg(unix)]
const NEW_OUTPUT_MODE: u32 = 0o644;

/// Identity of the site being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    /// Repository identifier, substituted into URL patterns.
    pub repository: String,
    /// Display name written as `site_name`.
    pub site_name: String,
}

/// Writes merged site configurations.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    template: PathBuf,
    output: String,
    site_url: Option<String>,
    repo_url: Option<String>,
}

impl SiteWriter {
    /// Create a writer merging into `template` and writing `output`.
    #[must_use]
    pub fn new(template: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
            site_url: None,
            repo_url: None,
        }
    }

    /// Create a writer from resolved site configuration.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.template.clone(), config.output.clone())
            .with_site_url(config.site_url.clone())
            .with_repo_url(config.repo_url.clone())
    }

    /// Set the `site_url` pattern.
    #[must_use]
    pub fn with_site_url(mut self, pattern: Option<String>) -> Self {
        self.site_url = pattern;
        self
    }

    /// Set the `repo_url` pattern.
    #[must_use]
    pub fn with_repo_url(mut self, pattern: Option<String>) -> Self {
        self.repo_url = pattern;
        self
    }

    /// Output path inside `repo_dir`.
    #[must_use]
    pub fn output_path(&self, repo_dir: &Path) -> PathBuf {
        repo_dir.join(&self.output)
    }

    /// Render the merged configuration without writing it.
    pub fn render(&self, tree: &NavTree, identity: &SiteIdentity) -> Result<String, SiteError> {
        let mut config = self.load_template()?;

        config.insert(Value::from(NAV_KEY), serde_yaml::to_value(tree)?);
        config.insert(
            Value::from("site_name"),
            Value::from(identity.site_name.as_str()),
        );
        if let Some(pattern) = &self.site_url {
            config.insert(
                Value::from("site_url"),
                Value::from(fill_repository(pattern, &identity.repository)),
            );
        }
        if let Some(pattern) = &self.repo_url {
            config.insert(
                Value::from("repo_url"),
                Value::from(fill_repository(pattern, &identity.repository)),
            );
        }

        Ok(serde_yaml::to_string(&config)?)
    }

    /// Merge and persist the configuration into `repo_dir`.
    ///
    /// The file is written to a temporary sibling first and renamed over the
    /// target, so an existing output is never left truncated. A rewritten
    /// output keeps the permissions of the file it replaces; a new one gets
    /// `0o644` less the process umask.
    ///
    /// Returns the output path.
    pub fn write(
        &self,
        tree: &NavTree,
        identity: &SiteIdentity,
        repo_dir: &Path,
    ) -> Result<PathBuf, SiteError> {
        let rendered = self.render(tree, identity)?;
        let path = self.output_path(repo_dir);
        let write_error = |source| SiteError::Write {
            path: path.clone(),
            source,
        };

        let existing = fs::metadata(&path).ok().map(|meta| meta.permissions());
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if existing.is_none() {
                builder.permissions(fs::Permissions::from_mode(NEW_OUTPUT_MODE));
            }
        }

        let mut file = builder.tempfile_in(repo_dir).map_err(write_error)?;
        if let Some(permissions) = existing {
            file.as_file()
                .set_permissions(permissions)
                .map_err(write_error)?;
        }
        file.write_all(rendered.as_bytes()).map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;

        tracing::info!(path = %path.display(), repository = %identity.repository, "Wrote site configuration");
        Ok(path)
    }

    fn load_template(&self) -> Result<Mapping, SiteError> {
        if !self.template.is_file() {
            return Err(SiteError::TemplateNotFound(self.template.clone()));
        }
        let content =
            fs::read_to_string(&self.template).map_err(|source| SiteError::TemplateRead {
                path: self.template.clone(),
                source,
            })?;
        let parse_error = |message: String| SiteError::TemplateParse {
            path: self.template.clone(),
            message,
        };

        let value: Value = serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        match value {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(parse_error("top level must be a mapping".to_owned())),
        }
    }
}

/// Replace `{repository}` in a URL pattern.
fn fill_repository(pattern: &str, repository: &str) -> String {
    pattern.replace(REPOSITORY_PLACEHOLDER, repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mknav_nav::NavEntry;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "\
site_name: placeholder
theme:
  name: material
markdown_extensions:
  - toc
";

    fn tree() -> NavTree {
        NavTree::from_entries(vec![
            NavEntry::leaf("Home", "index.md"),
            NavEntry::branch("Guide", vec![NavEntry::leaf("Intro", "guide/intro.md")]),
        ])
    }

    fn identity() -> SiteIdentity {
        SiteIdentity {
            repository: "compiler-principle".to_owned(),
            site_name: "Compiler Principle".to_owned(),
        }
    }

    fn writer_with_template(dir: &Path, template: &str) -> SiteWriter {
        let path = dir.join("mkdocs-template.yml");
        fs::write(&path, template).unwrap();
        SiteWriter::new(path, "mkdocs.yml")
    }

    #[test]
    fn test_render_merges_nav_into_template() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE);

        let rendered = writer.render(&tree(), &identity()).unwrap();
        let config: Mapping = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(config["site_name"], Value::from("Compiler Principle"));
        assert_eq!(config["theme"]["name"], Value::from("material"));
        assert_eq!(config["nav"], serde_yaml::to_value(tree()).unwrap());
        assert!(!config.contains_key("site_url"));
        assert!(!config.contains_key("repo_url"));
    }

    #[test]
    fn test_render_keeps_template_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE);

        let rendered = writer.render(&tree(), &identity()).unwrap();
        let config: Mapping = serde_yaml::from_str(&rendered).unwrap();
        let keys: Vec<_> = config.keys().filter_map(Value::as_str).collect();

        assert_eq!(keys, vec!["site_name", "theme", "markdown_extensions", "nav"]);
    }

    #[test]
    fn test_render_fills_url_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE)
            .with_site_url(Some("https://dengking.github.io/{repository}".to_owned()))
            .with_repo_url(Some("https://github.com/dengking/{repository}".to_owned()));

        let rendered = writer.render(&tree(), &identity()).unwrap();
        let config: Mapping = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(
            config["site_url"],
            Value::from("https://dengking.github.io/compiler-principle")
        );
        assert_eq!(
            config["repo_url"],
            Value::from("https://github.com/dengking/compiler-principle")
        );
    }

    #[test]
    fn test_render_empty_template() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), "");

        let rendered = writer.render(&tree(), &identity()).unwrap();
        let config: Mapping = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path().join("missing.yml"), "mkdocs.yml");

        let err = writer.render(&tree(), &identity()).unwrap_err();

        assert!(matches!(err, SiteError::TemplateNotFound(_)));
    }

    #[test]
    fn test_non_mapping_template() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), "- just\n- a list\n");

        let err = writer.render(&tree(), &identity()).unwrap_err();

        assert!(matches!(err, SiteError::TemplateParse { .. }));
    }

    #[test]
    fn test_write_persists_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE);
        let repo = dir.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join("mkdocs.yml"), "stale: true\n").unwrap();

        let path = writer.write(&tree(), &identity(), &repo).unwrap();

        assert_eq!(path, repo.join("mkdocs.yml"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, writer.render(&tree(), &identity()).unwrap());
        assert!(!written.contains("stale"));
        // Only the output remains, no temporary files.
        assert_eq!(fs::read_dir(&repo).unwrap().count(), 1);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_output_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE);
        let output = dir.path().join("mkdocs.yml");
        for expected in [0o644, 0o664] {
            fs::write(&output, "stale: true\n").unwrap();
            fs::set_permissions(&output, fs::Permissions::from_mode(expected)).unwrap();

            writer.write(&tree(), &identity(), dir.path()).unwrap();

            assert_eq!(mode(&output), expected);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_not_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with_template(dir.path(), TEMPLATE);

        let path = writer.write(&tree(), &identity(), dir.path()).unwrap();

        // 0o644 with the umask applied: never wider, always owner read/write.
        let mode = mode(&path);
        assert_eq!(mode & !NEW_OUTPUT_MODE, 0);
        assert_eq!(mode & 0o600, 0o600);
    }

    #[test]
    fn test_unreadable_template_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // Invalid UTF-8 makes the read itself fail.
        let template = dir.path().join("mkdocs-template.yml");
        fs::write(&template, [0xff, 0xfe, 0xfd]).unwrap();
        let writer = SiteWriter::new(&template, "mkdocs.yml");

        let err = writer.render(&tree(), &identity()).unwrap_err();

        assert!(matches!(err, SiteError::TemplateRead { ref path, .. } if *path == template));
        assert!(err.to_string().contains("mkdocs-template.yml"));
    }

    #[test]
    fn test_write_failure_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SiteWriter::new(dir.path().join("missing.yml"), "mkdocs.yml");
        fs::write(dir.path().join("mkdocs.yml"), "previous: true\n").unwrap();

        assert!(writer.write(&tree(), &identity(), dir.path()).is_err());

        assert_eq!(
            fs::read_to_string(dir.path().join("mkdocs.yml")).unwrap(),
            "previous: true\n"
        );
    }
}
