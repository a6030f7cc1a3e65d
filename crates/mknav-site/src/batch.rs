//! Batch builds over every configured repository.

use std::path::PathBuf;

use mknav_config::Config;

use crate::error::SiteError;
use crate::repository::{Repository, RepositoryBuilder};

/// One repository to build in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Configured repository name.
    pub name: String,
    /// Display name, defaults to `name`.
    pub site_name: Option<String>,
    /// Repository directory.
    pub dir: PathBuf,
}

impl BatchEntry {
    /// Collect entries for every `[[repositories]]` table, in order.
    #[must_use]
    pub fn from_config(config: &Config) -> Vec<Self> {
        config
            .repositories
            .iter()
            .map(|repo| Self {
                name: repo.name.clone(),
                site_name: repo.site_name.clone(),
                dir: config.repository_dir(repo),
            })
            .collect()
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Repositories built, with their output paths.
    pub built: Vec<(String, PathBuf)>,
    /// Repositories that failed, with the reason.
    pub failed: Vec<(String, SiteError)>,
}

impl BatchReport {
    /// Whether every repository was built.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs a [`RepositoryBuilder`] over many repositories.
///
/// By default a failing repository is recorded and the run moves on. With
/// `fail_fast`, the first failure ends the run.
#[derive(Debug)]
pub struct BatchRunner {
    builder: RepositoryBuilder,
    fail_fast: bool,
}

impl BatchRunner {
    /// Create a runner that continues past failures.
    #[must_use]
    pub fn new(builder: RepositoryBuilder) -> Self {
        Self {
            builder,
            fail_fast: false,
        }
    }

    /// Stop at the first failure.
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Build every entry.
    ///
    /// All repositories are located before any is built, so naming problems
    /// surface without touching outputs.
    pub fn run(&self, entries: &[BatchEntry]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut located: Vec<Repository> = Vec::with_capacity(entries.len());

        for entry in entries {
            match self
                .builder
                .locate(&entry.dir, Some(&entry.name), entry.site_name.as_deref())
            {
                Ok(repository) => located.push(repository),
                Err(e) => {
                    tracing::warn!(repository = %entry.name, error = %e, "Failed to locate repository");
                    report.failed.push((entry.name.clone(), e));
                    if self.fail_fast {
                        return report;
                    }
                }
            }
        }

        for repository in located {
            match self.builder.build(&repository) {
                Ok(path) => report.built.push((repository.name, path)),
                Err(e) => {
                    tracing::warn!(repository = %repository.name, error = %e, "Build failed");
                    report.failed.push((repository.name, e));
                    if self.fail_fast {
                        break;
                    }
                }
            }
        }

        tracing::info!(
            built = report.built.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        report
    }
}
