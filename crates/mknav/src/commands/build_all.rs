//! `mknav build-all` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mknav_config::{CliSettings, Config};
use mknav_site::{BatchEntry, BatchRunner, RepositoryBuilder};

use crate::error::CliError;
use crate::output::Output;

use super::DocsArgs;

/// Arguments for the build-all command.
#[derive(Args)]
pub(crate) struct BuildAllArgs {
    /// Directory containing the repositories (overrides config).
    #[arg(short, long)]
    repositories_dir: Option<PathBuf>,

    /// Stop at the first failing repository.
    #[arg(long)]
    fail_fast: bool,

    #[command(flatten)]
    docs: DocsArgs,
}

impl BuildAllArgs {
    /// Execute the build-all command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any repository fails.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let cwd = std::env::current_dir()?;

        let cli_settings = CliSettings {
            repositories_dir: self.repositories_dir.map(|dir| cwd.join(dir)),
            ..self.docs.into_settings()
        };
        let config = Config::load(config_path, &cwd, Some(&cli_settings))?;

        let entries = BatchEntry::from_config(&config);
        if entries.is_empty() {
            output.warning("No repositories configured in mknav.toml");
            return Ok(());
        }
        output.info(&format!("Building {} repositories...", entries.len()));

        let report = BatchRunner::new(RepositoryBuilder::from_config(&config))
            .with_fail_fast(self.fail_fast)
            .run(&entries);

        for (name, path) in &report.built {
            output.success(&format!("  {name} -> {}", path.display()));
        }
        for (name, err) in &report.failed {
            output.error(&format!("  {name}: {err}"));
        }

        if report.is_success() {
            Ok(())
        } else {
            Err(CliError::Batch {
                failed: report.failed.len(),
                total: entries.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_repository(parent: &Path, name: &str) -> PathBuf {
        let repo = parent.join(name);
        fs::create_dir_all(repo.join("docs")).unwrap();
        fs::write(repo.join("docs/mkdocs.yml"), "nav:\n  - Home: index.md\n").unwrap();
        fs::write(repo.join("docs/index.md"), "# Home").unwrap();
        repo
    }

    fn args(fail_fast: bool) -> BuildAllArgs {
        BuildAllArgs {
            repositories_dir: None,
            fail_fast,
            docs: DocsArgs::default(),
        }
    }

    #[test]
    fn test_build_all_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mknav.toml");
        fs::write(
            &config,
            "[batch]\nrepositories_dir = \"repos\"\n\n\
             [[repositories]]\nname = \"Broken\"\n\n\
             [[repositories]]\nname = \"DB\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("mkdocs-template.yml"), "theme: material\n").unwrap();
        let repos = dir.path().join("repos");
        let broken = create_repository(&repos, "Broken");
        fs::remove_file(broken.join("docs/index.md")).unwrap();
        let db = create_repository(&repos, "DB");

        let err = args(false).execute(Some(&config)).unwrap_err();

        assert!(matches!(err, CliError::Batch { failed: 1, total: 2 }));
        assert!(db.join("mkdocs.yml").is_file());
        assert!(!broken.join("mkdocs.yml").exists());
    }

    #[test]
    fn test_build_all_without_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mknav.toml");
        fs::write(&config, "[docs]\ndir = \"docs\"\n").unwrap();

        args(true).execute(Some(&config)).unwrap();
    }
}
