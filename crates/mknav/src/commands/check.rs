//! `mknav check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mknav_config::Config;
use mknav_site::RepositoryBuilder;

use crate::error::CliError;
use crate::output::Output;

use super::DocsArgs;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Repository directory.
    #[arg(default_value = ".")]
    repo_dir: PathBuf,

    #[command(flatten)]
    docs: DocsArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Expands the repository's fragments and prints the navigation as YAML
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or expansion fails.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let repo_dir = std::path::absolute(&self.repo_dir)?;

        let config = Config::load(config_path, &repo_dir, Some(&self.docs.into_settings()))?;
        let builder = RepositoryBuilder::from_config(&config);
        let repository = builder.locate(&repo_dir, None, None)?;

        let tree = builder.expand(&repository)?;
        output.data(&serde_yaml::to_string(&tree)?);
        output.success(&format!(
            "{}: {} pages",
            repository.name,
            tree.leaves().len()
        ));

        Ok(())
    }
}
