//! `mknav build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mknav_config::{CliSettings, Config};
use mknav_site::RepositoryBuilder;

use crate::error::CliError;
use crate::output::Output;

use super::DocsArgs;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Repository directory.
    #[arg(default_value = ".")]
    repo_dir: PathBuf,

    /// Repository identifier; must match the directory name.
    #[arg(short, long)]
    name: Option<String>,

    /// Display name written as `site_name` (default: configured or identifier).
    #[arg(long)]
    site_name: Option<String>,

    /// Template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Print the merged configuration without writing it.
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    docs: DocsArgs,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, expansion or writing fails.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let repo_dir = std::path::absolute(&self.repo_dir)?;

        let cli_settings = CliSettings {
            template: self.template,
            ..self.docs.into_settings()
        };
        let config = Config::load(config_path, &repo_dir, Some(&cli_settings))?;
        let builder = RepositoryBuilder::from_config(&config);

        let repository = super::locate_repository(
            &builder,
            &config,
            &repo_dir,
            self.name.as_deref(),
            self.site_name.as_deref(),
        )?;

        if self.dry_run {
            let rendered = builder.render(&repository)?;
            output.highlight(&format!(
                "[DRY RUN] Would write {}",
                builder.writer().output_path(&repository.dir).display()
            ));
            output.data(&rendered);
        } else {
            let path = builder.build(&repository)?;
            output.success(&format!("Built {} -> {}", repository.name, path.display()));
        }

        Ok(())
    }
}
