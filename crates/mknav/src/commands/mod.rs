//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod build_all;
pub(crate) mod check;
pub(crate) mod scan;

pub(crate) use build::BuildArgs;
pub(crate) use build_all::BuildAllArgs;
pub(crate) use check::CheckArgs;
pub(crate) use scan::ScanArgs;

use std::path::Path;

use clap::Args;
use mknav_config::{CliSettings, Config};
use mknav_site::{Repository, RepositoryBuilder};

use crate::error::CliError;

/// Content tree overrides for commands that expand fragments.
#[derive(Args, Default)]
pub(crate) struct DocsArgs {
    /// Content directory inside each repository (overrides config).
    #[arg(long)]
    docs_dir: Option<String>,

    /// Fragment file name (overrides config).
    #[arg(long)]
    fragment: Option<String>,

    /// Maximum fragment nesting depth (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,
}

impl DocsArgs {
    fn into_settings(self) -> CliSettings {
        CliSettings {
            docs_dir: self.docs_dir,
            fragment: self.fragment,
            max_depth: self.max_depth,
            ..Default::default()
        }
    }
}

/// Locate a repository, taking its display name from the command line or
/// from a matching `[[repositories]]` entry.
fn locate_repository(
    builder: &RepositoryBuilder,
    config: &Config,
    dir: &Path,
    name: Option<&str>,
    site_name: Option<&str>,
) -> Result<Repository, CliError> {
    let mut repository = builder.locate(dir, name, site_name)?;
    if site_name.is_none()
        && let Some(configured) = config.repository(&repository.name)
    {
        configured
            .display_name()
            .clone_into(&mut repository.site_name);
    }
    Ok(repository)
}
