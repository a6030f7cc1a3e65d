//! `mknav scan` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mknav_config::Config;
use mknav_nav::scan_tree;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the scan command.
#[derive(Args)]
pub(crate) struct ScanArgs {
    /// Content directory to walk.
    #[arg(default_value = ".")]
    dir: PathBuf,
}

impl ScanArgs {
    /// Execute the scan command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a directory cannot be read.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let dir = std::path::absolute(&self.dir)?;

        let config = Config::load(config_path, &dir, None)?;
        let tree = scan_tree(&dir, &config.docs.suffix).map_err(|source| CliError::Scan {
            path: dir.clone(),
            source,
        })?;

        if tree.is_empty() {
            output.warning(&format!(
                "No {} files under {}",
                config.docs.suffix,
                dir.display()
            ));
        }
        output.data(&serde_yaml::to_string(&tree)?);

        Ok(())
    }
}
