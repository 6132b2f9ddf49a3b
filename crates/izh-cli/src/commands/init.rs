//! Configuration file initialization

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Write a default configuration file
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn execute(self, config_path: Option<PathBuf>) -> CliResult<()> {
        let path = match config_path {
            Some(path) => path,
            None => CliConfig::default_config_path()?,
        };
        if path.exists() && !self.force {
            return Err(CliError::config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        CliConfig::default().save_to_file(&path)?;
        info!("Wrote default configuration to {}", path.display());
        println!("{}", path.display());
        Ok(())
    }
}
