//! Configuration management CLI commands.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// Show or initialize the configuration file
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Print the effective configuration (default action)
    #[arg(long, conflicts_with = "init")]
    pub show: bool,

    /// Write a config file with default values
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config command
    pub fn execute(&self) -> CliResult<()> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?,
        };

        if self.init {
            return self.init_config(path);
        }

        let config = load_config(Some(&path))?;
        let content = config
            .to_toml()
            .map_err(|e| CliError::io(format!("Failed to serialize configuration: {e}")))?;

        let origin = if path.exists() { "" } else { " (not found, using defaults)" };
        println!("# {}{}", path.display(), origin);
        print!("{content}");

        Ok(())
    }

    fn init_config(&self, path: PathBuf) -> CliResult<()> {
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        Config::new()
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to write configuration: {e:#}")))?;

        println!("✓ Wrote default configuration to {}", path.display());
        Ok(())
    }
}
