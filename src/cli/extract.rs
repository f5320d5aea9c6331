//! Record table extraction command.

use crate::cli::common::{CliError, CliResult};
use crate::constants::LAYOUT_TABLE_FILE;
use crate::parser::{extract_records, load_klc, render_layout_ini, save_layout_ini};
use clap::Args;
use std::path::PathBuf;

/// Extract the physical key block into a flat layout.ini table
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Path to the .klc layout source
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (defaults to ./layout.ini)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the table instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> CliResult<()> {
        let rows = load_klc(&self.input)?;
        let records = extract_records(&rows)?;

        if self.stdout {
            print!("{}", render_layout_ini(&records));
            return Ok(());
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(LAYOUT_TABLE_FILE));

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(CliError::io(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        save_layout_ini(&records, &output)?;
        println!("✓ Wrote {} records to {}", records.len(), output.display());

        Ok(())
    }
}
