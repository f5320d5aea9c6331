//! Full conversion command: record table, diagrams and remap table.

use crate::cli::common::{load_config, CliResult};
use crate::models::ShiftLayer;
use crate::services::pipeline::{convert, ConvertOptions, DEFAULT_LAYERS};
use clap::Args;
use std::path::PathBuf;

/// Convert a KLC layout into layout.ini and diagram images
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Path to the .klc layout source
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory (defaults to the configured one, else the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Render all six shift layers instead of base and shift
    #[arg(long)]
    pub all_layers: bool,

    /// Only write layout.ini (and remap.json with --remap)
    #[arg(long, conflicts_with = "all_layers")]
    pub no_images: bool,

    /// Also write remap.json for hotkey remapping
    #[arg(long)]
    pub remap: bool,

    /// Label font file (overrides the configured font)
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;

        let mut render = config.render.clone();
        if let Some(font) = &self.font {
            render.font.clone_from(font);
        }

        let layers = if self.all_layers {
            ShiftLayer::ALL.to_vec()
        } else {
            DEFAULT_LAYERS.to_vec()
        };

        let options = ConvertOptions {
            output_dir: config.output_dir(self.output.as_deref()),
            layers,
            skip_images: self.no_images,
            write_remap: self.remap,
            render,
        };

        let report = convert(&self.input, &options)?;

        println!(
            "✓ Converted {} ({} records)",
            self.input.display(),
            report.records
        );
        println!("  Table:   {}", report.layout_table.display());
        for diagram in &report.diagrams {
            println!("  Diagram: {}", diagram.display());
        }
        if let Some(remap) = &report.remap {
            println!("  Remap:   {}", remap.display());
        }

        Ok(())
    }
}
