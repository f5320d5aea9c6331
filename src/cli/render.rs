//! Single-layer diagram rendering command.

use crate::cli::common::{load_config, parse_layer, CliResult};
use crate::constants::diagram_file_name;
use crate::export::render_layer_png;
use crate::models::KeyStyle;
use crate::services::pipeline::{ensure_dir, load_layout};
use clap::Args;
use std::path::PathBuf;

/// Render one shift layer as a PNG diagram
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to the .klc layout source
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Shift layer to render (0-5)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub layer: usize,

    /// Output directory (defaults to the configured one, else the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Label font file (overrides the configured font)
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let layer = parse_layer(self.layer)?;
        let config = load_config(self.config.as_deref())?;

        let mut render = config.render.clone();
        if let Some(font) = &self.font {
            render.font.clone_from(font);
        }

        let layout = load_layout(&self.input)?;
        let output_dir = config.output_dir(self.output.as_deref());
        ensure_dir(&output_dir)?;

        let path = output_dir.join(diagram_file_name(layer.index()));
        render_layer_png(
            layout.grid(layer),
            layer.index(),
            &KeyStyle::standard(),
            &render,
            &path,
        )?;

        println!("✓ Rendered layer {} ({}) to {}", layer.index(), layer, path.display());
        Ok(())
    }
}
