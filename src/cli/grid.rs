//! Grid inspection command.

use crate::cli::common::{parse_layer, CliError, CliResult};
use crate::models::GridLayout;
use crate::services::pipeline::load_layout;
use clap::Args;
use std::path::PathBuf;

/// Print the reconstructed keyboard grid
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Path to the .klc layout source
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Shift layer to print (0-5); all layers when omitted
    #[arg(short, long, value_name = "N")]
    pub layer: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GridArgs {
    /// Execute the grid command
    pub fn execute(&self) -> CliResult<()> {
        let selected = self.layer.map(parse_layer).transpose()?;
        let layout = load_layout(&self.input)?;

        let grids: Vec<&GridLayout> = match selected {
            Some(layer) => vec![layout.grid(layer)],
            None => layout.grids.iter().collect(),
        };

        if self.json {
            let json = if let [grid] = grids.as_slice() {
                serde_json::to_string_pretty(grid)
            } else {
                serde_json::to_string_pretty(&grids)
            }
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            for (idx, grid) in grids.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                println!("Layer {} ({})", grid.layer.index(), grid.layer);
                print!("{}", grid.to_text());
            }
        }

        Ok(())
    }
}
