//! End-to-end conversion of a KLC source into its output files.

use crate::constants::{diagram_file_name, LAYOUT_TABLE_FILE, REMAP_FILE};
use crate::error::{KlcError, KlcResult};
use crate::export::keyboard_renderer::{load_font, render_layer_png_with, RenderConfig};
use crate::export::remap::{build_remap, save_remap};
use crate::models::{GridLayout, KeyStyle, NormalizedRecord, ShiftLayer};
use crate::parser::{extract_records, load_klc, save_layout_ini};
use crate::services::grid::build_grids;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Layers rendered when no explicit selection is made.
pub const DEFAULT_LAYERS: [ShiftLayer; 2] = [ShiftLayer::Base, ShiftLayer::Shift];

/// What a conversion run produces.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving every output file
    pub output_dir: PathBuf,
    /// Layers to draw diagrams for
    pub layers: Vec<ShiftLayer>,
    /// Skip diagram rendering entirely
    pub skip_images: bool,
    /// Also write the hotkey remap table
    pub write_remap: bool,
    /// Diagram drawing parameters
    pub render: RenderConfig,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            layers: DEFAULT_LAYERS.to_vec(),
            skip_images: false,
            write_remap: false,
            render: RenderConfig::default(),
        }
    }
}

/// Files written by a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of key records extracted
    pub records: usize,
    /// Path of the flat record table
    pub layout_table: PathBuf,
    /// Diagram paths, in render order
    pub diagrams: Vec<PathBuf>,
    /// Path of the remap table, when requested
    pub remap: Option<PathBuf>,
}

/// Source records together with the grids built from them.
#[derive(Debug, Clone)]
pub struct LoadedLayout {
    /// Extracted records, in source order
    pub records: Vec<NormalizedRecord>,
    /// One grid per shift layer
    pub grids: Vec<GridLayout>,
}

impl LoadedLayout {
    /// Grid of a shift layer.
    pub fn grid(&self, layer: ShiftLayer) -> &GridLayout {
        &self.grids[layer.index()]
    }
}

/// Loads a KLC file, extracts its records and rebuilds all six grids.
pub fn load_layout(input: &Path) -> KlcResult<LoadedLayout> {
    let rows = load_klc(input)?;
    let records = extract_records(&rows)?;
    let grids = build_grids(&records)?;
    info!(
        "Extracted {} records from {}",
        records.len(),
        input.display()
    );
    Ok(LoadedLayout { records, grids })
}

/// Converts a KLC file: record table, diagrams and optional remap table.
///
/// Everything that can fail on bad input (decoding, extraction, grid
/// reconciliation, loading the font) happens before the first file is
/// written, so a rejected source leaves the output directory untouched.
pub fn convert(input: &Path, options: &ConvertOptions) -> KlcResult<ConversionReport> {
    let layout = load_layout(input)?;

    let font = if options.skip_images || options.layers.is_empty() {
        None
    } else {
        Some(load_font(&options.render)?)
    };

    ensure_dir(&options.output_dir)?;

    let layout_table = options.output_dir.join(LAYOUT_TABLE_FILE);
    save_layout_ini(&layout.records, &layout_table)?;
    info!("Wrote {}", layout_table.display());

    let mut diagrams = Vec::new();
    if let Some(font) = &font {
        let style = KeyStyle::standard();
        for layer in &options.layers {
            let path = options.output_dir.join(diagram_file_name(layer.index()));
            render_layer_png_with(
                layout.grid(*layer),
                layer.index(),
                &style,
                &options.render,
                font,
                &path,
            )?;
            info!("Rendered {} layer to {}", layer, path.display());
            diagrams.push(path);
        }
    }

    let remap = if options.write_remap {
        let path = options.output_dir.join(REMAP_FILE);
        let table = build_remap(layout.grid(ShiftLayer::Base), layout.grid(ShiftLayer::Shift));
        save_remap(&table, &path)?;
        info!("Wrote {} remapped keys to {}", table.len(), path.display());
        Some(path)
    } else {
        None
    };

    Ok(ConversionReport {
        records: layout.records.len(),
        layout_table,
        diagrams,
        remap,
    })
}

/// Creates the output directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> KlcResult<()> {
    fs::create_dir_all(dir).map_err(|e| KlcError::io(dir, e))
}
