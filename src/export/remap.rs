//! Hotkey remap table (`remap.json`).
//!
//! Maps the US name of each physical key to the label the layout puts there,
//! for keys whose label differs from US. Layer 0 keys are named by their
//! unshifted US label (`q`, `;`) and layer 1 keys by their shifted one (`Q`,
//! `:`), so a remapper can translate hotkeys written for a US keyboard.

use crate::error::{KlcError, KlcResult};
use crate::models::{GridLayout, ALPHANUMERIC_ROWS, US_SHIFTED_NAMES, US_TEMPLATE};
use crate::parser::layout_ini::atomic_write;
use std::collections::BTreeMap;
use std::path::Path;

/// US key name to layout label.
pub type RemapTable = BTreeMap<String, String>;

/// Builds the remap table from the base and shift layer grids.
pub fn build_remap(base: &GridLayout, shifted: &GridLayout) -> RemapTable {
    let mut table = RemapTable::new();
    collect_differences(&mut table, base, &US_TEMPLATE[..ALPHANUMERIC_ROWS]);
    collect_differences(&mut table, shifted, &US_SHIFTED_NAMES);
    table
}

/// Writes the remap table as pretty-printed JSON.
pub fn save_remap(table: &RemapTable, path: &Path) -> KlcResult<()> {
    let json = serde_json::to_string_pretty(table)
        .map_err(|e| KlcError::Render(format!("failed to serialize remap table: {e}")))?;
    atomic_write(path, format!("{json}\n").as_bytes())
}

fn collect_differences(table: &mut RemapTable, grid: &GridLayout, names: &[&[&str]]) {
    for (row, row_names) in names.iter().enumerate() {
        let last = row_names.len() - 1;
        for (col, us_name) in row_names.iter().enumerate() {
            // Edge columns hold static labels; row 1 ends with a real key
            let is_static_edge = col == 0 || (col == last && row != 1);
            if is_static_edge || us_name.is_empty() {
                continue;
            }
            match grid.cell(row, col) {
                Some(label) if !label.is_empty() && label != *us_name => {
                    table.insert((*us_name).to_string(), label.to_string());
                }
                _ => {}
            }
        }
    }
}
