//! Output generation for reconstructed layouts.
//!
//! This module renders keyboard grids as PNG diagrams and exports the hotkey
//! remap table.

pub mod keyboard_renderer;
pub mod remap;

pub use keyboard_renderer::{load_font, render_layer_png, render_svg, LoadedFont, RenderConfig};
pub use remap::{build_remap, save_remap, RemapTable};
