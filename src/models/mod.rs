//! Data models for key records, shift layers, keyboard grids and styling.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of parsing, rendering and CLI concerns.

pub mod key_style;
pub mod keyboard_grid;
pub mod record;
pub mod rgb;
pub mod shift_layer;

// Re-export all model types
pub use key_style::{Coord, KeyClass, KeyStyle};
pub use keyboard_grid::{
    GridLayout, ALPHANUMERIC_ROWS, GRID_ROWS, MODIFIER_ROW, ROW_LENGTHS, US_SHIFTED_NAMES,
    US_TEMPLATE,
};
pub use record::{NormalizedRecord, ShiftValue, UNMAPPED_PLACEHOLDER};
pub use rgb::RgbColor;
pub use shift_layer::ShiftLayer;
