//! KLC Map Library
//!
//! This library converts Microsoft Keyboard Layout Creator (`.klc`) sources into
//! a flat key table (`layout.ini`), per-shift-layer keyboard grids, PNG diagrams
//! of those grids and an optional hotkey remap table.
//!
//! The pipeline is: [`parser::load_klc`] → [`parser::extract_records`] →
//! [`services::build_grids`] → [`export::render_layer_png`], with
//! [`services::convert`] running all of it.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;

pub use error::{KlcError, KlcResult};
