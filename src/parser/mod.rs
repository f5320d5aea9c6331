//! Parsing and serialization for the layout source and the record table.
//!
//! This module handles reading KLC files, extracting the physical key block, and
//! writing the flat `layout.ini` table.

pub mod extractor;
pub mod klc;
pub mod layout_ini;

// Re-export commonly used functions
pub use extractor::extract_records;
pub use klc::{load_klc, SourceRow};
pub use layout_ini::{render_layout_ini, save_layout_ini};
