//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed output file names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KLC Map";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "klcmap";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "klcmap";

/// File name of the flat record table.
pub const LAYOUT_TABLE_FILE: &str = "layout.ini";

/// File name of the key-name substitution table.
pub const REMAP_FILE: &str = "remap.json";

/// File name of a rendered layer diagram.
pub fn diagram_file_name(layer: usize) -> String {
    format!("state{layer}.png")
}
