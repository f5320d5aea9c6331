//! Normalized key records extracted from the layout source.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder written for a shift state with no mapping.
pub const UNMAPPED_PLACEHOLDER: &str = "--";

/// Slot holding the caps-state column; shift layers start after it.
pub const CAP_STATE_SLOT: usize = 0;

/// Rendered value of one shift-state slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftValue {
    /// A single rendered character
    Char(char),
    /// No mapping for this shift state (source value `-1`)
    Unmapped,
}

impl ShiftValue {
    /// Returns the label used in a grid cell: the character, or empty when unmapped.
    pub fn grid_label(self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Unmapped => String::new(),
        }
    }
}

impl fmt::Display for ShiftValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Unmapped => f.write_str(UNMAPPED_PLACEHOLDER),
        }
    }
}

impl Serialize for ShiftValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One physical key as described by the layout source.
///
/// `shift_values[0]` is the caps-state column; `shift_values[1..]` are the six
/// shift layers in [`ShiftLayer`](super::ShiftLayer) order. Trailing slots may be
/// missing when the source row ended early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Scan code identifier, e.g. `SC01e`
    pub scan_code: String,
    /// Virtual key name from the source, e.g. `A` or `OEM_1`
    pub virtual_key: String,
    /// Caps state followed by per-layer values
    pub shift_values: Vec<ShiftValue>,
}

impl NormalizedRecord {
    /// Creates a record with no shift values yet.
    pub fn new(scan_code: impl Into<String>, virtual_key: impl Into<String>) -> Self {
        Self {
            scan_code: scan_code.into(),
            virtual_key: virtual_key.into(),
            shift_values: Vec::new(),
        }
    }

    /// Returns the value recorded for a shift layer slot, if present.
    pub fn layer_value(&self, layer_index: usize) -> Option<ShiftValue> {
        self.shift_values.get(layer_index + 1).copied()
    }

    /// Grid label for a shift layer: empty for unmapped or absent slots.
    pub fn layer_label(&self, layer_index: usize) -> String {
        self.layer_value(layer_index)
            .map(ShiftValue::grid_label)
            .unwrap_or_default()
    }
}
