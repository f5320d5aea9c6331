//! Physical keyboard grid: the fixed five-row arrangement keys are laid out on.
//!
//! # Geometry
//!
//! ```text
//! row 0  ~ 1 2 3 4 5 6 7 8 9 0 - = ←          14 keys
//! row 1  ↹ q w e r t y u i o p [ ] \          14 keys
//! row 2  ⇪ a s d f g h j k l ; ' ↵            13 keys
//! row 3  ⇧ z x c v b n m , . / ⇧              12 keys
//! row 4  ctrl fn ⊞ alt ␠ alt ⊟ ctrl            8 keys
//! ```
//!
//! Rows 0-3 are filled from the layout source; row 4 is always the static
//! modifier row.

use super::ShiftLayer;
use serde::Serialize;

/// Number of grid rows.
pub const GRID_ROWS: usize = 5;

/// Rows derived from source data (digit, top letter, home, bottom letter).
pub const ALPHANUMERIC_ROWS: usize = 4;

/// Index of the static modifier row.
pub const MODIFIER_ROW: usize = 4;

/// Exact length of every grid row.
pub const ROW_LENGTHS: [usize; GRID_ROWS] = [14, 14, 13, 12, 8];

/// Default US layout labels, used for edge keys and the modifier row.
pub const US_TEMPLATE: [&[&str]; GRID_ROWS] = [
    &[
        "~", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "←",
    ],
    &[
        "↹", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\",
    ],
    &["⇪", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "↵"],
    &["⇧", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "⇧"],
    &["ctrl", "fn", "⊞", "alt", " ", "alt", "⊟", "ctrl"],
];

/// US key names produced with shift held, aligned with [`US_TEMPLATE`] columns.
///
/// Edge columns are empty: they hold static labels, not character keys.
pub const US_SHIFTED_NAMES: [&[&str]; ALPHANUMERIC_ROWS] = [
    &[
        "", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "_", "+", "",
    ],
    &[
        "", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "{", "}", "|",
    ],
    &["", "A", "S", "D", "F", "G", "H", "J", "K", "L", ":", "\"", ""],
    &["", "Z", "X", "C", "V", "B", "N", "M", "<", ">", "?", ""],
];

/// Template labels of a row as owned strings.
pub fn template_row(row: usize) -> Vec<String> {
    US_TEMPLATE[row].iter().map(|s| (*s).to_string()).collect()
}

/// Key labels for one shift layer, laid out on the physical grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    /// Shift layer these labels belong to
    pub layer: ShiftLayer,
    /// Five rows of labels; an empty label is a blank key
    pub rows: Vec<Vec<String>>,
}

impl GridLayout {
    /// Creates a grid from rows.
    pub const fn new(layer: ShiftLayer, rows: Vec<Vec<String>>) -> Self {
        Self { layer, rows }
    }

    /// The default US grid.
    pub fn us_default(layer: ShiftLayer) -> Self {
        Self::new(layer, (0..GRID_ROWS).map(template_row).collect())
    }

    /// Label at a grid coordinate.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Length of every row, in order.
    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    /// Returns true when every row has its physical length.
    pub fn has_physical_shape(&self) -> bool {
        self.row_lengths() == ROW_LENGTHS
    }

    /// Plain-text rendering: one line per row, cells separated by tabs.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}
