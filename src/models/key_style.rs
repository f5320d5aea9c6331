//! Static styling tables for keyboard diagrams.

use super::RgbColor;
use std::collections::{HashMap, HashSet};

/// Grid coordinate (row, column).
pub type Coord = (usize, usize);

/// Visual class of a key, each mapped to a fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// Letters
    Regular,
    /// Commands, numbers and punctuation
    Special,
    /// Modifier held for the rendered layer
    Selected,
    /// Home-row locator labels
    Highlight,
}

/// Key widths, colors and coordinate sets used when drawing a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyStyle {
    /// Width multipliers for keys wider than one unit
    pub widths: HashMap<Coord, f32>,
    /// Color per key class
    pub colors: HashMap<KeyClass, RgbColor>,
    /// Coordinates always drawn as Special
    pub forced_special: HashSet<Coord>,
    /// Punctuation coordinates drawn as Special
    pub gray: HashSet<Coord>,
    /// Coordinates whose label is drawn in the Highlight color
    pub locators: HashSet<Coord>,
    /// Per shift layer, the modifier labels drawn as Selected
    pub active_modifiers: Vec<Vec<&'static str>>,
}

impl KeyStyle {
    /// Styling for the standard ANSI-like grid.
    pub fn standard() -> Self {
        let widths: HashMap<Coord, f32> = HashMap::from([
            ((0, 13), 2.0),  // backspace
            ((1, 0), 1.5),   // tab
            ((1, 13), 1.5),  // backslash
            ((2, 0), 1.75),  // caps lock
            ((2, 12), 2.42), // enter
            ((3, 0), 2.25),  // left shift
            ((3, 11), 3.1),  // right shift
            ((4, 0), 1.08),  // left ctrl
            ((4, 4), 6.25),  // space
            ((4, 7), 3.7),   // right ctrl
        ]);
        let forced_special = widths.keys().copied().collect();

        Self {
            widths,
            colors: HashMap::from([
                (KeyClass::Regular, RgbColor::new(0xD3, 0xD3, 0xD3)),
                (KeyClass::Highlight, RgbColor::new(0x00, 0x00, 0xFF)),
                (KeyClass::Special, RgbColor::new(0xA9, 0xA9, 0xA9)),
                (KeyClass::Selected, RgbColor::new(0x80, 0x80, 0x80)),
            ]),
            forced_special,
            gray: HashSet::from([(1, 11), (1, 12), (2, 10), (2, 11), (3, 8), (3, 9), (3, 10)]),
            locators: HashSet::from([(2, 4), (2, 7)]),
            active_modifiers: vec![
                vec![],
                vec!["⇧"],
                vec!["ctrl"],
                vec!["ctrl", "⇧"],
                vec!["ctrl", "alt"],
                vec!["ctrl", "alt", "⇧"],
            ],
        }
    }

    /// Width multiplier at a coordinate (1.0 when not listed).
    pub fn width_multiplier(&self, coord: Coord) -> f32 {
        self.widths.get(&coord).copied().unwrap_or(1.0)
    }

    /// Fill class for a key before the selected-modifier override.
    ///
    /// Priority: forced special > top/bottom row > gray-listed > regular.
    pub fn base_class(&self, coord: Coord, last_row: usize) -> KeyClass {
        if self.forced_special.contains(&coord) || coord.0 == 0 || coord.0 == last_row {
            KeyClass::Special
        } else if self.gray.contains(&coord) {
            KeyClass::Special
        } else {
            KeyClass::Regular
        }
    }

    /// Fill class for a labeled key on a given shift layer.
    pub fn fill_class(&self, coord: Coord, last_row: usize, label: &str, layer: usize) -> KeyClass {
        if self.is_active_modifier(label, layer) {
            KeyClass::Selected
        } else {
            self.base_class(coord, last_row)
        }
    }

    /// Returns true when the label names a modifier held on this layer.
    pub fn is_active_modifier(&self, label: &str, layer: usize) -> bool {
        self.active_modifiers
            .get(layer)
            .is_some_and(|set| set.iter().any(|m| *m == label))
    }

    /// Color of a key class (black when the table has no entry).
    pub fn color(&self, class: KeyClass) -> RgbColor {
        self.colors.get(&class).copied().unwrap_or(RgbColor::BLACK)
    }
}

impl Default for KeyStyle {
    fn default() -> Self {
        Self::standard()
    }
}
