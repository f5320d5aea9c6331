//! Modifier combinations that select which character a key produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six shift states described by the layout source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftLayer {
    /// No modifier
    Base,
    /// Shift
    Shift,
    /// Ctrl
    Ctrl,
    /// Ctrl+Shift
    CtrlShift,
    /// Ctrl+Alt (AltGr)
    CtrlAlt,
    /// Ctrl+Alt+Shift
    CtrlAltShift,
}

impl ShiftLayer {
    /// All layers in source column order.
    pub const ALL: [Self; 6] = [
        Self::Base,
        Self::Shift,
        Self::Ctrl,
        Self::CtrlShift,
        Self::CtrlAlt,
        Self::CtrlAltShift,
    ];

    /// Number of shift layers.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based layer index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a layer by index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable modifier combination.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "none",
            Self::Shift => "shift",
            Self::Ctrl => "ctrl",
            Self::CtrlShift => "ctrl+shift",
            Self::CtrlAlt => "ctrl+alt",
            Self::CtrlAltShift => "ctrl+alt+shift",
        }
    }
}

impl fmt::Display for ShiftLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
