//! Error taxonomy for the conversion pipeline.
//!
//! Every variant is terminal for a run: the pipeline is a batch transform over a
//! single local file, so nothing here is retried or defaulted away.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type KlcResult<T> = Result<T, KlcError>;

/// Errors raised while loading, extracting, reconstructing or rendering a layout.
#[derive(Debug, Error)]
pub enum KlcError {
    /// The layout source path does not exist or is not a regular file.
    #[error("layout source not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The byte stream is not valid UTF-16.
    #[error("failed to decode {} as UTF-16: {reason}", path.display())]
    Decode {
        /// Path of the offending file
        path: PathBuf,
        /// What went wrong while decoding
        reason: String,
    },

    /// A field inside the key block could not be interpreted.
    #[error("malformed field in {scan_code} at slot {slot}: {value:?}")]
    MalformedField {
        /// Scan code of the row carrying the field (e.g. "SC01e")
        scan_code: String,
        /// Source field index within the row
        slot: usize,
        /// Raw field text
        value: String,
    },

    /// The same scan code appeared twice inside the key block.
    #[error("duplicate scan code {scan_code} in key block")]
    DuplicateScanCode {
        /// The repeated scan code
        scan_code: String,
    },

    /// The source never reached the first physical key row.
    #[error("no key block found (expected a row starting with scan code {start})")]
    MissingKeyBlock {
        /// Start sentinel that was searched for
        start: &'static str,
    },

    /// An alphanumeric grid row collected more keys than its geometry can hold.
    #[error(
        "layer {layer} row {row} has {actual} keys but only {capacity} fit between its edge labels"
    )]
    RowOverflow {
        /// Shift layer index (0-5)
        layer: usize,
        /// Grid row index (0-3)
        row: usize,
        /// Keys the row can hold besides its template edge labels
        capacity: usize,
        /// Keys collected from the source
        actual: usize,
    },

    /// A rendering asset (the label font) is missing or unusable.
    #[error("font asset {} unavailable: {reason}", path.display())]
    Asset {
        /// Font path from the render configuration
        path: PathBuf,
        /// Why the font could not be used
        reason: String,
    },

    /// The diagram could not be composed or rasterized.
    #[error("failed to render diagram: {0}")]
    Render(String),

    /// Reading the source or writing an output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl KlcError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by the content of the layout source.
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. }
                | Self::MalformedField { .. }
                | Self::DuplicateScanCode { .. }
                | Self::MissingKeyBlock { .. }
                | Self::RowOverflow { .. }
        )
    }
}
