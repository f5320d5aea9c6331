//! Keyboard Layout Creator source loading.
//!
//! KLC files are UTF-16 text with one tab-delimited record per line. This module
//! only decodes and splits; interpreting the rows is the extractor's job.

use crate::error::{KlcError, KlcResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One source line split on tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line number in the source file
    pub line: usize,
    /// Tab-separated fields, in order
    pub fields: Vec<String>,
}

impl SourceRow {
    /// Creates a row from its fields.
    pub fn new<S: Into<String>>(line: usize, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Field at an index, if present.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Returns true when every field is empty (a blank line).
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

/// Reads a KLC file into rows.
///
/// # Errors
///
/// - [`KlcError::NotFound`] when the path is missing or not a file
/// - [`KlcError::Decode`] when the bytes are not valid UTF-16
/// - [`KlcError::Io`] when reading fails
pub fn load_klc(path: &Path) -> KlcResult<Vec<SourceRow>> {
    if !path.is_file() {
        return Err(KlcError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| KlcError::io(path, e))?;
    let text = decode_utf16(&bytes).map_err(|reason| KlcError::Decode {
        path: path.to_path_buf(),
        reason,
    })?;

    let rows = split_rows(&text);
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Decodes UTF-16 bytes, honoring a leading byte-order mark.
///
/// Without a BOM the bytes are read as little-endian, which is what the
/// layout tool writes.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!(
            "odd byte length {} (UTF-16 needs two bytes per code unit)",
            bytes.len()
        ));
    }

    let (big_endian, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        _ => (false, bytes),
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| format!("unpaired surrogate 0x{:04X}", e.unpaired_surrogate()))
}

/// Splits decoded text into tab-delimited rows, dropping line terminators.
pub fn split_rows(text: &str) -> Vec<SourceRow> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| SourceRow::new(idx + 1, line.split('\t')))
        .collect()
}
