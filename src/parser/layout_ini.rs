//! Flat record table generation (`layout.ini`).
//!
//! The table is the human-readable form of the extracted records, one line per
//! scan code:
//!
//! ```text
//! [layout]
//! ;scan = VK	CapStat	0Norm	1Sh	2Ctrl	6AGr	7AGrSh	Caps	CapsSh
//! SC002 = 1	0	1	!	--	¹	--
//! ```

use crate::error::{KlcError, KlcResult};
use crate::models::NormalizedRecord;
use std::path::Path;

/// Section header of the table.
pub const SECTION_HEADER: &str = "[layout]";

/// Comment line documenting the column schema.
pub const SCHEMA_COMMENT: &str = ";scan = VK\tCapStat\t0Norm\t1Sh\t2Ctrl\t6AGr\t7AGrSh\tCaps\tCapsSh";

/// Writes the record table to `path`.
///
/// The write goes through a temp file + rename so a failed run never leaves a
/// half-written table behind.
pub fn save_layout_ini(records: &[NormalizedRecord], path: &Path) -> KlcResult<()> {
    atomic_write(path, render_layout_ini(records).as_bytes())
}

/// Renders the record table as a string.
pub fn render_layout_ini(records: &[NormalizedRecord]) -> String {
    let mut output = String::new();
    output.push_str(SECTION_HEADER);
    output.push('\n');
    output.push_str(SCHEMA_COMMENT);
    output.push('\n');

    for record in records {
        output.push_str(&record_line(record));
        output.push('\n');
    }

    output
}

/// Formats one record: `scan_code = vk<TAB>v0<TAB>v1...`.
pub fn record_line(record: &NormalizedRecord) -> String {
    let values: Vec<String> = record.shift_values.iter().map(ToString::to_string).collect();
    format!(
        "{} = {}\t{}",
        record.scan_code,
        record.virtual_key,
        values.join("\t")
    )
}

/// Writes bytes via a sibling temp file and an atomic rename.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> KlcResult<()> {
    let extension = path
        .extension()
        .map(|ext| format!("{}.tmp", ext.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    let temp_path = path.with_extension(extension);

    std::fs::write(&temp_path, content).map_err(|e| KlcError::io(&temp_path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| KlcError::io(path, e))?;

    Ok(())
}
