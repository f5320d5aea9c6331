//! Record extraction from KLC source rows.
//!
//! The physical key table sits inside the `LAYOUT` section of a KLC file, starting
//! at the first real key (scan code `02`) and ending at scan code `53`. Rows look
//! like:
//!
//! ```text
//! SC  VK_        Cap  0     1     2     6     7
//! 02  1          0    1     0021  -1    00b9  -1    // 1, !, , ¹,
//! ```
//!
//! Each row becomes one [`NormalizedRecord`]; everything outside the block is
//! ignored.

use crate::error::{KlcError, KlcResult};
use crate::models::{NormalizedRecord, ShiftValue};
use crate::parser::klc::SourceRow;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Extraction state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Before the key block (or after it closed)
    Outside,
    /// Reading key rows
    Inside,
}

/// First-field values that open and close the key block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSentinels {
    /// Scan code of the first physical key
    pub start: &'static str,
    /// Scan code of the last physical key
    pub end: &'static str,
}

/// Key block boundaries used by KLC layouts.
pub const BLOCK_SENTINELS: BlockSentinels = BlockSentinels {
    start: "02",
    end: "53",
};

/// Tag prepended to the raw scan code.
pub const SCAN_CODE_PREFIX: &str = "SC0";

/// Inline comment marker; truncates the rest of a row.
pub const COMMENT_MARKER: &str = "//";

/// Source value meaning "no character for this shift state".
pub const UNMAPPED_SENTINEL: &str = "-1";

/// Suffix marking a forced codepoint mapping.
pub const FORCED_SUFFIX: char = '@';

/// Source field range holding caps state and shift-state values.
const VALUE_FIELDS: std::ops::RangeInclusive<usize> = 2..=9;

/// Interpretation of a single value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldToken {
    /// Empty alignment column
    Gap,
    /// Start of an inline comment
    Comment,
    /// A decoded value
    Value(ShiftValue),
    /// Not a literal, placeholder or hex codepoint
    Invalid,
}

/// Extracts normalized records from the KLC key block.
///
/// # Errors
///
/// - [`KlcError::MalformedField`] for a row missing its virtual key or carrying an
///   undecodable value
/// - [`KlcError::DuplicateScanCode`] when a scan code repeats
/// - [`KlcError::MissingKeyBlock`] when the start sentinel never appears
pub fn extract_records(rows: &[SourceRow]) -> KlcResult<Vec<NormalizedRecord>> {
    extract_records_with(rows, BLOCK_SENTINELS)
}

/// Extracts records using explicit block sentinels.
pub fn extract_records_with(
    rows: &[SourceRow],
    sentinels: BlockSentinels,
) -> KlcResult<Vec<NormalizedRecord>> {
    let mut state = BlockState::Outside;
    let mut closed = false;
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for row in rows {
        let first = row.field(0).unwrap_or_default();

        if state == BlockState::Outside {
            if first != sentinels.start {
                continue;
            }
            debug!("Key block starts at line {}", row.line);
            state = BlockState::Inside;
        }

        if row.is_blank() {
            continue;
        }

        let record = parse_record(row)?;
        if !seen.insert(record.scan_code.clone()) {
            return Err(KlcError::DuplicateScanCode {
                scan_code: record.scan_code,
            });
        }
        records.push(record);

        if first == sentinels.end {
            debug!("Key block ends at line {}", row.line);
            state = BlockState::Outside;
            closed = true;
            break;
        }
    }

    if records.is_empty() && !closed && state == BlockState::Outside {
        return Err(KlcError::MissingKeyBlock {
            start: sentinels.start,
        });
    }

    if state == BlockState::Inside {
        warn!(
            "Source ended before scan code {} closed the key block; keeping {} records",
            sentinels.end,
            records.len()
        );
    }

    Ok(records)
}

/// Builds a record from one key row.
fn parse_record(row: &SourceRow) -> KlcResult<NormalizedRecord> {
    let scan_code = format!("{SCAN_CODE_PREFIX}{}", row.field(0).unwrap_or_default());
    let virtual_key = row.field(1).ok_or_else(|| KlcError::MalformedField {
        scan_code: scan_code.clone(),
        slot: 1,
        value: String::new(),
    })?;

    let mut record = NormalizedRecord::new(scan_code, virtual_key);

    for slot in VALUE_FIELDS {
        let Some(field) = row.field(slot) else {
            break;
        };

        match tokenize_field(field) {
            FieldToken::Gap => continue,
            FieldToken::Comment => break,
            FieldToken::Value(value) => record.shift_values.push(value),
            FieldToken::Invalid => {
                return Err(KlcError::MalformedField {
                    scan_code: record.scan_code,
                    slot,
                    value: field.to_string(),
                })
            }
        }
    }

    Ok(record)
}

fn tokenize_field(field: &str) -> FieldToken {
    if field.is_empty() {
        return FieldToken::Gap;
    }
    if field.starts_with(COMMENT_MARKER) {
        return FieldToken::Comment;
    }

    let mut chars = field.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return FieldToken::Value(ShiftValue::Char(c));
    }

    if field == UNMAPPED_SENTINEL {
        return FieldToken::Value(ShiftValue::Unmapped);
    }

    let digits = field.strip_suffix(FORCED_SUFFIX).unwrap_or(field);
    decode_codepoint(digits).map_or(FieldToken::Invalid, |c| {
        FieldToken::Value(ShiftValue::Char(c))
    })
}

/// Decodes a hexadecimal Unicode codepoint.
///
/// Returns `None` for non-hex text and for values that are not Unicode scalar
/// values (surrogates, out of range).
pub fn decode_codepoint(digits: &str) -> Option<char> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize, fields: &[&str]) -> SourceRow {
        SourceRow::new(line, fields.iter().copied())
    }

    fn chars(values: &[ShiftValue]) -> String {
        values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_decode_codepoint() {
        assert_eq!(decode_codepoint("0031"), Some('1'));
        assert_eq!(decode_codepoint("222b"), Some('∫'));
        assert_eq!(decode_codepoint("1F600"), Some('😀'));
        assert_eq!(decode_codepoint("d800"), None);
        assert_eq!(decode_codepoint("110000"), None);
        assert_eq!(decode_codepoint("+41"), None);
        assert_eq!(decode_codepoint("zzz"), None);
        assert_eq!(decode_codepoint(""), None);
    }

    #[test]
    fn test_tokenize_field_kinds() {
        assert_eq!(tokenize_field(""), FieldToken::Gap);
        assert_eq!(tokenize_field("// 1, !"), FieldToken::Comment);
        assert_eq!(tokenize_field("q"), FieldToken::Value(ShiftValue::Char('q')));
        assert_eq!(tokenize_field("ß"), FieldToken::Value(ShiftValue::Char('ß')));
        assert_eq!(tokenize_field("-1"), FieldToken::Value(ShiftValue::Unmapped));
        assert_eq!(tokenize_field("zzz"), FieldToken::Invalid);
    }

    #[test]
    fn test_forced_suffix_decodes_like_plain_hex() {
        assert_eq!(tokenize_field("40@"), tokenize_field("40"));
        assert_eq!(tokenize_field("40@"), FieldToken::Value(ShiftValue::Char('@')));
    }

    #[test]
    fn test_extracts_block_between_sentinels() {
        let rows = vec![
            row(1, &["KBD", "test", "\"Test\""]),
            row(2, &["LAYOUT"]),
            row(3, &["02", "1", "", "0", "31", "21", "-1"]),
            row(4, &["03", "2", "", "0", "32", "40@", "-1"]),
            row(5, &["53", "DECIMAL", "", "0", "2e", "2e", "-1"]),
            row(6, &["56", "OEM_102", "", "0", "5c", "7c", "1c"]),
        ];

        let records = extract_records(&rows).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].scan_code, "SC002");
        assert_eq!(records[0].virtual_key, "1");
        assert_eq!(chars(&records[0].shift_values), "0 1 ! --");
        assert_eq!(chars(&records[1].shift_values), "0 2 @ --");
        assert_eq!(records[2].scan_code, "SC053");
    }

    #[test]
    fn test_rows_before_start_are_ignored() {
        let rows = vec![
            row(1, &["53", "DECIMAL", "", "0", "2e"]),
            row(2, &["02", "1", "", "0", "31", "21"]),
            row(3, &["53", "DECIMAL", "", "0", "2e"]),
        ];
        let records = extract_records(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].scan_code, "SC002");
    }

    #[test]
    fn test_inline_comment_truncates_record() {
        let rows = vec![
            row(1, &["02", "1", "", "0", "31", "// one", "21", "-1"]),
            row(2, &["53", "DECIMAL"]),
        ];
        let records = extract_records(&rows).unwrap();
        assert_eq!(chars(&records[0].shift_values), "0 1");
        assert!(records[1].shift_values.is_empty());
    }

    #[test]
    fn test_only_fields_two_through_nine_are_read() {
        let rows = vec![
            row(
                1,
                &["02", "1", "0", "31", "21", "-1", "-1", "-1", "-1", "-1", "41"],
            ),
            row(2, &["53", "DECIMAL"]),
        ];
        let records = extract_records(&rows).unwrap();
        assert_eq!(records[0].shift_values.len(), 8);
        assert!(!records[0].shift_values.contains(&ShiftValue::Char('A')));
    }

    #[test]
    fn test_malformed_field_reports_scan_code_and_slot() {
        let rows = vec![
            row(1, &["02", "1", "", "0", "31", "21"]),
            row(2, &["1e", "A", "", "1", "zzz", "41"]),
            row(3, &["53", "DECIMAL"]),
        ];
        match extract_records(&rows).unwrap_err() {
            KlcError::MalformedField {
                scan_code,
                slot,
                value,
            } => {
                assert_eq!(scan_code, "SC01e");
                assert_eq!(slot, 4);
                assert_eq!(value, "zzz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_without_virtual_key_is_malformed() {
        let rows = vec![row(1, &["02", "1", "", "0", "31"]), row(2, &["03"])];
        let err = extract_records(&rows).unwrap_err();
        assert!(matches!(err, KlcError::MalformedField { slot: 1, .. }));
    }

    #[test]
    fn test_blank_rows_inside_block_are_skipped() {
        let rows = vec![
            row(1, &["02", "1", "", "0", "31"]),
            row(2, &[""]),
            row(3, &["53", "DECIMAL"]),
        ];
        assert_eq!(extract_records(&rows).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_scan_code_rejected() {
        let rows = vec![
            row(1, &["02", "1", "", "0", "31"]),
            row(2, &["02", "1", "", "0", "31"]),
        ];
        let err = extract_records(&rows).unwrap_err();
        assert!(matches!(err, KlcError::DuplicateScanCode { scan_code } if scan_code == "SC002"));
    }

    #[test]
    fn test_missing_key_block() {
        let rows = vec![row(1, &["KBD", "x"]), row(2, &["LAYOUT"])];
        let err = extract_records(&rows).unwrap_err();
        assert!(matches!(err, KlcError::MissingKeyBlock { start: "02" }));
    }

    #[test]
    fn test_unterminated_block_keeps_records() {
        let rows = vec![
            row(1, &["02", "1", "", "0", "31"]),
            row(2, &["03", "2", "", "0", "32"]),
        ];
        assert_eq!(extract_records(&rows).unwrap().len(), 2);
    }

    #[test]
    fn test_custom_sentinels() {
        let rows = vec![
            row(1, &["10", "Q", "", "1", "71"]),
            row(2, &["11", "W", "", "1", "77"]),
            row(3, &["12", "E", "", "1", "65"]),
        ];
        let sentinels = BlockSentinels {
            start: "10",
            end: "11",
        };
        let records = extract_records_with(&rows, sentinels).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].scan_code, "SC011");
    }
}
