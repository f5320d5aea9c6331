//! Grid reconstruction: reshaping extracted records into the physical keyboard.
//!
//! Records arrive in source order, which is scan-code order rather than visual
//! order. Four scan codes mark the first key of each alphanumeric row, one marks
//! the start of the modifier row (where reconstruction stops), one key is
//! displaced in the stream and one is skipped entirely. The magic values live in
//! the tables below.

use crate::error::{KlcError, KlcResult};
use crate::models::keyboard_grid::template_row;
use crate::models::{GridLayout, NormalizedRecord, ShiftLayer, ALPHANUMERIC_ROWS, MODIFIER_ROW};
use tracing::{debug, warn};

/// First scan code of each alphanumeric row, with the row it selects.
pub const ROW_SENTINELS: [(&str, usize); ALPHANUMERIC_ROWS] =
    [("SC002", 0), ("SC010", 1), ("SC01e", 2), ("SC02c", 3)];

/// First key of the modifier row; reconstruction stops here.
pub const GRID_END_SCAN_CODE: &str = "SC039";

/// Backslash key: visually ends row 1 but is listed after the home row.
pub const DISPLACED_SCAN_CODE: &str = "SC02b";

/// Row the displaced key belongs to.
pub const DISPLACED_ROW: usize = 1;

/// Grave/tilde key: its cell is the static leading label of row 0.
pub const IGNORED_SCAN_CODE: &str = "SC029";

/// Length rule for one alphanumeric row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRule {
    /// Grid row index
    pub row: usize,
    /// Exact row length after reconciliation
    pub target: usize,
    /// Static label placed before the source keys
    pub leading: &'static str,
    /// Static label placed after the source keys, if the row has one
    pub trailing: Option<&'static str>,
}

impl RowRule {
    /// Number of source keys that fit between the edge labels.
    pub const fn capacity(&self) -> usize {
        let trailing = if self.trailing.is_some() { 1 } else { 0 };
        self.target - 1 - trailing
    }
}

/// Reconciliation rules for rows 0-3.
///
/// Row 1 has no trailing label: the displaced backslash key closes it.
pub const ROW_RULES: [RowRule; ALPHANUMERIC_ROWS] = [
    RowRule {
        row: 0,
        target: 14,
        leading: "~",
        trailing: Some("←"),
    },
    RowRule {
        row: 1,
        target: 14,
        leading: "↹",
        trailing: None,
    },
    RowRule {
        row: 2,
        target: 13,
        leading: "⇪",
        trailing: Some("↵"),
    },
    RowRule {
        row: 3,
        target: 12,
        leading: "⇧",
        trailing: Some("⇧"),
    },
];

/// A row after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledRow {
    /// Labels at their physical length
    pub keys: Vec<String>,
    /// Blank cells added because the source supplied too few keys
    pub padding: usize,
}

/// Builds one grid per shift layer, in [`ShiftLayer::ALL`] order.
///
/// # Errors
///
/// Returns [`KlcError::RowOverflow`] when a row collects more keys than fit
/// between its edge labels.
pub fn build_grids(records: &[NormalizedRecord]) -> KlcResult<Vec<GridLayout>> {
    let mut collected = collect_rows(records);

    let mut grids = Vec::with_capacity(ShiftLayer::COUNT);
    for layer in ShiftLayer::ALL {
        let raw_rows = std::mem::take(&mut collected[layer.index()]);
        let mut rows = Vec::with_capacity(MODIFIER_ROW + 1);

        for (rule, keys) in ROW_RULES.iter().zip(raw_rows) {
            let reconciled = reconcile_row(layer.index(), rule, keys)?;
            if reconciled.padding > 0 && layer == ShiftLayer::Base {
                warn!(
                    "Row {} is missing {} key(s); padded with blanks at the end, \
                     keys after a gap in the source may be shifted left",
                    rule.row, reconciled.padding
                );
            }
            rows.push(reconciled.keys);
        }

        rows.push(template_row(MODIFIER_ROW));
        grids.push(GridLayout::new(layer, rows));
    }

    Ok(grids)
}

/// Builds the grid for a single shift layer.
pub fn build_grid(records: &[NormalizedRecord], layer: ShiftLayer) -> KlcResult<GridLayout> {
    let mut grids = build_grids(records)?;
    Ok(grids.swap_remove(layer.index()))
}

/// Fits collected keys to a row's physical length.
///
/// - exactly `target` keys: kept as they are
/// - up to `capacity` keys: leading label, keys, blank padding, trailing label
/// - more than `capacity` keys: [`KlcError::RowOverflow`]
///
/// Padding is positional: a key missing from the middle of a row shifts the
/// keys after it left rather than leaving a hole in place.
pub fn reconcile_row(layer: usize, rule: &RowRule, keys: Vec<String>) -> KlcResult<ReconciledRow> {
    let actual = keys.len();
    if actual == rule.target {
        return Ok(ReconciledRow { keys, padding: 0 });
    }

    let capacity = rule.capacity();
    if actual > capacity {
        return Err(KlcError::RowOverflow {
            layer,
            row: rule.row,
            capacity,
            actual,
        });
    }

    let padding = capacity - actual;
    let mut row = Vec::with_capacity(rule.target);
    row.push(rule.leading.to_string());
    row.extend(keys);
    row.extend(std::iter::repeat_n(String::new(), padding));
    if let Some(trailing) = rule.trailing {
        row.push(trailing.to_string());
    }

    Ok(ReconciledRow { keys: row, padding })
}

/// Scans records in order and collects per-layer labels for rows 0-3.
fn collect_rows(records: &[NormalizedRecord]) -> Vec<Vec<Vec<String>>> {
    let mut collected = vec![vec![Vec::new(); ALPHANUMERIC_ROWS]; ShiftLayer::COUNT];
    let mut current_row: Option<usize> = None;
    let mut displaced: Option<&NormalizedRecord> = None;

    for record in records {
        let code = record.scan_code.as_str();

        if code.eq_ignore_ascii_case(GRID_END_SCAN_CODE) {
            break;
        }
        if let Some(row) = sentinel_row(code) {
            current_row = Some(row);
        }
        if code.eq_ignore_ascii_case(DISPLACED_SCAN_CODE) {
            displaced = Some(record);
            continue;
        }
        if code.eq_ignore_ascii_case(IGNORED_SCAN_CODE) {
            continue;
        }

        let Some(row) = current_row else {
            debug!("Skipping {code}: no grid row selected yet");
            continue;
        };
        push_labels(&mut collected, row, record);
    }

    match displaced {
        Some(record) => push_labels(&mut collected, DISPLACED_ROW, record),
        None => debug!("No {DISPLACED_SCAN_CODE} record; row {DISPLACED_ROW} keeps its template edge"),
    }

    collected
}

fn push_labels(collected: &mut [Vec<Vec<String>>], row: usize, record: &NormalizedRecord) {
    for layer in ShiftLayer::ALL {
        collected[layer.index()][row].push(record.layer_label(layer.index()));
    }
}

fn sentinel_row(scan_code: &str) -> Option<usize> {
    ROW_SENTINELS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(scan_code))
        .map(|(_, row)| *row)
}
