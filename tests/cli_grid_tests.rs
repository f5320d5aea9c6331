//! End-to-end tests for `klcmap grid` command.

use std::process::Command;

mod fixtures;
use fixtures::*;

fn grid_json(fixture: &KlcFixture, extra: &[&str]) -> serde_json::Value {
    let (klc, _temp_dir) = create_temp_klc(fixture);

    let output = Command::new(klcmap_bin())
        .args(["grid", klc.to_str().unwrap(), "--json"])
        .args(extra)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
}

fn row(grid: &serde_json::Value, index: usize) -> Vec<String> {
    grid["rows"][index]
        .as_array()
        .expect("row should be an array")
        .iter()
        .map(|cell| cell.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_grid_base_layer_matches_physical_template() {
    let grid = grid_json(&KlcFixture::us(), &["--layer", "0"]);

    assert_eq!(grid["layer"], "Base");
    assert_eq!(
        row(&grid, 0),
        ["~", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "←"]
    );
    assert_eq!(
        row(&grid, 1),
        ["↹", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\"]
    );
    assert_eq!(
        row(&grid, 2),
        ["⇪", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "↵"]
    );
    assert_eq!(
        row(&grid, 3),
        ["⇧", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "⇧"]
    );
    assert_eq!(
        row(&grid, 4),
        ["ctrl", "fn", "⊞", "alt", " ", "alt", "⊟", "ctrl"]
    );
}

#[test]
fn test_grid_shift_layer() {
    let grid = grid_json(&KlcFixture::us(), &["--layer", "1"]);
    assert_eq!(grid["layer"], "Shift");

    let digits = row(&grid, 0);
    assert_eq!(digits[0], "~");
    assert_eq!(digits[1], "!");
    assert_eq!(digits[13], "←");
    assert_eq!(row(&grid, 1)[13], "|");
}

#[test]
fn test_grid_unmapped_values_are_blank() {
    let grid = grid_json(&KlcFixture::us(), &["--layer", "4"]);
    let top = row(&grid, 1);
    assert_eq!(top[1], "@");
    assert_eq!(top[2], "");
    assert_eq!(top[3], "€");
    assert!(!top.iter().any(|cell| cell == "--"));
}

#[test]
fn test_grid_all_layers_have_physical_shape() {
    let grids = grid_json(&KlcFixture::us(), &[]);
    let grids = grids.as_array().expect("all layers should be an array");
    assert_eq!(grids.len(), 6);

    for grid in grids {
        let lengths: Vec<usize> = (0..5).map(|r| row(grid, r).len()).collect();
        assert_eq!(lengths, [14, 14, 13, 12, 8]);
    }
}

#[test]
fn test_grid_missing_key_pads_row_end() {
    let grid = grid_json(&KlcFixture::us().without("0d"), &["--layer", "0"]);
    let digits = row(&grid, 0);
    assert_eq!(digits.len(), 14);
    assert_eq!(digits[11], "-");
    assert_eq!(digits[12], "");
    assert_eq!(digits[13], "←");
}

#[test]
fn test_grid_text_output() {
    let (klc, _temp_dir) = create_temp_klc(&KlcFixture::us());

    let output = Command::new(klcmap_bin())
        .args(["grid", klc.to_str().unwrap(), "--layer", "0"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Layer 0 (none)");
    assert_eq!(lines[1], "~\t1\t2\t3\t4\t5\t6\t7\t8\t9\t0\t-\t=\t←");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_grid_invalid_layer() {
    let (klc, _temp_dir) = create_temp_klc(&KlcFixture::us());

    let output = Command::new(klcmap_bin())
        .args(["grid", klc.to_str().unwrap(), "--layer", "6"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Layer 6 does not exist"));
}
