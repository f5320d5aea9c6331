//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the klcmap binary
pub fn klcmap_bin() -> &'static str {
    env!("CARGO_BIN_EXE_klcmap")
}

/// Physical keys of a US layout in KLC stream order: scan code, VK, base, shifted.
const US_KEYS: &[(&str, &str, char, char)] = &[
    ("02", "1", '1', '!'),
    ("03", "2", '2', '@'),
    ("04", "3", '3', '#'),
    ("05", "4", '4', '$'),
    ("06", "5", '5', '%'),
    ("07", "6", '6', '^'),
    ("08", "7", '7', '&'),
    ("09", "8", '8', '*'),
    ("0a", "9", '9', '('),
    ("0b", "0", '0', ')'),
    ("0c", "OEM_MINUS", '-', '_'),
    ("0d", "OEM_PLUS", '=', '+'),
    ("10", "Q", 'q', 'Q'),
    ("11", "W", 'w', 'W'),
    ("12", "E", 'e', 'E'),
    ("13", "R", 'r', 'R'),
    ("14", "T", 't', 'T'),
    ("15", "Y", 'y', 'Y'),
    ("16", "U", 'u', 'U'),
    ("17", "I", 'i', 'I'),
    ("18", "O", 'o', 'O'),
    ("19", "P", 'p', 'P'),
    ("1a", "OEM_4", '[', '{'),
    ("1b", "OEM_6", ']', '}'),
    ("1e", "A", 'a', 'A'),
    ("1f", "S", 's', 'S'),
    ("20", "D", 'd', 'D'),
    ("21", "F", 'f', 'F'),
    ("22", "G", 'g', 'G'),
    ("23", "H", 'h', 'H'),
    ("24", "J", 'j', 'J'),
    ("25", "K", 'k', 'K'),
    ("26", "L", 'l', 'L'),
    ("27", "OEM_1", ';', ':'),
    ("28", "OEM_7", '\'', '"'),
    ("29", "OEM_3", '`', '~'),
    ("2b", "OEM_5", '\\', '|'),
    ("2c", "Z", 'z', 'Z'),
    ("2d", "X", 'x', 'X'),
    ("2e", "C", 'c', 'C'),
    ("2f", "V", 'v', 'V'),
    ("30", "B", 'b', 'B'),
    ("31", "N", 'n', 'N'),
    ("32", "M", 'm', 'M'),
    ("33", "OEM_COMMA", ',', '<'),
    ("34", "OEM_PERIOD", '.', '>'),
    ("35", "OEM_2", '/', '?'),
    ("39", "SPACE", ' ', ' '),
    ("53", "DECIMAL", '.', '.'),
];

/// Number of key rows in [`KlcFixture::us`].
pub const US_RECORD_COUNT: usize = 49;

/// One key row of the fixture.
#[derive(Debug, Clone)]
pub struct KeyLine {
    /// Raw scan code field, e.g. "1e"
    pub scan_code: String,
    /// Virtual key field
    pub virtual_key: String,
    /// Caps state field
    pub cap: String,
    /// Six shift-state fields
    pub values: Vec<String>,
}

impl KeyLine {
    fn to_line(&self) -> String {
        format!(
            "{}\t{}\t\t{}\t{}\t\t// {}",
            self.scan_code,
            self.virtual_key,
            self.cap,
            self.values.join("\t"),
            self.virtual_key
        )
    }
}

/// Builder for synthetic KLC sources.
#[derive(Debug, Clone)]
pub struct KlcFixture {
    /// Key rows in output order
    pub keys: Vec<KeyLine>,
}

fn hex(c: char) -> String {
    format!("{:04x}", c as u32)
}

impl KlcFixture {
    /// A US layout with a few AltGr characters.
    pub fn us() -> Self {
        let keys = US_KEYS
            .iter()
            .map(|(sc, vk, base, shifted)| {
                let cap = if base.is_ascii_alphabetic() { "1" } else { "0" };
                let altgr = match *sc {
                    "12" => "20ac".to_string(),
                    "10" => "0040@".to_string(),
                    _ => "-1".to_string(),
                };
                KeyLine {
                    scan_code: (*sc).to_string(),
                    virtual_key: (*vk).to_string(),
                    cap: cap.to_string(),
                    values: vec![
                        hex(*base),
                        hex(*shifted),
                        "-1".to_string(),
                        "-1".to_string(),
                        altgr,
                        "-1".to_string(),
                    ],
                }
            })
            .collect();
        Self { keys }
    }

    /// Replaces the base and shifted characters of a key.
    pub fn remap(mut self, scan_code: &str, base: char, shifted: char) -> Self {
        if let Some(key) = self.key_mut(scan_code) {
            key.values[0] = hex(base);
            key.values[1] = hex(shifted);
        }
        self
    }

    /// Replaces one raw shift-state field (0-5) of a key.
    pub fn set_value(mut self, scan_code: &str, layer: usize, raw: &str) -> Self {
        if let Some(key) = self.key_mut(scan_code) {
            key.values[layer] = raw.to_string();
        }
        self
    }

    /// Removes a key row.
    pub fn without(mut self, scan_code: &str) -> Self {
        self.keys.retain(|k| k.scan_code != scan_code);
        self
    }

    /// Inserts a key row right after another one.
    pub fn insert_after(mut self, after: &str, scan_code: &str, base: char, shifted: char) -> Self {
        let line = KeyLine {
            scan_code: scan_code.to_string(),
            virtual_key: "EXTRA".to_string(),
            cap: "0".to_string(),
            values: vec![hex(base), hex(shifted), "-1".into(), "-1".into(), "-1".into(), "-1".into()],
        };
        let idx = self
            .keys
            .iter()
            .position(|k| k.scan_code == after)
            .map_or(self.keys.len(), |i| i + 1);
        self.keys.insert(idx, line);
        self
    }

    fn key_mut(&mut self, scan_code: &str) -> Option<&mut KeyLine> {
        self.keys.iter_mut().find(|k| k.scan_code == scan_code)
    }

    /// Full KLC text with header, shift states, key block and trailer.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            "KBD\tUSTEST\t\"Test US Layout\"".to_string(),
            String::new(),
            "COPYRIGHT\t\"(c) klcmap tests\"".to_string(),
            String::new(),
            "SHIFTSTATE".to_string(),
            String::new(),
            "0\t//Column 4".to_string(),
            "1\t//Column 5 : Shft".to_string(),
            "2\t//Column 6 :       Ctrl".to_string(),
            "3\t//Column 7 : Shft  Ctrl".to_string(),
            "6\t//Column 8 :       Ctrl Alt".to_string(),
            "7\t//Column 9 : Shft  Ctrl Alt".to_string(),
            String::new(),
            "LAYOUT\t\t;an extra '@' at the end is a dead key".to_string(),
            String::new(),
            "//SC\tVK_\t\tCap\t0\t1\t2\t3\t6\t7".to_string(),
            "//--\t----\t\t----\t----\t----\t----\t----\t----\t----".to_string(),
            String::new(),
        ];
        lines.extend(self.keys.iter().map(KeyLine::to_line));
        lines.extend([
            "56\tOEM_102\t\t0\t005c\t007c\t-1\t-1\t-1\t-1".to_string(),
            String::new(),
            "KEYNAME".to_string(),
            String::new(),
            "01\tEsc".to_string(),
            String::new(),
            "ENDKBD".to_string(),
        ]);

        let mut text = lines.join("\r\n");
        text.push_str("\r\n");
        text
    }

    /// Writes the source as UTF-16LE with a byte-order mark.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("layout.klc");
        fs::write(&path, utf16le_with_bom(&self.to_text())).expect("Failed to write KLC fixture");
        path
    }
}

/// Encodes text the way the layout tool saves it.
pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Writes a fixture into a fresh temp directory.
pub fn create_temp_klc(fixture: &KlcFixture) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = fixture.write_to(temp_dir.path());
    (path, temp_dir)
}

/// Config path inside a temp directory, isolating tests from the user config.
pub fn isolated_config(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("config.toml")
}

/// A system font usable for raster tests, if the machine has one.
pub fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|path| path.is_file())
}
