//! Keyboard diagram renderer.
//!
//! Each grid is composed as an SVG document (one outlined rectangle and one
//! centered label per key) and rasterized to PNG with resvg. Composition is a
//! pure function of the grid, the style tables and the [`RenderConfig`], so the
//! SVG can be inspected in tests without a font.

use crate::error::{KlcError, KlcResult};
use crate::models::{GridLayout, KeyClass, KeyStyle, RgbColor, MODIFIER_ROW};
use crate::parser::layout_ini::atomic_write;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Drawing parameters for one diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Canvas fill behind the keys
    pub background: RgbColor,
    /// Font file used for labels (.ttf, .otf or a .ttc collection)
    pub font: PathBuf,
    /// Face index inside a font collection
    pub font_index: u32,
    /// Label size for rows 0-3
    pub font_size: f32,
    /// Label size for the modifier row
    pub modifier_font_size: f32,
    /// Width of a 1u key in pixels
    pub base_unit: f32,
    /// Height of every key in pixels
    pub key_height: f32,
    /// Top-left corner of the first key
    pub origin_x: f32,
    /// Top-left corner of the first key
    pub origin_y: f32,
    /// Horizontal gap between keys
    pub column_gap: f32,
    /// Vertical gap between rows
    pub row_gap: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 535,
            canvas_height: 200,
            background: RgbColor::new(0x27, 0x48, 0x29),
            font: PathBuf::from("cambria.ttc"),
            font_index: 1,
            font_size: 23.0,
            modifier_font_size: 15.0,
            base_unit: 30.0,
            key_height: 32.0,
            origin_x: 10.0,
            origin_y: 10.0,
            column_gap: 5.0,
            row_gap: 5.0,
        }
    }
}

impl RenderConfig {
    /// Locates the configured font file.
    ///
    /// Relative paths are tried against the working directory first, then
    /// against the user font directory.
    pub fn resolve_font(&self) -> Option<PathBuf> {
        if self.font.is_file() {
            return Some(self.font.clone());
        }
        if self.font.is_absolute() {
            return None;
        }
        dirs::font_dir()
            .map(|dir| dir.join(&self.font))
            .filter(|path| path.is_file())
    }
}

/// Label font loaded into a resvg font database.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    /// Family name to reference from the SVG
    pub family: String,
    /// Database holding the font's faces
    pub database: Arc<usvg::fontdb::Database>,
}

/// Loads the configured label font.
///
/// # Errors
///
/// Returns [`KlcError::Asset`] when the file is missing, unreadable, or has no
/// usable face at `font_index`.
pub fn load_font(config: &RenderConfig) -> KlcResult<LoadedFont> {
    let asset_error = |reason: String| KlcError::Asset {
        path: config.font.clone(),
        reason,
    };

    let path = config
        .resolve_font()
        .ok_or_else(|| asset_error("file not found".to_string()))?;

    let mut database = usvg::fontdb::Database::new();
    database
        .load_font_file(&path)
        .map_err(|e| asset_error(e.to_string()))?;

    let family = database
        .faces()
        .find(|face| face.index == config.font_index)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| asset_error(format!("no usable face at index {}", config.font_index)))?;

    debug!("Loaded font family '{}' from {}", family, path.display());
    Ok(LoadedFont {
        family,
        database: Arc::new(database),
    })
}

/// One positioned key in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Label text (may be empty)
    pub label: String,
    /// Background color
    pub fill: RgbColor,
    /// Label color
    pub text_color: RgbColor,
    /// Label size
    pub font_size: f32,
}

impl KeyBox {
    /// Horizontal center of the key.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the key.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Lays out every key of a grid, in row-major order.
///
/// `layer` selects the active modifier set that turns held modifiers into
/// [`KeyClass::Selected`].
pub fn layout_keys(
    grid: &GridLayout,
    layer: usize,
    style: &KeyStyle,
    config: &RenderConfig,
) -> Vec<KeyBox> {
    let last_row = grid.rows.len().saturating_sub(1).max(MODIFIER_ROW);
    let mut keys = Vec::new();
    let mut y = config.origin_y;

    for (row, labels) in grid.rows.iter().enumerate() {
        let mut x = config.origin_x;
        let font_size = if row == MODIFIER_ROW {
            config.modifier_font_size
        } else {
            config.font_size
        };

        for (col, label) in labels.iter().enumerate() {
            let coord = (row, col);
            let width = style.width_multiplier(coord) * config.base_unit;
            let fill = style.color(style.fill_class(coord, last_row, label, layer));
            let text_color = if style.locators.contains(&coord) {
                style.color(KeyClass::Highlight)
            } else {
                RgbColor::BLACK
            };

            keys.push(KeyBox {
                x,
                y,
                width,
                height: config.key_height,
                label: label.clone(),
                fill,
                text_color,
                font_size,
            });
            x += width + config.column_gap;
        }

        y += config.key_height + config.row_gap;
    }

    keys
}

/// Composes the SVG document for one grid.
pub fn render_svg(
    grid: &GridLayout,
    layer: usize,
    style: &KeyStyle,
    config: &RenderConfig,
    font_family: &str,
) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.canvas_width,
        h = config.canvas_height,
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        config.canvas_width, config.canvas_height, config.background
    );

    for key in layout_keys(grid, layer, style, config) {
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="1"/>"#,
            key.x,
            key.y,
            key.width,
            key.height,
            key.fill,
            RgbColor::BLACK
        );

        if key.label.trim().is_empty() {
            continue;
        }
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            key.center_x(),
            key.center_y(),
            escape_xml(font_family),
            key.font_size,
            key.text_color,
            escape_xml(&key.label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterizes a grid and writes it as PNG.
///
/// The font is loaded before anything is drawn, so a missing asset never
/// leaves a partial image behind.
///
/// # Errors
///
/// - [`KlcError::Asset`] when the font cannot be loaded
/// - [`KlcError::Render`] when the SVG cannot be rasterized
/// - [`KlcError::Io`] when the PNG cannot be written
pub fn render_layer_png(
    grid: &GridLayout,
    layer: usize,
    style: &KeyStyle,
    config: &RenderConfig,
    out_path: &Path,
) -> KlcResult<()> {
    let font = load_font(config)?;
    render_layer_png_with(grid, layer, style, config, &font, out_path)
}

/// Like [`render_layer_png`], reusing an already loaded font.
pub fn render_layer_png_with(
    grid: &GridLayout,
    layer: usize,
    style: &KeyStyle,
    config: &RenderConfig,
    font: &LoadedFont,
    out_path: &Path,
) -> KlcResult<()> {
    let svg = render_svg(grid, layer, style, config, &font.family);
    let png = rasterize(&svg, config, font)?;
    atomic_write(out_path, &png)?;
    debug!("Wrote diagram for layer {} to {}", layer, out_path.display());
    Ok(())
}

fn rasterize(svg: &str, config: &RenderConfig, font: &LoadedFont) -> KlcResult<Vec<u8>> {
    let options = usvg::Options {
        font_family: font.family.clone(),
        fontdb: Arc::clone(&font.database),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| KlcError::Render(format!("invalid SVG: {e}")))?;

    let mut pixmap = Pixmap::new(config.canvas_width, config.canvas_height).ok_or_else(|| {
        KlcError::Render(format!(
            "cannot allocate {}x{} canvas",
            config.canvas_width, config.canvas_height
        ))
    })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| KlcError::Render(format!("PNG encoding failed: {e}")))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
