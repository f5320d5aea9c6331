//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::CONFIG_DIR_NAME;
use crate::export::RenderConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Where generated files go (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
///
/// Every section is optional in the file; missing keys fall back to defaults,
/// so a config only needs to list what it changes:
///
/// ```toml
/// [paths]
/// output_dir = "out"
///
/// [render]
/// font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
/// font_index = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Diagram drawing parameters
    pub render: RenderConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/klcmap/`
    /// - macOS: `~/Library/Application Support/klcmap/`
    /// - Windows: `%APPDATA%\klcmap\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path, or the platform file when
    /// `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = self.to_toml()?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - canvas dimensions are non-zero
    /// - sizes, unit and key height are positive
    /// - gaps and origin are not negative
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;

        if render.canvas_width == 0 || render.canvas_height == 0 {
            anyhow::bail!(
                "Canvas size must be non-zero, got {}x{}",
                render.canvas_width,
                render.canvas_height
            );
        }

        for (name, value) in [
            ("font_size", render.font_size),
            ("modifier_font_size", render.modifier_font_size),
            ("base_unit", render.base_unit),
            ("key_height", render.key_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                anyhow::bail!("render.{name} must be a positive number, got {value}");
            }
        }

        for (name, value) in [
            ("origin_x", render.origin_x),
            ("origin_y", render.origin_y),
            ("column_gap", render.column_gap),
            ("row_gap", render.row_gap),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                anyhow::bail!("render.{name} must not be negative, got {value}");
            }
        }

        Ok(())
    }

    /// Output directory, preferring an explicit override.
    pub fn output_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.paths.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
