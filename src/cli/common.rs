//! Shared CLI plumbing: exit codes and the command error type.

use crate::config::Config;
use crate::error::KlcError;
use crate::models::ShiftLayer;
use std::fmt;
use std::path::Path;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad source, bad arguments, bad config)
    ValidationError = 1,
    /// Reading or writing a file failed
    IoError = 2,
    /// A rendering asset such as the font is missing
    AssetError = 3,
}

impl ExitCode {
    /// Numeric value handed to the OS.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Missing or unusable asset (exit 3).
    pub fn asset(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::AssetError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<KlcError> for CliError {
    fn from(err: KlcError) -> Self {
        let message = err.to_string();
        match err {
            KlcError::NotFound { .. } | KlcError::Io { .. } => Self::io(message),
            KlcError::Asset { .. } => Self::asset(message),
            KlcError::Decode { .. }
            | KlcError::MalformedField { .. }
            | KlcError::DuplicateScanCode { .. }
            | KlcError::MissingKeyBlock { .. }
            | KlcError::RowOverflow { .. }
            | KlcError::Render(_) => Self::validation(message),
        }
    }
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Resolves a `--layer` argument.
pub fn parse_layer(index: usize) -> CliResult<ShiftLayer> {
    ShiftLayer::from_index(index).ok_or_else(|| {
        CliError::validation(format!(
            "Layer {index} does not exist (valid layers: 0-{})",
            ShiftLayer::COUNT - 1
        ))
    })
}

/// Loads the configuration from `--config`, or the platform file otherwise.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    Config::load_or_default(path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}
