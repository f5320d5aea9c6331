//! CLI command handlers for klcmap.
//!
//! Each subcommand is an `Args` struct with an `execute` method returning
//! [`CliResult`]; `main` maps the error to a process exit code.

pub mod common;
pub mod config;
pub mod convert;
pub mod extract;
pub mod grid;
pub mod render;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
pub use extract::ExtractArgs;
pub use grid::GridArgs;
pub use render::RenderArgs;
