//! Service layer for business logic.
//!
//! This module contains services that encapsulate the layout transformations
//! and coordinate the parser, grid and export stages.

pub mod grid;
pub mod pipeline;

// Re-export commonly used types and functions
pub use grid::{build_grid, build_grids};
pub use pipeline::{convert, ConversionReport, ConvertOptions};
