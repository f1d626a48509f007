//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod params;
pub mod presets;
pub mod process;
