//! levelgen: LDtk level exports → GBA world and level headers
//!
//! The binary in `main.rs` is a thin CLI over [`pipeline::run`]. The
//! transforms are exposed so build scripts can drive them directly.

pub mod background;
pub mod codegen;
pub mod config;
pub mod error;
pub mod ldtk;
pub mod pipeline;
pub mod world;

#[cfg(test)]
mod fixtures;

pub use config::{CanvasSize, PipelineConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{run, PipelineSummary};
