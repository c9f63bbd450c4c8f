//! Pipeline error type
//!
//! Every failure carries the level, entity or file it came from so a broken
//! export can be fixed in the editor without rerunning under a debugger.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for the level pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input document or side file is missing
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Document does not match what the pipeline expects
    #[error("schema mismatch in {context}: {message}")]
    SchemaMismatch { context: String, message: String },

    /// A fixed-capacity slot in the generated code would overflow
    #[error("{owner}: {what} is {len}, budget is {max}")]
    SizeBudgetExceeded {
        owner: String,
        what: String,
        len: usize,
        max: usize,
    },

    /// Level footprint does not fit inside the world canvas
    #[error(
        "level {level} at cell ({x}, {y}) size {width}x{height} is outside the {canvas_width}x{canvas_height} world canvas"
    )]
    OutOfBounds {
        level: String,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        canvas_width: usize,
        canvas_height: usize,
    },

    /// Pixel value is not a whole number of grid cells
    #[error("level {level}: {what} = {value}px is not a multiple of the {cell}px cell size")]
    Misaligned {
        level: String,
        what: &'static str,
        value: i64,
        cell: i64,
    },

    /// Image decode or encode failure
    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid pipeline configuration file
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PipelineError {
    pub fn schema(context: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Map an I/O error, turning `NotFound` into [`PipelineError::InputNotFound`]
    pub fn io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        let path = path.into();
        match e.kind() {
            std::io::ErrorKind::NotFound => PipelineError::InputNotFound { path },
            _ => PipelineError::Io { path, source: e },
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
