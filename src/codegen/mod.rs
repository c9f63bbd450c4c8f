//! C++ header generation
//!
//! Emits the world configuration header, the level index and one header
//! per level. Text is built in memory and handed to [`OutputWriter`].

mod level_header;
mod level_index;
mod world_config;

pub use level_header::*;
pub use level_index::*;
pub use world_config::*;

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PipelineError, Result};

/// Outcome of writing one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// Existing file already had this content
    Unchanged,
}

/// Writes generated files, leaving identical files untouched so the game's
/// incremental build does not recompile everything on every run.
#[derive(Debug, Default)]
pub struct OutputWriter {
    written: usize,
    unchanged: usize,
}

impl OutputWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `data` to `path`, creating parent directories as needed
    pub fn write(&mut self, path: &Path, data: &[u8]) -> Result<WriteStatus> {
        if let Ok(existing) = fs::read(path) {
            if existing == data {
                debug!(path = %path.display(), "unchanged");
                self.unchanged += 1;
                return Ok(WriteStatus::Unchanged);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        fs::write(path, data).map_err(|e| PipelineError::io(path, e))?;

        debug!(path = %path.display(), bytes = data.len(), "written");
        self.written += 1;
        Ok(WriteStatus::Written)
    }

    pub fn write_str(&mut self, path: &Path, text: &str) -> Result<WriteStatus> {
        self.write(path, text.as_bytes())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn unchanged(&self) -> usize {
        self.unchanged
    }
}

/// Path of the generated header for a level
pub fn level_header_path(include_dir: &Path, level_id: usize) -> PathBuf {
    include_dir.join(format!("levels/level_{}.h", level_id))
}

/// `{a, b, c}` initializer list
pub fn brace_list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("{{{}}}", items.join(", "))
}

/// Quote and escape text as a C string literal
pub fn c_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Reject names that cannot be emitted as C++ identifiers
pub fn check_identifier(context: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(PipelineError::schema(
            context,
            format!("{:?} is not a valid C++ identifier", name),
        ));
    }
    Ok(())
}
