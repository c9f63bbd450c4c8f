//! Pipeline configuration
//!
//! Defaults reproduce the layout the game build expects. A RON file can
//! override any subset of fields; CLI flags are applied on top by `main`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::background::PaletteDepth;
use crate::error::{PipelineError, Result};

/// Size of the world lookup canvas, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl CanvasSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

/// All tunables of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// LDtk project file
    pub input: PathBuf,
    /// Root that `include/` and `graphics/` are written under
    pub out_dir: PathBuf,
    /// World lookup canvas
    pub canvas: CanvasSize,
    /// Value of world cells no level owns
    pub sentinel: i32,
    /// Added to every level's world pixel origin so negative editor
    /// coordinates land inside the canvas. Must be a multiple of 256.
    pub world_offset: i64,
    /// Capacity of `bn::string` used for string field values
    pub string_metadata_max_size: usize,
    /// Capacity of `bn::string` used for field keys
    pub field_key_max_size: usize,
    /// Identifier of the IntGrid layer holding tile classes
    pub int_grid_layer: String,
    /// Directory of per-level PNGs, relative to the LDtk file
    pub level_png_dir: PathBuf,
    /// Palette size of converted backgrounds
    pub palette_depth: PaletteDepth,
    /// C++ namespace wrapping all generated declarations
    pub namespace: String,
    /// Prefix of generated include guards
    pub guard_prefix: String,
    /// Skip background conversion
    pub skip_images: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            out_dir: PathBuf::from("."),
            canvas: CanvasSize::default(),
            sentinel: -1,
            world_offset: 0,
            string_metadata_max_size: 45,
            field_key_max_size: 10,
            int_grid_layer: "IntGrid".to_string(),
            level_png_dir: PathBuf::from("levels/png"),
            palette_depth: PaletteDepth::default(),
            namespace: "cd".to_string(),
            guard_prefix: "COLLIE_DEFENCE_GBA".to_string(),
            skip_images: false,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a RON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_ron(&contents).map_err(|message| PipelineError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_ron(contents: &str) -> std::result::Result<Self, String> {
        let config: PipelineConfig =
            ron::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the generated code relies on
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(format!(
                "canvas must not be empty ({}x{})",
                self.canvas.width, self.canvas.height
            ));
        }
        if self.sentinel >= 0 {
            return Err(format!(
                "sentinel {} must be negative, level ids start at 0",
                self.sentinel
            ));
        }
        if self.world_offset % 256 != 0 {
            return Err(format!(
                "world_offset {} is not a multiple of 256",
                self.world_offset
            ));
        }
        if self.string_metadata_max_size == 0 || self.field_key_max_size == 0 {
            return Err("string capacities must be non-zero".to_string());
        }
        if self.namespace.is_empty() {
            return Err("namespace must not be empty".to_string());
        }
        Ok(())
    }

    /// Directory the LDtk file lives in; side files are resolved from here
    pub fn project_dir(&self) -> PathBuf {
        self.input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn include_dir(&self) -> PathBuf {
        self.out_dir.join("include/generated")
    }

    pub fn level_include_dir(&self) -> PathBuf {
        self.include_dir().join("levels")
    }

    pub fn graphics_dir(&self) -> PathBuf {
        self.out_dir.join("graphics/generated/levels")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.canvas, CanvasSize::new(100, 100));
        assert_eq!(config.canvas.cell_count(), 10_000);
        assert_eq!(config.sentinel, -1);
        assert_eq!(config.string_metadata_max_size, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = PipelineConfig::from_ron(
            "(canvas: (width: 64, height: 32), namespace: \"game\")",
        )
        .unwrap();
        assert_eq!(config.canvas, CanvasSize::new(64, 32));
        assert_eq!(config.namespace, "game");
        assert_eq!(config.sentinel, -1);
        assert_eq!(config.int_grid_layer, "IntGrid");
    }

    #[test]
    fn test_offset_must_be_multiple_of_256() {
        let err = PipelineConfig::from_ron("(world_offset: 100)").unwrap_err();
        assert!(err.contains("256"));
        assert!(PipelineConfig::from_ron("(world_offset: 512)").is_ok());
    }

    #[test]
    fn test_sentinel_must_not_be_a_level_id() {
        for sentinel in [0, 1, 255] {
            let config = PipelineConfig {
                sentinel,
                ..Default::default()
            };
            assert!(config.validate().unwrap_err().contains("sentinel"));
        }
        assert!(PipelineConfig::from_ron("(sentinel: 0)").is_err());
        assert!(PipelineConfig::from_ron("(sentinel: -255)").is_ok());
    }

    #[test]
    fn test_load_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not valid ron data").unwrap();

        let result = PipelineConfig::load(temp_file.path());
        assert!(matches!(result, Err(PipelineError::Config { .. })));
    }

    #[test]
    fn test_paths_follow_out_dir() {
        let config = PipelineConfig {
            input: PathBuf::from("assets/world.ldtk"),
            out_dir: PathBuf::from("build"),
            ..Default::default()
        };
        assert_eq!(config.project_dir(), PathBuf::from("assets"));
        assert_eq!(config.level_include_dir(), PathBuf::from("build/include/generated/levels"));
        assert_eq!(config.graphics_dir(), PathBuf::from("build/graphics/generated/levels"));
    }
}
