//! Pipeline driver
//!
//! One straight pass: bind the project, derive levels and the world grid,
//! then emit headers and backgrounds. The project is loaded once and only
//! borrowed afterwards.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::background::convert_background;
use crate::codegen::{
    level_header_path, render_level_header, render_level_index, render_world_config, OutputWriter,
};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ldtk::{load_project, LdtkProject};
use crate::world::{parse_levels, CellSize, Definitions, ParsedLevel, Placement, WorldGrid};

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub levels: usize,
    pub entities: usize,
    /// World cells owned by some level
    pub owned_cells: usize,
    pub files_written: usize,
    pub files_unchanged: usize,
}

/// Everything derived from the project before anything is written
#[derive(Debug, Clone)]
pub struct WorldModel {
    pub definitions: Definitions,
    pub cell: CellSize,
    pub levels: Vec<ParsedLevel>,
    pub grid: WorldGrid,
}

impl WorldModel {
    pub fn derive(project: &LdtkProject, config: &PipelineConfig) -> Result<Self> {
        let definitions = Definitions::from_defs(&project.defs);
        let cell = CellSize::from_project(project)?;
        let levels = parse_levels(project, config)?;

        let placements: Vec<Placement> = levels.iter().map(ParsedLevel::placement).collect();
        let grid = WorldGrid::build(config.canvas, config.sentinel, &placements)?;
        info!(
            width = config.canvas.width,
            height = config.canvas.height,
            owned = grid.owned_count(),
            "built world grid"
        );

        Ok(Self {
            definitions,
            cell,
            levels,
            grid,
        })
    }
}

/// Load the configured project and generate every output
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let project = load_project(&config.input)?;
    generate(&project, config)
}

/// Generate every output from an already loaded project
pub fn generate(project: &LdtkProject, config: &PipelineConfig) -> Result<PipelineSummary> {
    let model = WorldModel::derive(project, config)?;
    let mut writer = OutputWriter::new();
    let include_dir = config.include_dir();

    let world_config = render_world_config(&model.definitions, &model.grid, model.cell, config)?;
    writer.write_str(&include_dir.join("world_config.h"), &world_config)?;

    let index = render_level_index(&model.levels, config);
    writer.write_str(&include_dir.join("levels_intgrid.h"), &index)?;

    if config.skip_images {
        info!("skipping background conversion");
    } else {
        convert_backgrounds(&model.levels, config, &mut writer)?;
    }

    for level in &model.levels {
        let header = render_level_header(level, &model.definitions, config)?;
        writer.write_str(&level_header_path(&include_dir, level.id), &header)?;
    }

    let summary = PipelineSummary {
        levels: model.levels.len(),
        entities: model.levels.iter().map(|l| l.entities.len()).sum(),
        owned_cells: model.grid.owned_count(),
        files_written: writer.written(),
        files_unchanged: writer.unchanged(),
    };
    info!(
        levels = summary.levels,
        entities = summary.entities,
        written = summary.files_written,
        unchanged = summary.files_unchanged,
        "generation complete"
    );
    Ok(summary)
}

fn convert_backgrounds(
    levels: &[ParsedLevel],
    config: &PipelineConfig,
    writer: &mut OutputWriter,
) -> Result<()> {
    let png_dir = config.project_dir().join(&config.level_png_dir);
    let dest_dir = config.graphics_dir();

    let pb = ProgressBar::new(levels.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Converting backgrounds [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    for level in levels {
        let source = png_dir.join(format!("{}.png", level.identifier));
        pb.set_message(level.identifier.clone());
        let converted =
            convert_background(&source, &dest_dir, &level.asset_id(), config.palette_depth, writer);
        if let Err(e) = converted {
            pb.abandon_with_message(format!("failed on {}", level.identifier));
            return Err(e);
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Converted {} backgrounds", levels.len()));
    Ok(())
}
