//! Level derivation
//!
//! Turns editor levels into fixed-size records: stable ids by input order,
//! world origin and footprint in grid cells, tile classes and entities.

use tracing::{debug, info};

use super::entity::ParsedEntity;
use super::grid::Placement;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::ldtk::{LayerType, LdtkLevel, LdtkProject};

/// A level ready for emission
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLevel {
    /// Position in the project's level list
    pub id: usize,
    /// Editor name, also the PNG file stem
    pub identifier: String,
    /// Size in pixels
    pub width: i64,
    pub height: i64,
    /// World pixel origin, offset applied
    pub world_x: i64,
    pub world_y: i64,
    /// World origin in grid cells
    pub grid_x: i64,
    pub grid_y: i64,
    /// Footprint in grid cells
    pub grid_width: i64,
    pub grid_height: i64,
    /// Tile class per IntGrid cell, row-major
    pub int_grid: Vec<i64>,
    pub entities: Vec<ParsedEntity>,
}

impl ParsedLevel {
    pub fn placement(&self) -> Placement {
        Placement::new(
            self.id as i32,
            self.identifier.as_str(),
            self.grid_x,
            self.grid_y,
            self.grid_width,
            self.grid_height,
        )
    }

    /// Zero-padded id used in asset file names
    pub fn asset_id(&self) -> String {
        format!("{:04}", self.id)
    }
}

/// Global cell size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: i64,
    pub height: i64,
}

impl CellSize {
    pub fn from_project(project: &LdtkProject) -> Result<Self> {
        if project.world_grid_width <= 0 || project.world_grid_height <= 0 {
            return Err(PipelineError::schema(
                "project",
                format!(
                    "world grid cell size must be positive, got {}x{}",
                    project.world_grid_width, project.world_grid_height
                ),
            ));
        }
        Ok(Self {
            width: project.world_grid_width,
            height: project.world_grid_height,
        })
    }
}

fn cells(level: &str, what: &'static str, value: i64, cell: i64) -> Result<i64> {
    if value % cell != 0 {
        return Err(PipelineError::Misaligned {
            level: level.to_string(),
            what,
            value,
            cell,
        });
    }
    Ok(value / cell)
}

/// Derive every level of the project, in input order
pub fn parse_levels(project: &LdtkProject, config: &PipelineConfig) -> Result<Vec<ParsedLevel>> {
    let cell = CellSize::from_project(project)?;
    let levels = project
        .levels
        .iter()
        .enumerate()
        .map(|(id, level)| parse_level(level, id, cell, config))
        .collect::<Result<Vec<_>>>()?;

    info!(
        levels = levels.len(),
        entities = levels.iter().map(|l| l.entities.len()).sum::<usize>(),
        "parsed levels"
    );
    Ok(levels)
}

fn offset(level: &str, what: &'static str, value: i64, world_offset: i64) -> Result<i64> {
    value.checked_add(world_offset).ok_or_else(|| {
        PipelineError::schema(
            format!("level {}", level),
            format!("{} {} plus offset {} overflows", what, value, world_offset),
        )
    })
}

pub fn parse_level(
    level: &LdtkLevel,
    id: usize,
    cell: CellSize,
    config: &PipelineConfig,
) -> Result<ParsedLevel> {
    let name = level.identifier.as_str();
    if level.layer_instances.is_none() {
        return Err(PipelineError::schema(
            format!("level {}", name),
            "layerInstances is null (levels saved in separate files are not supported)",
        ));
    }

    let world_x = offset(name, "world x", level.world_x, config.world_offset)?;
    let world_y = offset(name, "world y", level.world_y, config.world_offset)?;

    let int_grid = level
        .layers()
        .find(|l| l.layer_type == LayerType::IntGrid && l.identifier == config.int_grid_layer)
        .map(|l| l.int_grid_csv.clone())
        .ok_or_else(|| {
            PipelineError::schema(
                format!("level {}", name),
                format!("no IntGrid layer named {:?}", config.int_grid_layer),
            )
        })?;

    let mut entities = Vec::new();
    for layer in level.layers().filter(|l| l.layer_type == LayerType::Entities) {
        for instance in &layer.entity_instances {
            let index = entities.len();
            entities.push(ParsedEntity::from_instance(instance, id, name, index, config)?);
        }
    }

    let parsed = ParsedLevel {
        id,
        identifier: level.identifier.clone(),
        width: level.px_wid,
        height: level.px_hei,
        world_x,
        world_y,
        grid_x: cells(name, "world x", world_x, cell.width)?,
        grid_y: cells(name, "world y", world_y, cell.height)?,
        grid_width: cells(name, "width", level.px_wid, cell.width)?,
        grid_height: cells(name, "height", level.px_hei, cell.height)?,
        int_grid,
        entities,
    };

    debug!(
        level = name,
        id,
        grid_x = parsed.grid_x,
        grid_y = parsed.grid_y,
        grid_width = parsed.grid_width,
        grid_height = parsed.grid_height,
        entities = parsed.entities.len(),
        "parsed level"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_project;

    #[test]
    fn test_parse_sample_levels() {
        let project = sample_project();
        let levels = parse_levels(&project, &PipelineConfig::default()).unwrap();
        assert_eq!(levels.len(), 2);

        let first = &levels[0];
        assert_eq!(first.id, 0);
        assert_eq!(first.identifier, "Level_0");
        assert_eq!((first.grid_x, first.grid_y), (0, 0));
        assert_eq!((first.grid_width, first.grid_height), (2, 2));
        assert_eq!(first.int_grid, vec![0, 1, 1, 2]);
        assert_eq!(first.entities.len(), 2);
        assert_eq!(first.entities[1].id, 1);
        assert_eq!(first.asset_id(), "0000");

        let second = &levels[1];
        assert_eq!(second.id, 1);
        assert_eq!((second.grid_x, second.grid_y), (2, 0));
        assert_eq!((second.grid_width, second.grid_height), (3, 2));
        assert!(second.entities.is_empty());
        assert_eq!(
            second.placement(),
            Placement::new(1, "Level_1", 2, 0, 3, 2)
        );
    }

    #[test]
    fn test_world_offset_is_applied() {
        let project = sample_project();
        let config = PipelineConfig {
            world_offset: 256,
            ..Default::default()
        };
        let levels = parse_levels(&project, &config).unwrap();
        assert_eq!(levels[1].world_x, 32 + 256);
        assert_eq!(levels[1].grid_x, (32 + 256) / 16);
        assert_eq!(levels[1].grid_y, 16);
    }

    #[test]
    fn test_offset_overflow_is_rejected() {
        let mut project = sample_project();
        project.levels[1].world_x = i64::MAX;
        let config = PipelineConfig {
            world_offset: 256,
            ..Default::default()
        };

        match parse_levels(&project, &config) {
            Err(PipelineError::SchemaMismatch { context, message }) => {
                assert_eq!(context, "level Level_1");
                assert!(message.contains("overflows"));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_misaligned_width() {
        let mut project = sample_project();
        project.levels[1].px_wid = 40;

        match parse_levels(&project, &PipelineConfig::default()) {
            Err(PipelineError::Misaligned { level, what, value, cell }) => {
                assert_eq!(level, "Level_1");
                assert_eq!(what, "width");
                assert_eq!(value, 40);
                assert_eq!(cell, 16);
            }
            other => panic!("expected Misaligned, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_int_grid_layer() {
        let project = sample_project();
        let config = PipelineConfig {
            int_grid_layer: "Collisions".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            parse_levels(&project, &config),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_external_levels_rejected() {
        let mut project = sample_project();
        project.levels[0].layer_instances = None;
        assert!(matches!(
            parse_levels(&project, &PipelineConfig::default()),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_cell_size() {
        let mut project = sample_project();
        project.world_grid_height = 0;
        assert!(CellSize::from_project(&project).is_err());
    }
}
