//! `world_config.h`: tile/entity enums and the world lookup grid

use super::check_identifier;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::world::{CellSize, Definitions, WorldGrid};

/// Name of the implicit tile class of value 0
const EMPTY_TILE: &str = "empty";

pub fn render_world_config(
    defs: &Definitions,
    grid: &WorldGrid,
    cell: CellSize,
    config: &PipelineConfig,
) -> Result<String> {
    let mut tiles = format!("        {} = 0,\n", EMPTY_TILE);
    for (name, value) in defs.grid_tile_types.iter() {
        check_identifier("GridTileType", name)?;
        if name == EMPTY_TILE {
            if value == 0 {
                continue;
            }
            return Err(PipelineError::schema(
                "GridTileType",
                format!("{:?} is reserved for value 0, got {}", EMPTY_TILE, value),
            ));
        }
        tiles.push_str(&format!("        {} = {},\n", name, value));
    }

    let mut entities = String::new();
    for (name, uid) in defs.entity_types.iter() {
        check_identifier("EntityType", name)?;
        entities.push_str(&format!("        {} = {},\n", name, uid));
    }

    let mut cells = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        cells.push_str(&format!("        {},\n", line.join(", ")));
    }

    let guard = format!("{}_LEVEL_WORLDCONFIG_H", config.guard_prefix);
    let canvas = grid.canvas();

    let mut out = String::new();
    out.push_str(&format!("#ifndef {}\n", guard));
    out.push_str(&format!("#define {}\n\n", guard));
    out.push_str(&format!("namespace {} {{\n\n", config.namespace));
    out.push_str("    enum class GridTileType {\n");
    out.push_str(&tiles);
    out.push_str("    };\n\n");
    out.push_str("    enum class EntityType {\n");
    out.push_str(&entities);
    out.push_str("    };\n\n");
    out.push_str(&format!("    static const int world_grid_width = {};\n", cell.width));
    out.push_str(&format!("    static const int world_grid_height = {};\n", cell.height));
    out.push_str(&format!("    static const int world_int_grid_width = {};\n", canvas.width));
    out.push_str(&format!("    static const int world_int_grid_height = {};\n", canvas.height));
    out.push_str("    static const int world_int_grid[] = {\n");
    out.push_str(&cells);
    out.push_str("    };\n");
    out.push_str(&format!(
        "    static const int string_metadata_max_size = {};\n",
        config.string_metadata_max_size
    ));
    out.push_str("}\n\n");
    out.push_str("#endif\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use crate::fixtures::sample_project;
    use crate::world::Placement;

    fn sample_grid() -> WorldGrid {
        WorldGrid::build(
            CanvasSize::new(3, 2),
            -1,
            &[Placement::new(0, "Level_0", 0, 0, 2, 1)],
        )
        .unwrap()
    }

    fn render(defs: &Definitions) -> Result<String> {
        let config = PipelineConfig::default();
        let cell = CellSize { width: 16, height: 16 };
        render_world_config(defs, &sample_grid(), cell, &config)
    }

    #[test]
    fn test_enums_and_constants() {
        let defs = Definitions::from_defs(&sample_project().defs);
        let header = render(&defs).unwrap();

        assert!(header.starts_with("#ifndef COLLIE_DEFENCE_GBA_LEVEL_WORLDCONFIG_H"));
        assert!(header.contains("namespace cd {"));
        assert!(header.contains("        empty = 0,\n        platform = 1,\n        spikes = 2,"));
        assert!(header.contains("        Player = 1,\n        Npc = 2,"));
        assert!(header.contains("world_grid_width = 16;"));
        assert!(header.contains("world_int_grid_width = 3;"));
        assert!(header.contains("world_int_grid_height = 2;"));
        assert!(header.contains("string_metadata_max_size = 45;"));
        assert!(header.trim_end().ends_with("#endif"));
    }

    #[test]
    fn test_grid_one_row_per_line() {
        let header = render(&Definitions::default()).unwrap();
        assert!(header.contains("world_int_grid[] = {\n        0, 0, -1,\n        -1, -1, -1,\n    };"));
    }

    #[test]
    fn test_explicit_empty_tile_is_folded() {
        let mut defs = Definitions::default();
        defs.grid_tile_types.insert("empty", 0);
        defs.grid_tile_types.insert("wall", 1);
        let header = render(&defs).unwrap();
        assert_eq!(header.matches("empty = 0").count(), 1);

        defs.grid_tile_types.insert("empty", 4);
        assert!(render(&defs).is_err());
    }

    #[test]
    fn test_invalid_enum_name() {
        let mut defs = Definitions::default();
        defs.entity_types.insert("Big Dog", 5);
        assert!(matches!(render(&defs), Err(PipelineError::SchemaMismatch { .. })));
    }
}
