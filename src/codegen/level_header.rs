//! `levels/level_<id>.h`: entity tables, tile classes and the level record
//!
//! Generated names are built from numbers plus fixed segments so that
//! identifiers taken from the project can never make two of them equal:
//!   level_<asset>_entity_<index>_<kind>         entity record
//!   level_<asset>_entity_<index>_<kind>_pt_<k>  point field
//!   level_<asset>_entity_<index>_<kind>_str_<k> string field
//!   level_<asset>_entity_<index>_<kind>_coords  / _strings pointer tables

use super::{brace_list, c_string_literal, check_identifier};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::world::{Definitions, ParsedEntity, ParsedLevel};

/// C++ types of the metadata pairs, sized from the config
struct PairTypes {
    point: String,
    string: String,
}

impl PairTypes {
    fn new(config: &PipelineConfig) -> Self {
        let key = format!("bn::string<{}>", config.field_key_max_size);
        Self {
            point: format!("bn::pair<{}, bn::fixed_point>", key),
            string: format!(
                "bn::pair<{}, bn::string<{}>>",
                key, config.string_metadata_max_size
            ),
        }
    }
}

// Kinds are C identifiers and never start with a digit, so the index
// segment is always delimited.
fn entity_var_name(level: &ParsedLevel, entity: &ParsedEntity) -> String {
    format!("level_{}_entity_{}_{}", level.asset_id(), entity.index, entity.kind)
}

fn render_entity(
    out: &mut String,
    level: &ParsedLevel,
    entity: &ParsedEntity,
    types: &PairTypes,
) -> Result<String> {
    let context = format!("level {} entity #{}", level.identifier, entity.index);
    let var = entity_var_name(level, entity);

    let mut coords = Vec::new();
    for (key, point) in &entity.points {
        check_identifier(&context, key)?;
        let name = format!("{}_pt_{}", var, key);
        out.push_str(&format!(
            "    BN_DATA_EWRAM static const {ty} {name} = {ty}({key}, bn::fixed_point({cx}, {cy}));\n",
            ty = types.point,
            name = name,
            key = c_string_literal(key),
            cx = point.cx,
            cy = point.cy,
        ));
        coords.push(format!("&{}", name));
    }

    let mut strings = Vec::new();
    for (key, text) in &entity.strings {
        check_identifier(&context, key)?;
        let name = format!("{}_str_{}", var, key);
        out.push_str(&format!(
            "    BN_DATA_EWRAM static const {ty} {name} = {ty}({key}, {text});\n",
            ty = types.string,
            name = name,
            key = c_string_literal(key),
            text = c_string_literal(text),
        ));
        strings.push(format!("&{}", name));
    }

    let coords_ref = if coords.is_empty() {
        "nullptr".to_string()
    } else {
        let name = format!("{}_coords", var);
        out.push_str(&format!(
            "    BN_DATA_EWRAM static const {} *{}[] = {};\n",
            types.point,
            name,
            brace_list(&coords)
        ));
        name
    };

    let strings_ref = if strings.is_empty() {
        "nullptr".to_string()
    } else {
        let name = format!("{}_strings", var);
        out.push_str(&format!(
            "    BN_DATA_EWRAM static const {} *{}[] = {};\n",
            types.string,
            name,
            brace_list(&strings)
        ));
        name
    };

    out.push_str(&format!("    BN_DATA_EWRAM static const Entity {} = Entity(\n", var));
    out.push_str(&format!("        {},\n", entity.id));
    out.push_str(&format!("        EntityType::{},\n", entity.kind));
    out.push_str(&format!("        {},\n", entity.x));
    out.push_str(&format!("        {},\n", entity.y));
    out.push_str(&format!("        {},\n", coords_ref));
    out.push_str(&format!("        {},\n", strings_ref));
    out.push_str(&format!("        {},\n", coords.len()));
    out.push_str(&format!("        {}\n", strings.len()));
    out.push_str("    );\n\n");

    Ok(var)
}

/// Render one level header.
///
/// Every entity kind must be a member of the generated `EntityType` enum.
pub fn render_level_header(
    level: &ParsedLevel,
    definitions: &Definitions,
    config: &PipelineConfig,
) -> Result<String> {
    let asset_id = level.asset_id();
    let guard = format!("{}_LEVEL_{}_H", config.guard_prefix, asset_id);
    let types = PairTypes::new(config);

    let mut body = String::new();
    let mut entity_refs = Vec::with_capacity(level.entities.len());
    for entity in &level.entities {
        let context = format!("level {} entity #{}", level.identifier, entity.index);
        check_identifier(&context, &entity.kind)?;
        if !definitions.entity_types.contains(&entity.kind) {
            return Err(PipelineError::schema(
                context,
                format!("entity type `{}` is not defined in the project", entity.kind),
            ));
        }
        let var = render_entity(&mut body, level, entity, &types)?;
        entity_refs.push(format!("&{}", var));
    }

    let id = level.id;
    let mut out = String::new();
    out.push_str(&format!("#ifndef {}\n", guard));
    out.push_str(&format!("#define {}\n\n", guard));
    out.push_str(&format!("#include \"bn_regular_bg_items_levels_{}.h\"\n", asset_id));
    out.push_str("#include \"bn_fixed_point.h\"\n");
    out.push_str("#include \"bn_utility.h\"\n");
    out.push_str("#include \"bn_string.h\"\n");
    out.push_str("#include \"level.h\"\n");
    out.push_str("#include \"entity.h\"\n");
    out.push_str("#include \"generated/world_config.h\"\n\n");
    out.push_str(&format!("namespace {} {{\n\n", config.namespace));
    out.push_str(&body);
    out.push_str(&format!(
        "    static const Entity* entities_{}[] = {};\n",
        id,
        brace_list(&entity_refs)
    ));
    out.push_str(&format!(
        "    static const int int_grid_{}[] = {};\n",
        id,
        brace_list(&level.int_grid)
    ));
    out.push_str(&format!("    BN_DATA_EWRAM static Level level_{} = Level(\n", id));
    out.push_str(&format!("        bn::regular_bg_items::levels_{},\n", asset_id));
    out.push_str(&format!("        int_grid_{},\n", id));
    out.push_str(&format!("        {},\n", level.world_x));
    out.push_str(&format!("        {},\n", level.world_y));
    out.push_str(&format!("        entities_{},\n", id));
    out.push_str(&format!("        {}\n", entity_refs.len()));
    out.push_str("    );\n");
    out.push_str("}\n\n");
    out.push_str("#endif\n");
    Ok(out)
}
