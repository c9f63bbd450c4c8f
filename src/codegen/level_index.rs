//! `levels_intgrid.h`: includes every level header and lists the levels

use super::brace_list;
use crate::config::PipelineConfig;
use crate::world::ParsedLevel;

pub fn render_level_index(levels: &[ParsedLevel], config: &PipelineConfig) -> String {
    let guard = format!("{}_LEVEL_INTGRID_H", config.guard_prefix);

    let mut out = String::new();
    out.push_str(&format!("#ifndef {}\n", guard));
    out.push_str(&format!("#define {}\n\n", guard));
    for level in levels {
        out.push_str(&format!("#include \"generated/levels/level_{}.h\"\n", level.id));
    }
    out.push_str("#include \"level.h\"\n\n");
    out.push_str(&format!("namespace {} {{\n", config.namespace));
    out.push_str(&format!(
        "    BN_DATA_EWRAM static Level* levels[] = {};\n",
        brace_list(levels.iter().map(|l| format!("&level_{}", l.id)))
    ));
    out.push_str(&format!("    static const int levels_count = {};\n", levels.len()));
    out.push_str("}\n\n");
    out.push_str("#endif\n");
    out
}
