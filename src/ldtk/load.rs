//! Loading LDtk projects from disk

use std::fs;
use std::path::Path;

use tracing::info;

use super::LdtkProject;
use crate::error::{PipelineError, Result};

/// Load and bind an LDtk project file
pub fn load_project(path: &Path) -> Result<LdtkProject> {
    let contents = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let project = load_project_from_str(&contents, &path.display().to_string())?;

    info!(
        path = %path.display(),
        levels = project.levels.len(),
        entity_defs = project.defs.entities.len(),
        "loaded LDtk project"
    );
    Ok(project)
}

/// Bind an LDtk project from a JSON string; `context` names it in errors
pub fn load_project_from_str(contents: &str, context: &str) -> Result<LdtkProject> {
    serde_json::from_str(contents).map_err(|e| PipelineError::schema(context, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SAMPLE_PROJECT;
    use crate::ldtk::LayerType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_sample() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE_PROJECT.as_bytes()).unwrap();

        let project = load_project(temp_file.path()).unwrap();
        assert_eq!(project.world_grid_width, 16);
        assert_eq!(project.levels.len(), 2);
        assert_eq!(project.defs.entities[0].identifier, "Player");
        assert_eq!(project.defs.layers[0].layer_type, LayerType::IntGrid);

        let level = &project.levels[0];
        assert_eq!(level.layers().count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_project(&dir.path().join("missing.ldtk"));
        assert!(matches!(result, Err(PipelineError::InputNotFound { .. })));
    }

    #[test]
    fn test_schema_mismatch() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{\"levels\": 3}}").unwrap();

        let result = load_project(temp_file.path());
        assert!(matches!(result, Err(PipelineError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_unknown_layer_type_is_tolerated() {
        let json = r#"{
            "worldGridWidth": 8, "worldGridHeight": 8,
            "defs": { "layers": [ { "identifier": "Deco", "type": "Parallax" } ] },
            "levels": []
        }"#;
        let project = load_project_from_str(json, "inline").unwrap();
        assert_eq!(project.defs.layers[0].layer_type, LayerType::Unknown);
    }
}
