//! LDtk JSON data model (subset)

use serde::Deserialize;
use serde_json::Value;

/// Root of an LDtk project export
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdtkProject {
    /// Width of a world grid cell in pixels
    pub world_grid_width: i64,
    /// Height of a world grid cell in pixels
    pub world_grid_height: i64,
    pub defs: LdtkDefinitions,
    pub levels: Vec<LdtkLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LdtkDefinitions {
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDef {
    pub identifier: String,
    pub uid: i64,
}

/// Layer kind, from the `__type` / `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LayerType {
    IntGrid,
    Entities,
    Tiles,
    AutoLayer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDef {
    pub identifier: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    #[serde(default)]
    pub int_grid_values: Vec<IntGridValueDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntGridValueDef {
    pub value: i64,
    /// LDtk allows unnamed values
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdtkLevel {
    pub identifier: String,
    pub px_wid: i64,
    pub px_hei: i64,
    pub world_x: i64,
    pub world_y: i64,
    /// `None` when the project stores levels in separate files
    #[serde(default)]
    pub layer_instances: Option<Vec<LayerInstance>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(rename = "__type")]
    pub layer_type: LayerType,
    #[serde(default)]
    pub int_grid_csv: Vec<i64>,
    #[serde(default)]
    pub entity_instances: Vec<EntityInstance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    /// Pixel position inside the level
    pub px: [i64; 2],
    #[serde(default)]
    pub field_instances: Vec<FieldInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    /// Type tag such as `Point`, `String`, `Int`, `LocalEnum.Kind`
    #[serde(rename = "__type")]
    pub field_type: String,
    #[serde(rename = "__value", default)]
    pub value: Value,
}

impl LdtkLevel {
    /// Iterate layer instances, empty for external levels
    pub fn layers(&self) -> impl Iterator<Item = &LayerInstance> {
        self.layer_instances.iter().flatten()
    }
}
