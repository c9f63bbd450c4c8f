//! Symbol tables from the project definitions

use tracing::{debug, warn};

use crate::ldtk::{LayerType, LdtkDefinitions};

/// Ordered name → value table
///
/// Keeps first-insertion order (enum emission order follows the editor's
/// definition order); inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<(String, i64)>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entity types and grid tile classes declared by the project
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    /// Entity type name → entity definition uid
    pub entity_types: SymbolTable,
    /// Tile class name → IntGrid value
    pub grid_tile_types: SymbolTable,
}

impl Definitions {
    pub fn from_defs(defs: &LdtkDefinitions) -> Self {
        let mut entity_types = SymbolTable::new();
        for entity in &defs.entities {
            entity_types.insert(entity.identifier.as_str(), entity.uid);
        }

        let mut grid_tile_types = SymbolTable::new();
        for layer in defs.layers.iter().filter(|l| l.layer_type == LayerType::IntGrid) {
            for value in &layer.int_grid_values {
                match &value.identifier {
                    Some(name) => grid_tile_types.insert(name.as_str(), value.value),
                    None => warn!(
                        layer = %layer.identifier,
                        value = value.value,
                        "skipping unnamed IntGrid value"
                    ),
                }
            }
        }

        debug!(
            entity_types = entity_types.len(),
            grid_tile_types = grid_tile_types.len(),
            "parsed definitions"
        );

        Self {
            entity_types,
            grid_tile_types,
        }
    }
}
