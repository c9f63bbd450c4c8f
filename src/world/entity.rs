//! Entity instances and their metadata fields

use serde_json::Value;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::ldtk::{EntityInstance, FieldInstance};

/// Entity ids are `level_id * ENTITY_ID_STRIDE + index`
pub const ENTITY_ID_STRIDE: usize = 1000;

/// A grid cell referenced by a `Point` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoint {
    pub cx: i64,
    pub cy: i64,
}

/// How a field instance is carried into the generated code
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Point(GridPoint),
    Text(String),
    /// Null values and types the runtime has no table for
    Ignored,
}

impl FieldKind {
    /// Classify a field by its type tag and value
    pub fn classify(field: &FieldInstance) -> FieldKind {
        if field.field_type == "Point" {
            return match point_from_value(&field.value) {
                Some(point) => FieldKind::Point(point),
                None => FieldKind::Ignored,
            };
        }
        match &field.value {
            Value::String(text) => FieldKind::Text(text.clone()),
            _ => FieldKind::Ignored,
        }
    }
}

fn point_from_value(value: &Value) -> Option<GridPoint> {
    let cx = value.get("cx")?.as_i64()?;
    let cy = value.get("cy")?.as_i64()?;
    Some(GridPoint { cx, cy })
}

/// An entity ready for emission
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntity {
    /// `level_id * 1000 + index`
    pub id: usize,
    /// Index within its level
    pub index: usize,
    /// Entity type identifier
    pub kind: String,
    /// Pixel position inside the level
    pub x: i64,
    pub y: i64,
    pub points: Vec<(String, GridPoint)>,
    pub strings: Vec<(String, String)>,
}

impl ParsedEntity {
    /// Convert an editor entity, enforcing the generated string capacities
    pub fn from_instance(
        instance: &EntityInstance,
        level_id: usize,
        level_name: &str,
        index: usize,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let owner = format!("level {} entity {} #{}", level_name, instance.identifier, index);
        if index >= ENTITY_ID_STRIDE {
            return Err(PipelineError::SizeBudgetExceeded {
                owner,
                what: "entity count".to_string(),
                len: index + 1,
                max: ENTITY_ID_STRIDE,
            });
        }

        let mut points = Vec::new();
        let mut strings = Vec::new();

        for field in &instance.field_instances {
            let kind = FieldKind::classify(field);
            if kind == FieldKind::Ignored {
                debug!(
                    level = level_name,
                    entity = %instance.identifier,
                    field = %field.identifier,
                    field_type = %field.field_type,
                    "ignoring field"
                );
                continue;
            }

            check_budget(
                &owner,
                &format!("field key {:?} length", field.identifier),
                field.identifier.len(),
                config.field_key_max_size,
            )?;

            match kind {
                FieldKind::Point(point) => points.push((field.identifier.clone(), point)),
                FieldKind::Text(text) => {
                    check_budget(
                        &owner,
                        &format!("field {} length", field.identifier),
                        text.len(),
                        config.string_metadata_max_size,
                    )?;
                    strings.push((field.identifier.clone(), text));
                }
                FieldKind::Ignored => {}
            }
        }

        Ok(Self {
            id: level_id * ENTITY_ID_STRIDE + index,
            index,
            kind: instance.identifier.clone(),
            x: instance.px[0],
            y: instance.px[1],
            points,
            strings,
        })
    }
}

/// Fail when `len` does not fit a capacity of `max` bytes
pub fn check_budget(owner: &str, what: &str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(PipelineError::SizeBudgetExceeded {
            owner: owner.to_string(),
            what: what.to_string(),
            len,
            max,
        });
    }
    Ok(())
}
