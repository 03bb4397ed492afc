//! Hydration - constructing entity instances from raw rows
//!
//! A row is an ordered value sequence positionally aligned with a table
//! descriptor; zipping the two and assigning each pair yields an instance.

use std::sync::Arc;

use crate::errors::{MapError, Result};
use rowmap_core::{Entity, EntityType, Value};

/// Build an entity instance from a row and its table descriptor
///
/// Each (column, value) pair goes through attribute assignment, so a column
/// the type does not declare surfaces UnknownField. Fails with
/// RowShapeMismatch when the row length disagrees with the descriptor.
pub fn hydrate(ty: &Arc<EntityType>, row: &[Value], columns: &[String]) -> Result<Entity> {
    if row.len() != columns.len() {
        return Err(MapError::RowShapeMismatch {
            table: ty.table_name(),
            expected: columns.len(),
            actual: row.len(),
        });
    }

    let mut entity = Entity::new(ty);
    for (column, value) in columns.iter().zip(row) {
        entity.set(column, value.clone())?;
    }

    Ok(entity)
}
