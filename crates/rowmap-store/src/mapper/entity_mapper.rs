//! Statement synthesis for entity persistence
//!
//! Generates parameterized INSERT/SELECT/UPDATE statements from an entity
//! type's field registry and the table's live column list. Values always go
//! through parameter binding; only registry- and engine-reported identifiers
//! are interpolated, and each is validated first.

use std::sync::Arc;

use rusqlite::{params_from_iter, types, Connection};

use crate::catalog;
use crate::errors::{from_rusqlite, MapError, Result};
use rowmap_core::{Entity, EntityType, Value};

use super::{bind, hydration};

/// Entity mapper over the shared session connection
pub struct EntityMapper;

impl EntityMapper {
    /// Persist an entity instance
    ///
    /// Unsaved instances are inserted and receive the engine-assigned
    /// identifier; saved instances are updated in place keyed by primary
    /// key. Repeated saves never duplicate a row.
    pub fn save(conn: &Connection, entity: &mut Entity) -> Result<()> {
        match entity.id() {
            None => Self::insert(conn, entity),
            Some(id) => Self::update(conn, entity, id),
        }
    }

    /// Instantiate with the given attributes and save
    pub fn create(
        conn: &Connection,
        ty: &Arc<EntityType>,
        attrs: &[(&str, Value)],
    ) -> Result<Entity> {
        let mut entity = Entity::with_attrs(ty, attrs)?;
        Self::save(conn, &mut entity)?;
        Ok(entity)
    }

    /// Find the first row matching all criteria, in the engine's natural
    /// return order
    ///
    /// Returns Ok(None) when nothing matches; absence is not an error.
    /// Criteria keys must be declared fields of the type.
    pub fn find_by(
        conn: &Connection,
        ty: &Arc<EntityType>,
        criteria: &[(&str, Value)],
    ) -> Result<Option<Entity>> {
        let (columns, rows) = Self::select_rows(conn, ty, criteria)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(hydration::hydrate(ty, &row, &columns)?)),
            None => Ok(None),
        }
    }

    /// Find a row by primary-key value
    pub fn find_by_id(conn: &Connection, ty: &Arc<EntityType>, id: i64) -> Result<Option<Entity>> {
        let pk = ty.primary_key().to_string();
        Self::find_by(conn, ty, &[(pk.as_str(), Value::Integer(id))])
    }

    /// Find a matching row, or create one from the criteria
    ///
    /// When several rows match, the first in the engine's natural order
    /// wins; callers needing determinism supply uniquely-identifying
    /// criteria.
    pub fn find_or_create_by(
        conn: &Connection,
        ty: &Arc<EntityType>,
        criteria: &[(&str, Value)],
    ) -> Result<Entity> {
        if let Some(found) = Self::find_by(conn, ty, criteria)? {
            return Ok(found);
        }
        Self::create(conn, ty, criteria)
    }

    /// Load every row of the type's table, in engine order
    pub fn all(conn: &Connection, ty: &Arc<EntityType>) -> Result<Vec<Entity>> {
        let (columns, rows) = Self::select_rows(conn, ty, &[])?;
        rows.iter()
            .map(|row| hydration::hydrate(ty, row, &columns))
            .collect()
    }

    /// Column list an INSERT of this instance would use
    ///
    /// Never contains the primary-key column; agrees element-for-element
    /// with insert_values.
    pub fn insert_columns(conn: &Connection, entity: &Entity) -> Result<Vec<String>> {
        Ok(Self::insert_pairs(conn, entity)?
            .into_iter()
            .map(|(column, _)| column)
            .collect())
    }

    /// Value list an INSERT of this instance would bind
    pub fn insert_values(conn: &Connection, entity: &Entity) -> Result<Vec<Value>> {
        Ok(Self::insert_pairs(conn, entity)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    /// The (column, value) pairs an INSERT sends to the engine
    ///
    /// Table-descriptor order, minus the primary key, minus absent/Null
    /// fields: unpopulated columns fall back to the table's own defaults.
    fn insert_pairs(conn: &Connection, entity: &Entity) -> Result<Vec<(String, Value)>> {
        let ty = entity.ty();
        let table = ty.table_name();
        let columns = catalog::columns_for(conn, &table)?;

        let mut pairs = Vec::new();
        for column in columns {
            if column == ty.primary_key() {
                continue;
            }
            catalog::ensure_identifier(&column)?;
            if let Some(value) = entity.get(&column) {
                if !value.is_null() {
                    pairs.push((column, value.clone()));
                }
            }
        }
        Ok(pairs)
    }

    fn insert(conn: &Connection, entity: &mut Entity) -> Result<()> {
        let table = entity.ty().table_name();
        let pairs = Self::insert_pairs(conn, entity)?;

        let sql = if pairs.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let columns: Vec<&str> = pairs.iter().map(|(column, _)| column.as_str()).collect();
            let placeholders: Vec<String> = (1..=pairs.len()).map(|i| format!("?{i}")).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders.join(", ")
            )
        };
        tracing::debug!(sql = %sql, "insert");

        let bound: Vec<types::Value> = pairs.iter().map(|(_, value)| bind::to_sql(value)).collect();
        conn.execute(&sql, params_from_iter(bound.iter()))
            .map_err(from_rusqlite)?;

        // identity is assigned only after the statement succeeds
        entity.set_id(conn.last_insert_rowid());
        Ok(())
    }

    fn update(conn: &Connection, entity: &Entity, id: i64) -> Result<()> {
        let ty = entity.ty();
        let table = ty.table_name();
        let pk = ty.primary_key();
        catalog::ensure_identifier(pk)?;

        let columns: Vec<String> = catalog::columns_for(conn, &table)?
            .into_iter()
            .filter(|column| column != pk)
            .collect();
        if columns.is_empty() {
            return Ok(());
        }
        for column in &columns {
            catalog::ensure_identifier(column)?;
        }

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            table,
            assignments,
            pk,
            columns.len() + 1
        );
        tracing::debug!(sql = %sql, "update");

        let mut bound: Vec<types::Value> = columns
            .iter()
            .map(|column| {
                entity
                    .get(column)
                    .map(bind::to_sql)
                    .unwrap_or(types::Value::Null)
            })
            .collect();
        bound.push(types::Value::Integer(id));

        conn.execute(&sql, params_from_iter(bound.iter()))
            .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Run a SELECT over the table's live column list and decode every row
    fn select_rows(
        conn: &Connection,
        ty: &Arc<EntityType>,
        criteria: &[(&str, Value)],
    ) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
        let table = ty.table_name();

        for (field, _) in criteria {
            if !ty.is_assignable(field) {
                return Err(MapError::UnknownField {
                    entity: ty.name().to_string(),
                    field: field.to_string(),
                });
            }
            catalog::ensure_identifier(field)?;
        }

        let columns = catalog::columns_for(conn, &table)?;
        for column in &columns {
            catalog::ensure_identifier(column)?;
        }

        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), table);
        if !criteria.is_empty() {
            let predicates = criteria
                .iter()
                .enumerate()
                .map(|(i, (field, _))| format!("{} = ?{}", field, i + 1))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&predicates);
        }
        tracing::debug!(sql = %sql, "select");

        let bound: Vec<types::Value> = criteria
            .iter()
            .map(|(_, value)| bind::to_sql(value))
            .collect();

        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let width = columns.len();
        let raw_rows: Vec<Vec<types::Value>> = stmt
            .query_map(params_from_iter(bound.iter()), |row| {
                let mut cells = Vec::with_capacity(width);
                for i in 0..width {
                    cells.push(row.get::<_, types::Value>(i)?);
                }
                Ok(cells)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for raw in raw_rows {
            let mut cells = Vec::with_capacity(width);
            for cell in raw {
                cells.push(bind::from_sql(&table, cell)?);
            }
            rows.push(cells);
        }

        Ok((columns, rows))
    }
}
