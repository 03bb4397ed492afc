use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::{MapError, Result};
use crate::inflect;

use super::field::{FieldDef, FieldKind};
use super::value::Value;

/// EntityType - a named record shape mapped to one table
///
/// Declares the semantic attributes an entity carries, the primary-key field
/// (conventionally `id`), and the table association (derived from the type
/// name unless overridden).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    /// Type name, e.g. `Student`
    name: String,

    /// Declared fields, in declaration order
    fields: Vec<FieldDef>,

    /// Explicit table name; required for irregular plurals
    table_override: Option<String>,

    /// Primary-key field name
    primary_key: String,
}

impl EntityType {
    /// Create a new entity type with the given name and field registry
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
            table_override: None,
            primary_key: "id".to_string(),
        }
    }

    /// Override the derived table name
    pub fn with_table_name(mut self, table: impl Into<String>) -> Self {
        self.table_override = Some(table.into());
        self
    }

    /// Use a primary-key field other than `id`
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Get the type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the primary-key field name
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Resolve the table this type maps to
    pub fn table_name(&self) -> String {
        match &self.table_override {
            Some(table) => table.clone(),
            None => inflect::table_name_for(&self.name),
        }
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether a name is assignable on this type
    ///
    /// The primary-key field is always assignable: it is identity, not a
    /// semantic attribute, and hydration must be able to set it.
    pub fn is_assignable(&self, name: &str) -> bool {
        name == self.primary_key || self.field(name).is_some()
    }
}

/// Entity - one in-memory value of an EntityType
///
/// Unsaved instances carry no primary-key value; saved instances carry the
/// engine-assigned identifier. Transitions: unsaved --save--> saved;
/// saved --save--> saved (updated in place); any --hydrate--> saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    ty: Arc<EntityType>,
    values: BTreeMap<String, Value>,
}

impl Entity {
    /// Create a new unsaved instance with no fields set
    pub fn new(ty: &Arc<EntityType>) -> Self {
        Self {
            ty: Arc::clone(ty),
            values: BTreeMap::new(),
        }
    }

    /// Create a new instance and assign the given attributes
    pub fn with_attrs(ty: &Arc<EntityType>, attrs: &[(&str, Value)]) -> Result<Self> {
        let mut entity = Self::new(ty);
        entity.assign(attrs)?;
        Ok(entity)
    }

    /// Get this instance's type
    pub fn ty(&self) -> &EntityType {
        &self.ty
    }

    /// Assign attributes from a mapping of field name to value
    ///
    /// Every key must be a declared field (or the primary key); an
    /// undeclared key fails with UnknownField rather than being dropped.
    pub fn assign(&mut self, attrs: &[(&str, Value)]) -> Result<()> {
        for (field, value) in attrs {
            self.set(field, value.clone())?;
        }
        Ok(())
    }

    /// Assign a single field
    pub fn set(&mut self, field: &str, value: Value) -> Result<()> {
        if field == self.ty.primary_key() {
            self.values.insert(field.to_string(), value);
            return Ok(());
        }

        let def = self.ty.field(field).ok_or_else(|| MapError::UnknownField {
            entity: self.ty.name().to_string(),
            field: field.to_string(),
        })?;

        let coerced = coerce(def.kind, value);
        self.values.insert(field.to_string(), coerced);
        Ok(())
    }

    /// Read a field value, if set
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// The engine-assigned identifier, when this instance is saved
    pub fn id(&self) -> Option<i64> {
        match self.values.get(self.ty.primary_key()) {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        }
    }

    /// Store the engine-assigned identifier
    pub fn set_id(&mut self, id: i64) {
        self.values
            .insert(self.ty.primary_key().to_string(), Value::Integer(id));
    }

    /// Check whether this instance has a persisted identity
    pub fn is_saved(&self) -> bool {
        self.id().is_some()
    }
}

/// Interpret an engine value through the declared field kind
///
/// The engine reports booleans and timestamps as integers; real columns may
/// come back as integers for whole numbers.
fn coerce(kind: FieldKind, value: Value) -> Value {
    match (kind, value) {
        (FieldKind::Boolean, Value::Integer(i)) => Value::Boolean(i != 0),
        (FieldKind::Timestamp, Value::Integer(secs)) => Value::Timestamp(
            DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_else(Utc::now),
        ),
        (FieldKind::Real, Value::Integer(i)) => Value::Real(i as f64),
        (_, v) => v,
    }
}
