use serde::{Deserialize, Serialize};

/// Declared kind of a semantic attribute
///
/// Kinds drive read-side coercion only: the engine reports booleans and
/// timestamps as integers, and the declared kind says how to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Real,
    Text,
    Boolean,
    Timestamp,
}

/// One entry in an entity type's field registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, matching the table column it maps to
    pub name: String,

    /// Declared kind
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
