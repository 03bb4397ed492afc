use thiserror::Error;

/// Result type alias using MapError
pub type Result<T> = std::result::Result<T, MapError>;

/// Error taxonomy for rowmap operations
///
/// "No match" from a lookup is not an error; lookups return `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// Table absent or the engine's metadata query failed
    #[error("Schema lookup failed for table: {table}")]
    SchemaLookup { table: String },

    /// Caller supplied a field the entity type does not declare
    #[error("Unknown field `{field}` for entity type {entity}")]
    UnknownField { entity: String, field: String },

    /// Row length disagrees with the table descriptor during hydration
    #[error("Row shape mismatch for table {table}: {expected} columns, got {actual} values")]
    RowShapeMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// A name is not usable as a SQL identifier
    #[error("Invalid identifier: {name}")]
    InvalidIdentifier { name: String },

    /// Storage engine failure
    #[error("Persistence error: {message}")]
    Persistence { message: String },
}
