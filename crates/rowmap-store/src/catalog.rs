//! Schema catalog
//!
//! Resolves a table name to its ordered column list by querying the engine's
//! own metadata. No caching: labs drop and recreate tables between runs, so
//! every call reflects the table's current shape.

use crate::errors::{from_rusqlite, schema_lookup, MapError, Result};
use rusqlite::Connection;

/// Get the ordered column list for a table
///
/// Fails with SchemaLookup when the table does not exist.
pub fn columns_for(conn: &Connection, table: &str) -> Result<Vec<String>> {
    // PRAGMA arguments cannot be bound, so the identifier is validated
    // before interpolation
    ensure_identifier(table)?;

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(from_rusqlite)?;

    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    if columns.is_empty() {
        return Err(schema_lookup(table));
    }

    Ok(columns)
}

/// Validate a name for use in an identifier position
///
/// Identifier positions (table names, column names) cannot take bound
/// parameters; only `[A-Za-z_][A-Za-z0-9_]*` names are interpolated.
pub fn ensure_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(MapError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}
