//! Error handling for rowmap-store
//!
//! Wraps rowmap-core MapError with store-specific helpers

pub use rowmap_core::errors::{MapError, Result};

/// Create a schema lookup error for a missing table
pub fn schema_lookup(table: &str) -> MapError {
    MapError::SchemaLookup {
        table: table.to_string(),
    }
}

/// Create a persistence error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> MapError {
    MapError::Persistence {
        message: err.to_string(),
    }
}
