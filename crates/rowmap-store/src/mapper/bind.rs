//! Value conversion at the engine boundary
//!
//! Booleans travel as 0/1 integers and timestamps as unix seconds; the
//! registry's declared kinds recover them on the way back in.

use crate::errors::{MapError, Result};
use rowmap_core::Value;
use rusqlite::types;

/// Convert a mapper value into an engine value for parameter binding
pub fn to_sql(value: &Value) -> types::Value {
    match value {
        Value::Integer(i) => types::Value::Integer(*i),
        Value::Real(f) => types::Value::Real(*f),
        Value::Text(s) => types::Value::Text(s.clone()),
        Value::Boolean(b) => types::Value::Integer(i64::from(*b)),
        Value::Timestamp(ts) => types::Value::Integer(ts.timestamp()),
        Value::Null => types::Value::Null,
    }
}

/// Convert an engine value from a result row into a mapper value
pub fn from_sql(table: &str, value: types::Value) -> Result<Value> {
    match value {
        types::Value::Null => Ok(Value::Null),
        types::Value::Integer(i) => Ok(Value::Integer(i)),
        types::Value::Real(f) => Ok(Value::Real(f)),
        types::Value::Text(s) => Ok(Value::Text(s)),
        types::Value::Blob(_) => Err(MapError::Persistence {
            message: format!("BLOB column in table {table} is not supported"),
        }),
    }
}
