//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use serde::{Deserialize, Serialize};
use sqlcfg_core::Value;

/// Decode a JSON-encoded [`Value`] from a text column.
pub(crate) fn parse_value(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Value> {
    let raw: String = row.get(idx)?;
    Value::decode(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ---------------------------------------------------------------------------
// Setting
// ---------------------------------------------------------------------------

/// One persisted (section, key) → value entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub section: String,
    pub key: String,
    pub value: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl Setting {
    /// Column order: section, key, value, created_at, updated_at.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            section: row.get(0)?,
            key: row.get(1)?,
            value: parse_value(row, 2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}
