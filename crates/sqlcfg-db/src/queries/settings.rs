//! Setting CRUD operations.
//!
//! Every function addresses rows by `(section, key)` or scans one section.
//! Missing rows are reported as `None`/`false`; turning that into a
//! key-not-found error is left to the caller.

use chrono::Utc;
use rusqlite::Connection;
use sqlcfg_core::{Error, Result, Value};

use crate::models::Setting;

/// Get one setting.
pub fn get_setting(conn: &Connection, section: &str, key: &str) -> Result<Option<Setting>> {
    let result = conn.query_row(
        "SELECT section, key, value, created_at, updated_at
         FROM config_settings WHERE section = ?1 AND key = ?2",
        rusqlite::params![section, key],
        Setting::from_row,
    );
    match result {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e)),
    }
}

/// Insert a setting or overwrite the value of an existing one.
///
/// An existing row keeps its id, so its position in [`list_settings`] and
/// its `created_at` are unchanged.
pub fn upsert_setting(conn: &Connection, section: &str, key: &str, value: &Value) -> Result<Setting> {
    let encoded = value.encode()?;
    let now = Utc::now().to_rfc3339();

    conn.query_row(
        "INSERT INTO config_settings (section, key, value, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT (section, key) DO UPDATE
            SET value = excluded.value, updated_at = excluded.updated_at
         RETURNING section, key, value, created_at, updated_at",
        rusqlite::params![section, key, encoded, now],
        Setting::from_row,
    )
    .map_err(Error::database)
}

/// Delete one setting. Returns `true` if a row was removed.
pub fn delete_setting(conn: &Connection, section: &str, key: &str) -> Result<bool> {
    let n = conn
        .execute(
            "DELETE FROM config_settings WHERE section = ?1 AND key = ?2",
            rusqlite::params![section, key],
        )
        .map_err(Error::database)?;
    Ok(n > 0)
}

/// All settings in a section, in insertion order.
pub fn list_settings(conn: &Connection, section: &str) -> Result<Vec<Setting>> {
    let mut stmt = conn
        .prepare(
            "SELECT section, key, value, created_at, updated_at
             FROM config_settings WHERE section = ?1 ORDER BY id",
        )
        .map_err(Error::database)?;

    let rows = stmt
        .query_map([section], Setting::from_row)
        .map_err(Error::database)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)
}

/// Distinct names of sections holding at least one setting, sorted.
pub fn list_sections(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT section FROM config_settings ORDER BY section")
        .map_err(Error::database)?;

    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(Error::database)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)
}

/// Number of settings in a section.
pub fn count_settings(conn: &Connection, section: &str) -> Result<usize> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM config_settings WHERE section = ?1",
            [section],
            |row| row.get(0),
        )
        .map_err(Error::database)?;
    Ok(n as usize)
}

/// Whether a section holds at least one setting.
pub fn section_exists(conn: &Connection, section: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM config_settings WHERE section = ?1)",
        [section],
        |row| row.get(0),
    )
    .map_err(Error::database)
}
