//! The persistence contract the store is written against.
//!
//! [`SettingsBackend`] is the whole surface the store needs: point lookup,
//! point delete, upsert, and a per-section scan, plus the distinct section
//! listing. [`SqliteBackend`] implements it on top of `sqlcfg-db`.

use std::collections::BTreeSet;

use sqlcfg_core::{Result, Value};
use sqlcfg_db::models::Setting;
use sqlcfg_db::pool::{get_conn, DbPool};
use sqlcfg_db::queries::settings;

/// Row-level storage for settings.
///
/// Implementations must keep `(section, key)` unique and return scans in
/// insertion order. Errors are passed through to callers untouched.
pub trait SettingsBackend: Send + Sync {
    /// Point lookup by (section, key).
    fn load(&self, section: &str, key: &str) -> Result<Option<Value>>;

    /// Upsert by (section, key).
    fn save(&self, section: &str, key: &str, value: &Value) -> Result<()>;

    /// Point delete by (section, key). Returns `false` if nothing was removed.
    fn delete(&self, section: &str, key: &str) -> Result<bool>;

    /// Every (key, value) of one section, in insertion order.
    fn scan(&self, section: &str) -> Result<Vec<(String, Value)>>;

    /// Names of all sections with at least one setting.
    fn sections(&self) -> Result<BTreeSet<String>>;

    fn count(&self, section: &str) -> Result<usize> {
        Ok(self.scan(section)?.len())
    }

    fn has_section(&self, section: &str) -> Result<bool> {
        Ok(self.count(section)? > 0)
    }
}

/// [`SettingsBackend`] over a pooled SQLite database.
///
/// Each call checks out its own connection, so every operation is a
/// separate round trip and autocommits.
#[derive(Clone)]
pub struct SqliteBackend {
    pool: DbPool,
}

impl SqliteBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Full row for a setting, including its timestamps.
    pub fn setting(&self, section: &str, key: &str) -> Result<Option<Setting>> {
        let conn = get_conn(&self.pool)?;
        settings::get_setting(&conn, section, key)
    }
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl SettingsBackend for SqliteBackend {
    fn load(&self, section: &str, key: &str) -> Result<Option<Value>> {
        tracing::trace!(section, key, "load setting");
        Ok(self.setting(section, key)?.map(|s| s.value))
    }

    fn save(&self, section: &str, key: &str, value: &Value) -> Result<()> {
        tracing::debug!(section, key, %value, "save setting");
        let conn = get_conn(&self.pool)?;
        settings::upsert_setting(&conn, section, key, value)?;
        Ok(())
    }

    fn delete(&self, section: &str, key: &str) -> Result<bool> {
        tracing::debug!(section, key, "delete setting");
        let conn = get_conn(&self.pool)?;
        settings::delete_setting(&conn, section, key)
    }

    fn scan(&self, section: &str) -> Result<Vec<(String, Value)>> {
        tracing::trace!(section, "scan section");
        let conn = get_conn(&self.pool)?;
        let rows = settings::list_settings(&conn, section)?;
        Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
    }

    fn sections(&self) -> Result<BTreeSet<String>> {
        let conn = get_conn(&self.pool)?;
        Ok(settings::list_sections(&conn)?.into_iter().collect())
    }

    fn count(&self, section: &str) -> Result<usize> {
        let conn = get_conn(&self.pool)?;
        settings::count_settings(&conn, section)
    }

    fn has_section(&self, section: &str) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        settings::section_exists(&conn, section)
    }
}
