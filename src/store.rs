//! The top-level section registry.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use sqlcfg_core::config::StoreConfig;
use sqlcfg_core::{Result, Value};
use sqlcfg_db::pool::{open_pool, DbPool};

use crate::backend::{SettingsBackend, SqliteBackend};
use crate::section::Section;

/// Sectioned settings over a [`SettingsBackend`].
///
/// Handing out a [`Section`] never touches storage; a section exists only
/// while it holds at least one key. Handles are memoized per store in an
/// unsynchronized map, so a store is meant to be owned by one thread.
pub struct ConfigStore<B = SqliteBackend> {
    backend: Arc<B>,
    sections: RefCell<HashMap<String, Section<B>>>,
}

impl ConfigStore<SqliteBackend> {
    /// Open the database described by `config`, creating the settings table
    /// if needed.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.check()?;
        for warning in config.validate() {
            tracing::warn!("{warning}");
        }
        let pool = open_pool(&config.database)?;
        Ok(Self::from_pool(pool))
    }

    /// A store over a fresh private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let pool = sqlcfg_db::pool::init_memory_pool()?;
        Ok(Self::from_pool(pool))
    }

    /// A store over an existing, already migrated pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self::new(SqliteBackend::new(pool))
    }
}

impl<B: SettingsBackend> ConfigStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    /// Share a backend that other stores or sections may also hold.
    pub fn with_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            sections: RefCell::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Accessor for section `name`. Writes nothing.
    pub fn section(&self, name: &str) -> Section<B> {
        let mut cache = self.sections.borrow_mut();
        if let Some(section) = cache.get(name) {
            return section.clone();
        }
        let section = Section::new(Arc::from(name), Arc::clone(&self.backend));
        cache.insert(name.to_string(), section.clone());
        section
    }

    /// Whether `name` currently holds at least one key.
    pub fn contains_section(&self, name: &str) -> Result<bool> {
        self.backend.has_section(name)
    }

    /// Names of all sections holding at least one key.
    pub fn sections(&self) -> Result<BTreeSet<String>> {
        self.backend.sections()
    }

    pub fn get(&self, section: &str, key: &str) -> Result<Value> {
        self.section(section).get(key)
    }

    pub fn get_or(&self, section: &str, key: &str, default: impl Into<Value>) -> Result<Value> {
        self.section(section).get_or(key, default)
    }

    pub fn set(&self, section: &str, key: &str, value: impl Into<Value>) -> Result<()> {
        self.section(section).set(key, value)
    }

    pub fn delete(&self, section: &str, key: &str) -> Result<()> {
        self.section(section).delete(key)
    }
}

impl<B> fmt::Debug for ConfigStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("cached_sections", &self.sections.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ConfigStore {
        let store = ConfigStore::in_memory().unwrap();
        store.set("base", "key_a", 123).unwrap();
        store.set("base", "key_b", "KEY B").unwrap();
        store.set("other", "key_a", 456).unwrap();
        store
    }

    #[test]
    fn no_sections() {
        let store = ConfigStore::in_memory().unwrap();
        assert!(store.sections().unwrap().is_empty());
    }

    #[test]
    fn sections_grow_with_writes() {
        let store = ConfigStore::in_memory().unwrap();

        store.set("base", "key_a", 123).unwrap();
        assert_eq!(store.sections().unwrap(), BTreeSet::from(["base".to_string()]));

        store.set("other", "key_a", 456).unwrap();
        assert_eq!(
            store.sections().unwrap(),
            BTreeSet::from(["base".to_string(), "other".to_string()])
        );
    }

    #[test]
    fn accessing_a_section_writes_nothing() {
        let store = ConfigStore::in_memory().unwrap();
        let s = store.section("lazy");

        assert_eq!(s.len().unwrap(), 0);
        assert!(!store.contains_section("lazy").unwrap());
        assert!(store.sections().unwrap().is_empty());
    }

    #[test]
    fn contains_section() {
        let store = populated();
        assert!(store.contains_section("base").unwrap());
        assert!(!store.contains_section("dne").unwrap());
    }

    #[test]
    fn emptied_section_disappears() {
        let store = populated();
        store.delete("other", "key_a").unwrap();

        assert!(!store.contains_section("other").unwrap());
        assert_eq!(store.sections().unwrap(), BTreeSet::from(["base".to_string()]));
    }

    #[test]
    fn section_handles_are_memoized() {
        let store = ConfigStore::in_memory().unwrap();
        let a = store.section("base");
        let b = store.section("base");

        assert!(std::ptr::eq(a.name(), b.name()));
        assert_eq!(store.sections.borrow().len(), 1);
    }

    #[test]
    fn scenario() {
        let store = populated();
        let base = store.section("base");

        assert_eq!(base.len().unwrap(), 2);
        assert_eq!(base.get("key_a").unwrap(), Value::Integer(123));
        assert_eq!(base.get_or("dne", 56).unwrap(), Value::Integer(56));
        assert!(store.get("no_way_jose", "does_not_exist").unwrap_err().is_key_not_found());
        assert_eq!(
            store.sections().unwrap(),
            BTreeSet::from(["base".to_string(), "other".to_string()])
        );
    }

    #[test]
    fn open_rejects_bad_config() {
        let mut config = StoreConfig::default();
        config.database.pool_size = 0;
        assert!(ConfigStore::open(&config).is_err());
    }
}
