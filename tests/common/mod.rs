//! Shared fixtures for integration tests.
//!
//! [`populated_store`] mirrors the usual three-setting fixture. [`MemoryBackend`]
//! is a plain in-process [`SettingsBackend`] that relies on the trait's
//! default `count`/`has_section`, so the store can be checked against
//! something other than SQLite.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Mutex;

use sqlcfg::{ConfigStore, Result, SettingsBackend, Value};

/// Empty store over a private in-memory database.
pub fn bare_store() -> ConfigStore {
    ConfigStore::in_memory().expect("failed to create in-memory store")
}

/// `base.key_a = 123`, `base.key_b = "KEY B"`, `other.key_a = 456`.
pub fn populated_store() -> ConfigStore {
    let store = bare_store();
    populate(&store);
    store
}

pub fn populate<B: SettingsBackend>(store: &ConfigStore<B>) {
    let base = store.section("base");
    base.set("key_a", 123).unwrap();
    base.set("key_b", "KEY B").unwrap();
    store.section("other").set("key_a", 456).unwrap();
}

/// Rows kept in insertion order in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: Mutex<Vec<(String, String, Value)>>,
}

impl SettingsBackend for MemoryBackend {
    fn load(&self, section: &str, key: &str) -> Result<Option<Value>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|(s, k, _)| s == section && k == key)
            .map(|(_, _, v)| v.clone()))
    }

    fn save(&self, section: &str, key: &str, value: &Value) -> Result<()> {
        value.encode()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|(s, k, _)| s == section && k == key) {
            Some(row) => row.2 = value.clone(),
            None => rows.push((section.to_string(), key.to_string(), value.clone())),
        }
        Ok(())
    }

    fn delete(&self, section: &str, key: &str) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(s, k, _)| !(s == section && k == key));
        Ok(rows.len() != before)
    }

    fn scan(&self, section: &str) -> Result<Vec<(String, Value)>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(s, _, _)| s == section)
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn sections(&self) -> Result<BTreeSet<String>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().map(|(s, _, _)| s.clone()).collect())
    }
}
