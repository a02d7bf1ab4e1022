//! Mapping-style access to the settings of one section.

use std::fmt;
use std::sync::Arc;

use sqlcfg_core::{Error, Result, Value};

use crate::backend::{SettingsBackend, SqliteBackend};

/// A live view of one section.
///
/// Holds nothing but the section name and a handle to the backend: every
/// call goes straight to storage, and a section that has never been written
/// simply reads as empty.
pub struct Section<B = SqliteBackend> {
    name: Arc<str>,
    backend: Arc<B>,
}

impl<B> Clone for Section<B> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> fmt::Debug for Section<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section").field("name", &self.name).finish()
    }
}

impl<B: SettingsBackend> Section<B> {
    pub(crate) fn new(name: Arc<str>, backend: Arc<B>) -> Self {
        Self { name, backend }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored value for `key`, or [`Error::KeyNotFound`].
    pub fn get(&self, key: &str) -> Result<Value> {
        self.try_get(key)?
            .ok_or_else(|| Error::key_not_found(self.name(), key))
    }

    /// Stored value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        Ok(self.try_get(key)?.unwrap_or_else(|| default.into()))
    }

    pub fn try_get(&self, key: &str) -> Result<Option<Value>> {
        self.backend.load(&self.name, key)
    }

    /// Stored value converted to `T`.
    ///
    /// Fails with [`Error::TypeMismatch`] if the stored type differs.
    pub fn get_as<T>(&self, key: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.get(key)?)
    }

    /// Write `value` under `key`, creating or overwriting the row.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.backend.save(&self.name, key, &value.into())
    }

    /// Remove `key`, or fail with [`Error::KeyNotFound`].
    pub fn delete(&self, key: &str) -> Result<()> {
        if self.backend.delete(&self.name, key)? {
            Ok(())
        } else {
            Err(Error::key_not_found(self.name(), key))
        }
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.try_get(key)?.is_some())
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        self.backend.count(&self.name)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Keys in insertion order.
    ///
    /// Each call reads the section afresh; the returned iterator is a
    /// snapshot taken at that moment.
    pub fn keys(&self) -> Result<impl Iterator<Item = String>> {
        Ok(self.items()?.map(|(k, _)| k))
    }

    /// Values in insertion order.
    pub fn values(&self) -> Result<impl Iterator<Item = Value>> {
        Ok(self.items()?.map(|(_, v)| v))
    }

    /// (key, value) pairs in insertion order.
    pub fn items(&self) -> Result<impl Iterator<Item = (String, Value)>> {
        Ok(self.backend.scan(&self.name)?.into_iter())
    }

    /// [`set`](Self::set) every pair.
    ///
    /// Not transactional: the first failure is returned and the pairs
    /// written before it stay written.
    pub fn update<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Remove `key` and return its value, or fail with [`Error::KeyNotFound`].
    pub fn pop(&self, key: &str) -> Result<Value> {
        let value = self.get(key)?;
        self.delete(key)?;
        Ok(value)
    }

    /// Remove `key` and return its value, or `default` when absent.
    pub fn pop_or(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        match self.pop(key) {
            Err(e) if e.is_key_not_found() => Ok(default.into()),
            other => other,
        }
    }

    /// Stored value for `key`; when absent, store `default` and return it.
    pub fn set_default(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        if let Some(value) = self.try_get(key)? {
            return Ok(value);
        }
        let value = default.into();
        self.backend.save(&self.name, key, &value)?;
        Ok(value)
    }

    /// Delete every key. Afterwards the section no longer exists in the store.
    pub fn clear(&self) -> Result<()> {
        for key in self.keys()? {
            self.backend.delete(&self.name, &key)?;
        }
        Ok(())
    }
}
