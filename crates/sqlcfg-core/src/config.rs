//! Store configuration types.
//!
//! [`StoreConfig`] is deserialized from JSON. Every field defaults sensibly
//! so a completely empty `{}` file is valid and opens an in-memory store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Root configuration for opening a config store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
}

impl StoreConfig {
    /// Deserialize a `StoreConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// [`load`](Self::load), or defaults when there is no usable file.
    ///
    /// An absent file is normal and only logged at info level; a file that
    /// exists but cannot be read or parsed is reported as a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io { source }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "store config absent, opening with defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store config unusable, opening with defaults");
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let db = &self.database;

        if db.path.is_none() {
            warnings.push("database.path is not set; settings will not outlive the store".into());
        }
        if db.path.is_none() && db.wal {
            warnings.push("database.wal has no effect on an in-memory database".into());
        }
        if db.path.is_none() && db.pool_size > 1 {
            warnings.push(
                "database.pool_size is ignored for an in-memory database (one connection)".into(),
            );
        }
        if db.path.is_some() && db.busy_timeout_ms == 0 && db.pool_size > 1 {
            warnings.push(
                "database.busy_timeout_ms is 0; concurrent writers will fail immediately".into(),
            );
        }

        warnings
    }

    /// Reject configurations that cannot open a store.
    pub fn check(&self) -> Result<()> {
        if self.database.pool_size == 0 {
            return Err(Error::Validation(
                "database.pool_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Where and how settings are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file. `None` opens a private in-memory database.
    pub path: Option<PathBuf>,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
    /// Enable WAL journaling on file databases.
    pub wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            pool_size: 4,
            busy_timeout_ms: 5000,
            wal: true,
        }
    }
}
