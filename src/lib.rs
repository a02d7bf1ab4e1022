//! sqlcfg: sectioned key/value settings persisted in one SQLite table.
//!
//! A [`ConfigStore`] maps section names to [`Section`] views; each view maps
//! keys to typed scalar [`Value`]s. Every read and write goes straight to
//! the database, so there is nothing to flush or invalidate.
//!
//! # Example
//!
//! ```
//! use sqlcfg::{ConfigStore, Value};
//!
//! let store = ConfigStore::in_memory()?;
//! let base = store.section("base");
//!
//! base.set("key_a", 123)?;
//! base.set("key_b", "KEY B")?;
//!
//! assert_eq!(base.get("key_a")?, Value::Integer(123));
//! assert_eq!(base.get_or("dne", 56)?, Value::Integer(56));
//! assert!(store.contains_section("base")?);
//! # Ok::<(), sqlcfg::Error>(())
//! ```

pub mod backend;
pub mod section;
pub mod store;

pub use backend::{SettingsBackend, SqliteBackend};
pub use section::Section;
pub use sqlcfg_core::config::{DatabaseConfig, StoreConfig};
pub use sqlcfg_core::{Error, Result, Value};
pub use store::ConfigStore;
