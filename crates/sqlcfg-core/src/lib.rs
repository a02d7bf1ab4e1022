//! sqlcfg-core: shared types for the sqlcfg crates.
//!
//! Provides the unified [`Error`] type, the [`Value`] scalar stored in every
//! setting, and the [`config::StoreConfig`] used to open a store.

pub mod config;
pub mod error;
pub mod value;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use value::Value;
