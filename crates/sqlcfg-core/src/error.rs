//! Unified error type for sqlcfg.
//!
//! [`Error::KeyNotFound`] is the only domain error and is an expected
//! control-flow signal. Everything coming out of the persistence layer is
//! wrapped in [`Error::Database`] with the original error kept as `source`.

/// Unified error type covering all failure modes in sqlcfg.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No setting exists for the (section, key) pair.
    #[error("key not found: [{section}] {key}")]
    KeyNotFound {
        /// Section that was searched.
        section: String,
        /// Key that was looked up.
        key: String,
    },

    /// A database operation failed.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored value did not have the type the caller asked for.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type requested by the caller.
        expected: &'static str,
        /// Type actually stored.
        found: &'static str,
    },

    /// Input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::KeyNotFound`].
    pub fn key_not_found(section: impl Into<String>, key: impl Into<String>) -> Self {
        Error::KeyNotFound {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// Whether this is the expected "absent key" signal rather than a failure.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
