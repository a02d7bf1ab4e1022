//! Connection pool management for SQLite via r2d2.

use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use sqlcfg_core::config::DatabaseConfig;
use sqlcfg_core::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a database pool backed by a file on disk, using default
/// connection settings.
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let config = DatabaseConfig {
        path: Some(db_path.into()),
        ..DatabaseConfig::default()
    };
    open_pool(&config)
}

/// Initialize an in-memory database pool (useful for tests).
///
/// Each call creates a separate database, so parallel tests do not
/// interfere with each other.
pub fn init_memory_pool() -> Result<DbPool> {
    open_pool(&DatabaseConfig::default())
}

/// Open a pool as described by `config` and run pending migrations.
///
/// A file database gets `busy_timeout` and, if enabled, WAL journaling on
/// every new connection. Without a path a private in-memory database is
/// created behind exactly one connection that is never recycled: the data
/// lives only as long as that connection, and callers on other threads
/// queue on checkout rather than racing for SQLite table locks, which
/// `busy_timeout` does not cover.
pub fn open_pool(config: &DatabaseConfig) -> Result<DbPool> {
    if config.pool_size == 0 {
        return Err(Error::Validation(
            "database.pool_size must be at least 1".into(),
        ));
    }

    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    let (manager, max_size) = match &config.path {
        Some(path) => {
            let wal = config.wal;
            let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
                conn.busy_timeout(busy_timeout)?;
                if wal {
                    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                }
                Ok(())
            });
            (manager, config.pool_size)
        }
        None => {
            let manager = SqliteConnectionManager::memory()
                .with_init(move |conn| conn.busy_timeout(busy_timeout));
            (manager, 1)
        }
    };

    let mut builder = Pool::builder().max_size(max_size);
    if config.path.is_none() {
        builder = builder.max_lifetime(None).idle_timeout(None);
    }

    let pool = builder
        .build(manager)
        .map_err(Error::database)?;

    let conn = get_conn(&pool)?;
    migrations::run_migrations(&conn)?;

    match &config.path {
        Some(path) => tracing::info!(
            "Opened settings database at {} (pool size {})",
            path.display(),
            config.pool_size
        ),
        None => tracing::info!("Opened in-memory settings database"),
    }

    Ok(pool)
}

/// Convenience helper to get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get().map_err(Error::database)
}
