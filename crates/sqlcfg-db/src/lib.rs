//! sqlcfg-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage for settings with connection
//! pooling, embedded migrations, a typed [`models::Setting`] row, and the
//! query functions in [`queries::settings`].

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
