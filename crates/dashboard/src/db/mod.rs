//! Persistence for the dashboard.
//!
//! # Layout
//!
//! Everything lives in a single key-value table. Each key holds one JSON
//! array of records, newest first:
//!
//! - `mock_generated_content` - [`GeneratedContent`](crate::models::GeneratedContent)
//! - `mock_ec_sites` - [`EcSite`](crate::models::EcSite)
//!
//! Handlers never touch the store directly; they go through the
//! [`EcSiteRepository`] and [`ContentRepository`] traits so a real backend can
//! replace the key-value implementation.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/dashboard/migrations/` and embedded in the
//! binary; [`SqliteKvStore::connect`] applies them.

pub mod contents;
pub mod ec_sites;
pub mod json_array;
pub mod kv;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

pub use contents::{ContentRepository, KvContentRepository};
pub use ec_sites::{EcSiteRepository, KvEcSiteRepository};
pub use json_array::JsonArray;
pub use kv::{KvStore, MemoryKvStore, SqliteKvStore};

/// Key holding the generated content array.
pub const GENERATED_CONTENT_KEY: &str = "mock_generated_content";

/// Key holding the EC site array.
pub const EC_SITES_KEY: &str = "mock_ec_sites";

/// Every key the dashboard writes.
pub const ALL_KEYS: [&str; 2] = [GENERATED_CONTENT_KEY, EC_SITES_KEY];

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
