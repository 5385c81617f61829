//! CLI subcommands.

pub mod export;
pub mod reset;
pub mod seed;

use thiserror::Error;

use keizok_dashboard::config::{ConfigError, DashboardConfig};
use keizok_dashboard::db::{ALL_KEYS, RepositoryError, SqliteKvStore};

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("unknown key {0:?} (expected one of: {keys})", keys = ALL_KEYS.join(", "))]
    UnknownKey(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid user id: {0}")]
    InvalidUser(#[from] keizok_core::IdError),
}

/// Open the configured store, applying migrations.
async fn open_store() -> Result<SqliteKvStore, CommandError> {
    let config = DashboardConfig::from_env()?;
    let store = SqliteKvStore::connect(&config.database_url).await?;
    tracing::info!("Connected to database");
    Ok(store)
}

/// The keys a command acts on: `key` alone, or every key.
fn selected_keys(key: Option<&str>) -> Result<Vec<&'static str>, CommandError> {
    match key {
        None => Ok(ALL_KEYS.to_vec()),
        Some(key) => ALL_KEYS
            .iter()
            .find(|k| **k == key)
            .map(|k| vec![*k])
            .ok_or_else(|| CommandError::UnknownKey(key.to_owned())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_keys() {
        assert_eq!(selected_keys(None).unwrap(), ALL_KEYS.to_vec());
        assert_eq!(
            selected_keys(Some("mock_ec_sites")).unwrap(),
            vec!["mock_ec_sites"]
        );
        assert!(matches!(
            selected_keys(Some("sessions")),
            Err(CommandError::UnknownKey(_))
        ));
    }
}
