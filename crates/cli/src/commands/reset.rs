//! Delete stored arrays.

use keizok_dashboard::db::KvStore;

use super::{CommandError, open_store, selected_keys};

/// Remove the selected keys from the store.
///
/// # Errors
///
/// Returns an error for an unknown key or if the store cannot be written.
pub async fn keys(key: Option<&str>) -> Result<(), CommandError> {
    let keys = selected_keys(key)?;
    let store = open_store().await?;

    for key in keys {
        if store.remove(key).await? {
            tracing::info!(key, "Key removed");
        } else {
            tracing::info!(key, "Key was not set");
        }
    }
    Ok(())
}
