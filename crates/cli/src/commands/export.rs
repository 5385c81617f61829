//! Export stored arrays as JSON.

use std::io::Write;

use keizok_dashboard::db::KvStore;

use super::{CommandError, open_store, selected_keys};

/// Write `{ key: array }` for the selected keys to stdout.
///
/// Missing keys export as empty arrays; unparsable values are exported as
/// strings so nothing is lost.
///
/// # Errors
///
/// Returns an error for an unknown key or if the store cannot be read.
pub async fn keys(key: Option<&str>) -> Result<(), CommandError> {
    let keys = selected_keys(key)?;
    let store = open_store().await?;

    let mut output = serde_json::Map::new();
    for key in keys {
        let value = match store.get(key).await? {
            None => serde_json::Value::Array(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw)),
        };
        output.insert(key.to_owned(), value);
    }

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}
