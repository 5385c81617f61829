//! Seed the sample posts.

use std::sync::Arc;

use chrono::Utc;

use keizok_core::UserId;
use keizok_dashboard::db::{ContentRepository, KvContentRepository};
use keizok_dashboard::samples::sample_contents;
use keizok_dashboard::services::MockLatency;

use super::{CommandError, open_store};

/// Store the sample posts for `user` unless they already have content.
///
/// Samples are inserted oldest first so the list reads in sample order.
///
/// # Errors
///
/// Returns an error if the user ID is empty or the store cannot be used.
pub async fn samples(user: &str) -> Result<(), CommandError> {
    let user: UserId = user.parse()?;
    let store = Arc::new(open_store().await?);
    let contents = KvContentRepository::new(store, MockLatency::none());

    let existing = contents.list(&user).await?;
    if !existing.is_empty() {
        tracing::info!(
            user_id = %user,
            count = existing.len(),
            "User already has content, nothing seeded"
        );
        return Ok(());
    }

    let samples = sample_contents(&user, Utc::now());
    let count = samples.len();
    for record in samples.into_iter().rev() {
        contents.create(record).await?;
    }

    tracing::info!(user_id = %user, count, "Sample posts seeded");
    Ok(())
}
