//! Generated content repository.

use std::sync::Arc;

use async_trait::async_trait;

use keizok_core::{ContentId, UserId};

use super::{GENERATED_CONTENT_KEY, JsonArray, KvStore, RepositoryError};
use crate::models::GeneratedContent;
use crate::services::latency::{MockLatency, pause};

/// Storage operations for generated content. Records are append-only.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// All of the user's content, newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<GeneratedContent>, RepositoryError>;

    /// One record by ID.
    ///
    /// Returns `RepositoryError::NotFound` if the user has no such record.
    async fn get(&self, user: &UserId, id: &ContentId)
    -> Result<GeneratedContent, RepositoryError>;

    /// Store a record in first position.
    async fn create(&self, record: GeneratedContent) -> Result<GeneratedContent, RepositoryError>;
}

/// [`ContentRepository`] storing every record in the `mock_generated_content` array.
pub struct KvContentRepository {
    contents: JsonArray<GeneratedContent>,
    latency: MockLatency,
}

impl KvContentRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, latency: MockLatency) -> Self {
        Self {
            contents: JsonArray::new(store, GENERATED_CONTENT_KEY),
            latency,
        }
    }
}

#[async_trait]
impl ContentRepository for KvContentRepository {
    async fn list(&self, user: &UserId) -> Result<Vec<GeneratedContent>, RepositoryError> {
        pause(self.latency.load).await;
        let mut contents = self.contents.load().await?;
        contents.retain(|c| &c.user_id == user);
        Ok(contents)
    }

    async fn get(
        &self,
        user: &UserId,
        id: &ContentId,
    ) -> Result<GeneratedContent, RepositoryError> {
        self.contents
            .load()
            .await?
            .into_iter()
            .find(|c| &c.id == id && &c.user_id == user)
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, record: GeneratedContent) -> Result<GeneratedContent, RepositoryError> {
        self.contents
            .update(|contents| {
                contents.insert(0, record.clone());
                Ok(())
            })
            .await?;
        tracing::info!(content_id = %record.id, "Generated content stored");
        Ok(record)
    }
}
