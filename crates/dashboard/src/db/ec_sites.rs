//! EC site repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use keizok_core::{EcSiteId, UserId};

use super::{EC_SITES_KEY, JsonArray, KvStore, RepositoryError};
use crate::models::{EcSite, EcSiteInput};
use crate::services::latency::{MockLatency, pause};

/// Storage operations for a user's EC sites.
///
/// Records belonging to another user behave as if they did not exist.
#[async_trait]
pub trait EcSiteRepository: Send + Sync {
    /// All of the user's sites, newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<EcSite>, RepositoryError>;

    /// One site by ID.
    ///
    /// Returns `RepositoryError::NotFound` if the user has no such site.
    async fn get(&self, user: &UserId, id: &EcSiteId) -> Result<EcSite, RepositoryError>;

    /// Add a new active site in first position.
    async fn create(&self, user: &UserId, input: EcSiteInput) -> Result<EcSite, RepositoryError>;

    /// Replace a site's editable fields in place.
    async fn update(
        &self,
        user: &UserId,
        id: &EcSiteId,
        input: EcSiteInput,
    ) -> Result<EcSite, RepositoryError>;

    /// Remove a site, keeping the order of the rest.
    async fn delete(&self, user: &UserId, id: &EcSiteId) -> Result<(), RepositoryError>;

    /// Flip a site's `is_active` flag. No other field changes.
    async fn toggle_active(&self, user: &UserId, id: &EcSiteId)
    -> Result<EcSite, RepositoryError>;
}

/// [`EcSiteRepository`] storing every site in the `mock_ec_sites` array.
pub struct KvEcSiteRepository {
    sites: JsonArray<EcSite>,
    latency: MockLatency,
}

impl KvEcSiteRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, latency: MockLatency) -> Self {
        Self {
            sites: JsonArray::new(store, EC_SITES_KEY),
            latency,
        }
    }
}

fn position(sites: &[EcSite], user: &UserId, id: &EcSiteId) -> Result<usize, RepositoryError> {
    sites
        .iter()
        .position(|s| &s.id == id && &s.user_id == user)
        .ok_or(RepositoryError::NotFound)
}

#[async_trait]
impl EcSiteRepository for KvEcSiteRepository {
    async fn list(&self, user: &UserId) -> Result<Vec<EcSite>, RepositoryError> {
        pause(self.latency.load).await;
        let mut sites = self.sites.load().await?;
        sites.retain(|s| &s.user_id == user);
        Ok(sites)
    }

    async fn get(&self, user: &UserId, id: &EcSiteId) -> Result<EcSite, RepositoryError> {
        self.sites
            .load()
            .await?
            .into_iter()
            .find(|s| &s.id == id && &s.user_id == user)
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, user: &UserId, input: EcSiteInput) -> Result<EcSite, RepositoryError> {
        pause(self.latency.save).await;
        let site = EcSite::new(user.clone(), input, Utc::now());
        self.sites
            .update(|sites| {
                sites.insert(0, site.clone());
                Ok(())
            })
            .await?;
        tracing::info!(site_id = %site.id, platform = %site.platform, "EC site created");
        Ok(site)
    }

    async fn update(
        &self,
        user: &UserId,
        id: &EcSiteId,
        input: EcSiteInput,
    ) -> Result<EcSite, RepositoryError> {
        pause(self.latency.save).await;
        let site = self
            .sites
            .update(|sites| {
                let index = position(sites, user, id)?;
                let site = sites
                    .get_mut(index)
                    .ok_or(RepositoryError::NotFound)?;
                site.apply(input, Utc::now());
                Ok(site.clone())
            })
            .await?;
        tracing::info!(site_id = %site.id, "EC site updated");
        Ok(site)
    }

    async fn delete(&self, user: &UserId, id: &EcSiteId) -> Result<(), RepositoryError> {
        pause(self.latency.delete).await;
        self.sites
            .update(|sites| {
                let index = position(sites, user, id)?;
                sites.remove(index);
                Ok(())
            })
            .await?;
        tracing::info!(site_id = %id, "EC site deleted");
        Ok(())
    }

    async fn toggle_active(
        &self,
        user: &UserId,
        id: &EcSiteId,
    ) -> Result<EcSite, RepositoryError> {
        pause(self.latency.toggle).await;
        let site = self
            .sites
            .update(|sites| {
                let index = position(sites, user, id)?;
                let site = sites
                    .get_mut(index)
                    .ok_or(RepositoryError::NotFound)?;
                site.is_active = !site.is_active;
                Ok(site.clone())
            })
            .await?;
        tracing::info!(site_id = %site.id, is_active = site.is_active, "EC site toggled");
        Ok(site)
    }
}
