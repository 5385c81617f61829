//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::db::{
    ContentRepository, EcSiteRepository, KvContentRepository, KvEcSiteRepository, KvStore,
};
use crate::services::{
    AuthProvider, ContentGenerator, GenerationService, MockAuthProvider, MockContentGenerator,
};

/// Timeout for outbound asset downloads.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; every collaborator sits behind a trait object
/// so tests and future backends can swap them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    store: Arc<dyn KvStore>,
    ec_sites: Arc<dyn EcSiteRepository>,
    contents: Arc<dyn ContentRepository>,
    auth: Arc<dyn AuthProvider>,
    generator: Arc<dyn ContentGenerator>,
    http: reqwest::Client,
}

impl AppState {
    /// Start building state over `store` with the mock collaborators.
    #[must_use]
    pub fn builder(config: DashboardConfig, store: Arc<dyn KvStore>) -> AppStateBuilder {
        AppStateBuilder {
            config,
            store,
            auth: None,
            generator: None,
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get the key-value store backing the repositories.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.inner.store
    }

    /// Get the EC site repository.
    #[must_use]
    pub fn ec_sites(&self) -> &dyn EcSiteRepository {
        self.inner.ec_sites.as_ref()
    }

    /// Get the generated content repository.
    #[must_use]
    pub fn contents(&self) -> &dyn ContentRepository {
        self.inner.contents.as_ref()
    }

    /// Get the authentication provider.
    #[must_use]
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get a generation service wired to the configured generator.
    #[must_use]
    pub fn generation(&self) -> GenerationService {
        GenerationService::new(self.inner.generator.clone(), self.inner.contents.clone())
    }

    /// Get the HTTP client used for asset downloads.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }
}

/// Builder for [`AppState`].
pub struct AppStateBuilder {
    config: DashboardConfig,
    store: Arc<dyn KvStore>,
    auth: Option<Arc<dyn AuthProvider>>,
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl AppStateBuilder {
    /// Replace the mock authentication provider.
    #[must_use]
    pub fn auth_provider(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Replace the mock content generator.
    #[must_use]
    pub fn content_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<AppState, reqwest::Error> {
        let latency = self.config.mock_latency;
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let ec_sites = Arc::new(KvEcSiteRepository::new(self.store.clone(), latency));
        let contents = Arc::new(KvContentRepository::new(self.store.clone(), latency));
        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(MockAuthProvider::new(latency)));
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(MockContentGenerator::new(latency)));

        Ok(AppState {
            inner: Arc::new(AppStateInner {
                config: self.config,
                store: self.store,
                ec_sites,
                contents,
                auth,
                generator,
                http,
            }),
        })
    }
}
