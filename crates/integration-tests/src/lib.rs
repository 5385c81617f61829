//! Integration tests for Keizok.
//!
//! Each test starts the dashboard on an ephemeral port with in-memory
//! session and data stores, then drives it over HTTP with a cookie-keeping
//! client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p keizok-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, redirect::Policy};
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

use keizok_dashboard::config::DashboardConfig;
use keizok_dashboard::db::{KvStore, MemoryKvStore};
use keizok_dashboard::services::{AuthProvider, ContentGenerator, MockLatency};
use keizok_dashboard::state::AppState;

/// A dashboard running in the background for one test.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub store: Arc<dyn KvStore>,
}

impl TestApp {
    /// Start a dashboard with every mock collaborator.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        TestAppBuilder::default().spawn().await
    }

    /// Start configuring a dashboard.
    #[must_use]
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sign in as the demo user.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or does not redirect home.
    pub async fn login(&self) {
        let resp = self
            .client
            .post(self.url("/login"))
            .form(&[("email", "demo@example.com"), ("password", "secret1")])
            .send()
            .await
            .expect("login request");
        assert_eq!(location(&resp), "/home?success=login");
    }
}

/// Builder for [`TestApp`].
#[derive(Default)]
pub struct TestAppBuilder {
    auth: Option<Arc<dyn AuthProvider>>,
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl TestAppBuilder {
    /// Use `auth` instead of the mock provider.
    #[must_use]
    pub fn auth_provider(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Use `generator` instead of the mock generator.
    #[must_use]
    pub fn content_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Bind an ephemeral port and serve the dashboard on it.
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound or the client cannot be built.
    pub async fn spawn(self) -> TestApp {
        let config = DashboardConfig {
            mock_latency: MockLatency::none(),
            rate_limit_auth: false,
            ..DashboardConfig::default()
        };
        let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());

        let mut builder = AppState::builder(config, store.clone());
        if let Some(auth) = self.auth {
            builder = builder.auth_provider(auth);
        }
        if let Some(generator) = self.generator {
            builder = builder.content_generator(generator);
        }
        let state = builder.build().expect("state");
        let app = keizok_dashboard::app(state, MemoryStore::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("server");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("client");

        TestApp {
            base_url: format!("http://{addr}"),
            client,
            store,
        }
    }
}

/// The `Location` header of a redirect response, or an empty string.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}
