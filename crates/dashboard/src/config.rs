//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit a local checkout.
//!
//! - `KEIZOK_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`,
//!   default: `sqlite://keizok.db?mode=rwc`)
//! - `KEIZOK_HOST` - Bind address (default: 127.0.0.1)
//! - `KEIZOK_PORT` - Listen port (default: 3000)
//! - `KEIZOK_BASE_URL` - Public URL of the dashboard (default: `http://localhost:3000`)
//! - `KEIZOK_MOCK_LATENCY` - `on` or `off`; `off` removes every simulated delay (default: on)
//! - `KEIZOK_RATE_LIMIT` - `on` or `off`; rate limiting of login/signup posts (default: on)
//! - `KEIZOK_MAX_UPLOAD_BYTES` - Largest accepted request body (default: 5242880)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::services::latency::MockLatency;

const DEFAULT_DATABASE_URL: &str = "sqlite://keizok.db?mode=rwc";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Simulated delays applied by the mock collaborators
    pub mock_latency: MockLatency,
    /// Whether login and signup submissions are rate limited
    pub rate_limit_auth: bool,
    /// Maximum request body size (the generation form carries an image)
    pub max_upload_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. `production`)
    pub sentry_environment: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_url: SecretString::from(DEFAULT_DATABASE_URL),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: DEFAULT_BASE_URL.to_owned(),
            mock_latency: MockLatency::standard(),
            rate_limit_auth: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = EnvSource { lookup };

        let database_url = vars
            .get("KEIZOK_DATABASE_URL")
            .or_else(|| vars.get("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let host = vars
            .get_or_default("KEIZOK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KEIZOK_HOST".to_string(), e.to_string()))?;
        let port = vars
            .get_or_default("KEIZOK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KEIZOK_PORT".to_string(), e.to_string()))?;

        let base_url = vars.get_or_default("KEIZOK_BASE_URL", DEFAULT_BASE_URL);
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("KEIZOK_BASE_URL".to_string(), e.to_string())
        })?;

        let mock_latency = if vars.get_switch("KEIZOK_MOCK_LATENCY")? {
            MockLatency::standard()
        } else {
            MockLatency::none()
        };
        let rate_limit_auth = vars.get_switch("KEIZOK_RATE_LIMIT")?;

        let max_upload_bytes = match vars.get("KEIZOK_MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("KEIZOK_MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            base_url,
            mock_latency,
            rate_limit_auth,
            max_upload_bytes,
            sentry_dsn: vars.get("SENTRY_DSN"),
            sentry_environment: vars.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the dashboard is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an `on`/`off` switch. Unset means on.
    fn get_switch(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("on" | "true" | "1") => Ok(true),
            Some("off" | "false" | "0") => Ok(false),
            Some(other) => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected on or off, got '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url.expose_secret(), DEFAULT_DATABASE_URL);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.mock_latency, MockLatency::standard());
        assert!(config.rate_limit_auth);
        assert_eq!(config.max_upload_bytes, 5_242_880);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "sqlite::memory:");

        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("KEIZOK_DATABASE_URL", "sqlite://other.db"),
        ])
        .unwrap();
        assert_eq!(config.database_url.expose_secret(), "sqlite://other.db");
    }

    #[test]
    fn test_latency_switch_off() {
        let config = load(&[("KEIZOK_MOCK_LATENCY", "off")]).unwrap();
        assert_eq!(config.mock_latency, MockLatency::none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            load(&[("KEIZOK_PORT", "seventy")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "KEIZOK_PORT"
        ));
        assert!(matches!(
            load(&[("KEIZOK_MOCK_LATENCY", "sometimes")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "KEIZOK_MOCK_LATENCY"
        ));
        assert!(load(&[("KEIZOK_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("KEIZOK_HOST", "localhost")]).is_err());
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = load(&[("KEIZOK_BASE_URL", "https://keizok.example")]).unwrap();
        assert!(config.is_secure());
    }
}
