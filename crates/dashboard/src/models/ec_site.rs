//! E-commerce site records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keizok_core::{EcPlatform, EcSiteId, UserId};

/// An external shop the user links to their account.
///
/// Implements `Debug` manually to redact the API credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcSite {
    pub id: EcSiteId,
    pub user_id: UserId,
    pub name: String,
    pub url: String,
    pub platform: EcPlatform,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for EcSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcSite")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("url", &self.url)
            .field("platform", &self.platform)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl EcSite {
    /// Build a new, active site owned by `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, input: EcSiteInput, now: DateTime<Utc>) -> Self {
        Self {
            id: EcSiteId::generate(),
            user_id,
            name: input.name,
            url: input.url,
            platform: input.platform,
            api_key: input.api_key,
            api_secret: input.api_secret,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and bump `updated_at`.
    pub fn apply(&mut self, input: EcSiteInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.url = input.url;
        self.platform = input.platform;
        self.api_key = input.api_key;
        self.api_secret = input.api_secret;
        self.updated_at = now;
    }

    /// Whether API credentials have been configured.
    #[must_use]
    pub const fn has_api_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Editable fields of an [`EcSite`].
#[derive(Clone, PartialEq, Eq)]
pub struct EcSiteInput {
    pub name: String,
    pub url: String,
    pub platform: EcPlatform,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl std::fmt::Debug for EcSiteInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcSiteInput")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("platform", &self.platform)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl EcSiteInput {
    /// Create an input, storing empty credentials as absent.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        platform: EcPlatform,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            platform,
            api_key: api_key.filter(|k| !k.is_empty()),
            api_secret: api_secret.filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn main_shop() -> EcSiteInput {
        EcSiteInput::new(
            "Main Shop",
            "https://shop.example.com",
            EcPlatform::Shopify,
            None,
            None,
        )
    }

    #[test]
    fn test_new_site_is_active() {
        let now = Utc::now();
        let site = EcSite::new(UserId::new("mock-user-123"), main_shop(), now);
        assert!(site.is_active);
        assert_eq!(site.created_at, now);
        assert_eq!(site.updated_at, now);
        assert!(site.id.as_str().starts_with("mock-"));
    }

    #[test]
    fn test_empty_credentials_become_none() {
        let input = EcSiteInput::new(
            "Shop",
            "https://x.example",
            EcPlatform::Base,
            Some(String::new()),
            Some("s3cr3t".to_owned()),
        );
        assert_eq!(input.api_key, None);
        assert_eq!(input.api_secret.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn test_apply_keeps_identity_and_activity() {
        let created = Utc::now() - chrono::Duration::hours(1);
        let mut site = EcSite::new(UserId::new("u"), main_shop(), created);
        site.is_active = false;
        let id = site.id.clone();

        let now = Utc::now();
        site.apply(
            EcSiteInput::new("Outlet", "https://outlet.example", EcPlatform::Stores, None, None),
            now,
        );

        assert_eq!(site.id, id);
        assert_eq!(site.name, "Outlet");
        assert_eq!(site.platform, EcPlatform::Stores);
        assert!(!site.is_active);
        assert_eq!(site.created_at, created);
        assert_eq!(site.updated_at, now);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let site = EcSite::new(
            UserId::new("u"),
            EcSiteInput::new(
                "Shop",
                "https://x.example",
                EcPlatform::Other,
                Some("key-123".to_owned()),
                Some("secret-456".to_owned()),
            ),
            Utc::now(),
        );
        let debug = format!("{site:?}");
        assert!(!debug.contains("key-123"));
        assert!(!debug.contains("secret-456"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_wire_format() {
        let site = EcSite::new(UserId::new("mock-user-123"), main_shop(), Utc::now());
        let value = serde_json::to_value(&site).unwrap();
        assert_eq!(value["platform"], "shopify");
        assert_eq!(value["is_active"], true);
        assert!(value["api_key"].is_null());
        assert!(value["api_secret"].is_null());
        assert_eq!(value["user_id"], "mock-user-123");
    }
}
