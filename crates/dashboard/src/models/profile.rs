//! User profile returned by the authentication provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keizok_core::{Email, UserId};

/// ID of the simulated signed-in user.
pub const DEMO_USER_ID: &str = "mock-user-123";

/// Email of the simulated signed-in user.
pub const DEMO_USER_EMAIL: &str = "demo@example.com";

/// Full name of the simulated signed-in user.
pub const DEMO_USER_NAME: &str = "デモユーザー";

/// A signed-in user's profile. Created at sign-in and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// The hard-coded demo profile, stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if [`DEMO_USER_EMAIL`] does not parse.
    pub fn demo(now: DateTime<Utc>) -> Result<Self, keizok_core::EmailError> {
        Ok(Self {
            id: UserId::new(DEMO_USER_ID),
            email: Email::parse(DEMO_USER_EMAIL)?,
            full_name: Some(DEMO_USER_NAME.to_owned()),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_profile() {
        let now = Utc::now();
        let profile = Profile::demo(now).unwrap();
        assert_eq!(profile.id.as_str(), "mock-user-123");
        assert_eq!(profile.email.as_str(), "demo@example.com");
        assert_eq!(profile.full_name.as_deref(), Some("デモユーザー"));
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn test_serializes_wire_fields() {
        let profile = Profile::demo(Utc::now()).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        for field in ["id", "email", "full_name", "avatar_url", "created_at", "updated_at"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert!(value["avatar_url"].is_null());
    }
}
