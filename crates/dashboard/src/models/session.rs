//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use keizok_core::{Email, UserId};

use super::Profile;

/// Fallback shown in the navbar when the user has no name.
const ANONYMOUS_DISPLAY_NAME: &str = "ユーザー";

/// Session-stored user identity.
///
/// Created at sign-in, removed at sign-out. Absence means signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID that scopes every stored record.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Full name, if the user gave one.
    pub full_name: Option<String>,
}

impl CurrentUser {
    /// Name shown in the navbar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_DISPLAY_NAME)
    }

    /// Up to two uppercase initials taken from the space-separated parts of
    /// the full name, or `U` when there is nothing to take them from.
    #[must_use]
    pub fn initials(&self) -> String {
        let Some(name) = self.full_name.as_deref() else {
            return "U".to_owned();
        };

        let initials: String = name
            .split(' ')
            .filter_map(|part| part.chars().next())
            .collect::<String>()
            .to_uppercase()
            .chars()
            .take(2)
            .collect();

        if initials.is_empty() {
            "U".to_owned()
        } else {
            initials
        }
    }
}

impl From<&Profile> for CurrentUser {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: UserId::new("mock-user-123"),
            email: Email::parse("demo@example.com").unwrap(),
            full_name: full_name.map(String::from),
        }
    }

    #[test]
    fn test_initials_two_parts() {
        assert_eq!(user(Some("taro yamada")).initials(), "TY");
        assert_eq!(user(Some("山田 太郎")).initials(), "山太");
    }

    #[test]
    fn test_initials_keeps_first_two() {
        assert_eq!(user(Some("ada byron king lovelace")).initials(), "AB");
    }

    #[test]
    fn test_initials_single_part() {
        assert_eq!(user(Some("デモユーザー")).initials(), "デ");
    }

    #[test]
    fn test_initials_fallback() {
        assert_eq!(user(None).initials(), "U");
        assert_eq!(user(Some("")).initials(), "U");
        assert_eq!(user(Some("   ")).initials(), "U");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(user(Some("デモユーザー")).display_name(), "デモユーザー");
        assert_eq!(user(None).display_name(), "ユーザー");
        assert_eq!(user(Some("")).display_name(), "ユーザー");
    }
}
