//! Authentication service.
//!
//! Validates login and signup submissions and hands them to an
//! [`AuthProvider`]. Only [`MockAuthProvider`] exists; it signs everyone in
//! as the demo user after a fixed delay.

mod error;

pub use error::AuthError;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;

use keizok_core::Email;

use crate::models::Profile;
use crate::services::latency::{MockLatency, pause};

/// Minimum password length accepted at signup, in UTF-16 code units.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validated login submission.
#[derive(Debug)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

/// Validated signup submission.
#[derive(Debug)]
pub struct Registration {
    pub full_name: String,
    pub email: Email,
    pub password: SecretString,
}

/// Check a login form.
///
/// # Errors
///
/// Returns `AuthError::MissingField` if either field is empty, or
/// `AuthError::InvalidEmail` if the address is malformed.
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(Credentials {
        email: Email::parse(email)?,
        password: SecretString::from(password),
    })
}

/// Check a signup form.
///
/// Checks run in a fixed order: required fields and email shape first, then
/// that the confirmation matches, then the password length.
///
/// # Errors
///
/// Returns the first failing check as an [`AuthError`].
pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<Registration, AuthError> {
    if full_name.trim().is_empty() {
        return Err(AuthError::MissingField("full_name"));
    }
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    if password_confirm.is_empty() {
        return Err(AuthError::MissingField("password_confirm"));
    }
    let email = Email::parse(email)?;

    if password != password_confirm {
        return Err(AuthError::PasswordMismatch);
    }
    // Length in UTF-16 code units, as browsers measure form input.
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort);
    }

    Ok(Registration {
        full_name: full_name.trim().to_owned(),
        email,
        password: SecretString::from(password),
    })
}

/// Identity backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticate an existing user.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Profile, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, registration: &Registration) -> Result<Profile, AuthError>;
}

/// Provider that accepts any submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthProvider {
    latency: MockLatency,
}

impl MockAuthProvider {
    /// Create a provider with the given delays.
    #[must_use]
    pub const fn new(latency: MockLatency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    /// Always returns the demo profile, whatever was typed.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Profile, AuthError> {
        pause(self.latency.sign_in).await;
        tracing::debug!(email = %credentials.email, "Mock sign-in");
        Ok(Profile::demo(Utc::now())?)
    }

    /// Returns the demo user's ID carrying the submitted email and name.
    async fn sign_up(&self, registration: &Registration) -> Result<Profile, AuthError> {
        pause(self.latency.sign_up).await;
        let demo = Profile::demo(Utc::now())?;
        Ok(Profile {
            email: registration.email.clone(),
            full_name: Some(registration.full_name.clone()),
            ..demo
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_signup_mismatch_reported_before_length() {
        let err = validate_registration("Taro", "taro@example.com", "abc", "abd").unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(err.user_message(), "パスワードが一致しません");
    }

    #[test]
    fn test_signup_short_password() {
        let err = validate_registration("Taro", "taro@example.com", "abc12", "abc12").unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort));
        assert_eq!(err.user_message(), "パスワードは6文字以上で入力してください");
    }

    #[test]
    fn test_signup_six_characters_is_enough() {
        let registration =
            validate_registration(" 山田 太郎 ", "taro@example.com", "abc123", "abc123").unwrap();
        assert_eq!(registration.full_name, "山田 太郎");
        assert_eq!(registration.password.expose_secret(), "abc123");
    }

    #[test]
    fn test_signup_length_counts_characters() {
        assert!(validate_registration("Taro", "taro@example.com", "パスワード", "パスワード").is_err());
        assert!(
            validate_registration("Taro", "taro@example.com", "パスワードだ", "パスワードだ").is_ok()
        );
    }

    #[test]
    fn test_signup_length_counts_utf16_units() {
        // Each emoji is a surrogate pair.
        assert!(validate_registration("Taro", "taro@example.com", "😀😀😀", "😀😀😀").is_ok());
        assert!(matches!(
            validate_registration("Taro", "taro@example.com", "😀😀a", "😀😀a"),
            Err(AuthError::PasswordTooShort)
        ));
    }

    #[test]
    fn test_signup_required_fields_first() {
        let err = validate_registration("", "taro@example.com", "a", "b").unwrap_err();
        assert!(matches!(err, AuthError::MissingField("full_name")));
        assert_eq!(err.user_message(), "必須項目を入力してください");

        let err = validate_registration("Taro", "not-an-email", "a", "b").unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login("demo@example.com", "anything").is_ok());
        assert!(matches!(
            validate_login("", "x"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            validate_login("demo@example.com", ""),
            Err(AuthError::MissingField("password"))
        ));
        assert!(matches!(
            validate_login("demo", "x"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_sign_in_returns_demo_user() {
        let provider = MockAuthProvider::new(MockLatency::none());
        let credentials = validate_login("someone@example.com", "pw").unwrap();
        let profile = provider.sign_in(&credentials).await.unwrap();
        assert_eq!(profile.id.as_str(), "mock-user-123");
        assert_eq!(profile.email.as_str(), "demo@example.com");
    }

    #[tokio::test]
    async fn test_mock_sign_up_keeps_submitted_details() {
        let provider = MockAuthProvider::new(MockLatency::none());
        let registration =
            validate_registration("山田 太郎", "taro@example.com", "secret1", "secret1").unwrap();
        let profile = provider.sign_up(&registration).await.unwrap();
        assert_eq!(profile.id.as_str(), "mock-user-123");
        assert_eq!(profile.email.as_str(), "taro@example.com");
        assert_eq!(profile.full_name.as_deref(), Some("山田 太郎"));
    }
}
