//! Authentication error types.

use thiserror::Error;

use super::MIN_PASSWORD_LENGTH;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was left empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] keizok_core::EmailError),

    /// Password and confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// Password is shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    /// The authentication provider failed.
    #[error("auth provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Message shown above the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "必須項目を入力してください",
            Self::InvalidEmail(_) => "有効なメールアドレスを入力してください",
            Self::PasswordMismatch => "パスワードが一致しません",
            Self::PasswordTooShort => "パスワードは6文字以上で入力してください",
            Self::Provider(_) => "認証サービスでエラーが発生しました",
        }
    }
}
