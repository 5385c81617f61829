//! Authentication route handlers.
//!
//! Login and signup go through the configured [`AuthProvider`]; on success
//! the user is stored in the session and sent to `/home`.
//!
//! [`AuthProvider`]: crate::services::AuthProvider

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, Profile};
use crate::routes::views::{Flash, MessageQuery};
use crate::services::auth::{validate_login, validate_registration};
use crate::state::AppState;

const LOGIN_FAILED: &str = "ログインに失敗しました";
const SIGNUP_FAILED: &str = "登録に失敗しました";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
    pub error: Option<String>,
    pub email: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
    pub full_name: String,
    pub email: String,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Send signed-in users to `/home` and everyone else to `/login`.
pub async fn root(OptionalAuth(user): OptionalAuth) -> Redirect {
    if user.is_some() {
        Redirect::to("/home")
    } else {
        Redirect::to("/login")
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }

    LoginTemplate {
        flash: query.flash(),
        error: None,
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let rerender = |error: &str, email: String| {
        LoginTemplate {
            flash: None,
            error: Some(error.to_owned()),
            email,
        }
        .into_response()
    };

    let credentials = match validate_login(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(e) => return rerender(e.user_message(), form.email),
    };

    match state.auth().sign_in(&credentials).await {
        Ok(profile) => start_session(&session, &profile, "login").await,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            rerender(LOGIN_FAILED, form.email)
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }

    SignupTemplate {
        error: None,
        full_name: String::new(),
        email: String::new(),
    }
    .into_response()
}

/// Handle signup form submission.
///
/// Validation runs before the provider is contacted; a failing check
/// re-renders the form with the name and email kept.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Response {
    let rerender = |error: &str, form: SignupForm| {
        SignupTemplate {
            error: Some(error.to_owned()),
            full_name: form.full_name,
            email: form.email,
        }
        .into_response()
    };

    let registration = match validate_registration(
        &form.full_name,
        &form.email,
        &form.password,
        &form.password_confirm,
    ) {
        Ok(registration) => registration,
        Err(e) => {
            tracing::debug!(error = %e, "Signup rejected");
            return rerender(e.user_message(), form);
        }
    };

    match state.auth().sign_up(&registration).await {
        Ok(profile) => start_session(&session, &profile, "signup").await,
        Err(e) => {
            tracing::warn!(error = %e, "Signup failed");
            rerender(SIGNUP_FAILED, form)
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// End the session and return to the login page.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to end session");
    }
    clear_sentry_user();
    add_breadcrumb("auth", "Signed out", None);
    Redirect::to("/login")
}

/// Store the signed-in user and redirect home with a `?success=` code.
async fn start_session(session: &Session, profile: &Profile, code: &str) -> Response {
    let user = CurrentUser::from(profile);

    if let Err(e) = set_current_user(session, &user).await {
        tracing::error!(error = %e, "Failed to set session");
        return Redirect::to("/login?error=session").into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    add_breadcrumb("auth", "Signed in", Some(&[("method", code)]));
    tracing::info!(user_id = %user.id, "User signed in");

    Redirect::to(&format!("/home?success={code}")).into_response()
}
