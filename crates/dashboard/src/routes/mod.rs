//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                 - Redirect to /home or /login
//!
//! # Auth
//! GET  /login                            - Login page
//! POST /login                            - Login action (rate limited)
//! GET  /signup                           - Signup page
//! POST /signup                           - Signup action (rate limited)
//! POST /logout                           - End the session
//!
//! # Content (requires auth)
//! GET  /home?q=&type=                    - Post list with search and filter
//! GET  /home/{id}/copy-text              - Caption and hashtags as text
//! GET  /home/{id}/download               - Asset download
//! GET  /generate                         - Generation form
//! POST /generate                         - Generate (multipart)
//!
//! # EC sites (requires auth)
//! GET  /settings/ec-sites                - Site list
//! POST /settings/ec-sites                - Create site
//! GET  /settings/ec-sites/new            - Create form
//! GET  /settings/ec-sites/{id}/edit      - Edit form
//! POST /settings/ec-sites/{id}           - Update site
//! POST /settings/ec-sites/{id}/delete    - Delete site
//! POST /settings/ec-sites/{id}/toggle    - Flip active flag
//! ```

pub mod auth;
pub mod ec_sites;
pub mod generate;
pub mod home;
pub mod views;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::middleware::RateLimiterLayer;
use crate::state::AppState;

/// Create the auth routes router.
///
/// `limiter` applies to the login and signup submissions only; the pages
/// themselves are never limited.
pub fn auth_routes(limiter: Option<RateLimiterLayer>) -> Router<AppState> {
    let mut login = post(auth::login);
    let mut signup = post(auth::signup);
    if let Some(limiter) = limiter {
        login = login.route_layer(limiter.clone());
        signup = signup.route_layer(limiter);
    }

    Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).merge(login))
        .route("/signup", get(auth::signup_page).merge(signup))
        .route("/logout", post(auth::logout))
}

/// Create the content routes router.
pub fn content_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/home", get(home::index))
        .route("/home/{id}/copy-text", get(home::copy_text))
        .route("/home/{id}/download", get(home::download))
        .route(
            "/generate",
            get(generate::show)
                .merge(post(generate::generate).layer(DefaultBodyLimit::max(max_upload_bytes))),
        )
}

/// Create the EC site settings routes router.
pub fn ec_site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ec_sites::index).post(ec_sites::create))
        .route("/new", get(ec_sites::new_page))
        .route("/{id}", post(ec_sites::update))
        .route("/{id}/edit", get(ec_sites::edit_page))
        .route("/{id}/delete", post(ec_sites::delete))
        .route("/{id}/toggle", post(ec_sites::toggle))
}

/// Create all routes for the dashboard.
pub fn routes(max_upload_bytes: usize, limiter: Option<RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .merge(auth_routes(limiter))
        .merge(content_routes(max_upload_bytes))
        .nest("/settings/ec-sites", ec_site_routes())
}
