//! EC site settings route handlers.
//!
//! All writes redirect back to the list with a `?success=` or `?error=` code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use keizok_core::{EcPlatform, EcSiteId};

use crate::db::RepositoryError;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{EcSite, EcSiteInput};
use crate::routes::views::{Flash, MessageQuery, NavSection, NavView, SelectOption};
use crate::state::AppState;

const REQUIRED_FIELDS: &str = "必須項目を入力してください";

// =============================================================================
// Form Types
// =============================================================================

/// EC site form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EcSiteForm {
    pub name: String,
    pub url: String,
    pub platform: String,
    pub api_key: String,
    pub api_secret: String,
}

impl EcSiteForm {
    /// Check required fields and convert to a repository input.
    ///
    /// Name and URL are stored as typed; only empty values are rejected, so
    /// whitespace passes just as it does the browser's `required` check.
    fn validate(&self) -> Option<EcSiteInput> {
        if self.name.is_empty() || self.url.is_empty() {
            return None;
        }
        let platform: EcPlatform = self.platform.parse().ok()?;
        Some(EcSiteInput::new(
            self.name.clone(),
            self.url.clone(),
            platform,
            Some(self.api_key.clone()),
            Some(self.api_secret.clone()),
        ))
    }
}

impl From<&EcSite> for EcSiteForm {
    fn from(site: &EcSite) -> Self {
        Self {
            name: site.name.clone(),
            url: site.url.clone(),
            platform: site.platform.as_str().to_owned(),
            api_key: site.api_key.clone().unwrap_or_default(),
            api_secret: site.api_secret.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One site card on the list page.
#[derive(Debug, Clone)]
pub struct EcSiteCardView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub platform_label: &'static str,
    pub is_active: bool,
    pub has_api_credentials: bool,
}

impl From<&EcSite> for EcSiteCardView {
    fn from(site: &EcSite) -> Self {
        Self {
            id: site.id.to_string(),
            name: site.name.clone(),
            url: site.url.clone(),
            platform_label: site.platform.label(),
            is_active: site.is_active,
            has_api_credentials: site.has_api_credentials(),
        }
    }
}

/// EC site list template.
#[derive(Template, WebTemplate)]
#[template(path = "ec_sites/index.html")]
pub struct EcSitesTemplate {
    pub nav: NavView,
    pub flash: Option<Flash>,
    pub sites: Vec<EcSiteCardView>,
}

/// Add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "ec_sites/form.html")]
pub struct EcSiteFormTemplate {
    pub nav: NavView,
    pub flash: Option<Flash>,
    pub error: Option<String>,
    pub title: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub name: String,
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
    pub platform_options: Vec<SelectOption>,
}

impl EcSiteFormTemplate {
    fn create(nav: NavView, form: &EcSiteForm) -> Self {
        Self::build(nav, form, "ECサイトを追加", "/settings/ec-sites".to_owned(), "追加")
    }

    fn edit(nav: NavView, id: &EcSiteId, form: &EcSiteForm) -> Self {
        Self::build(
            nav,
            form,
            "ECサイトを編集",
            format!("/settings/ec-sites/{id}"),
            "更新",
        )
    }

    fn build(
        nav: NavView,
        form: &EcSiteForm,
        title: &'static str,
        action: String,
        submit_label: &'static str,
    ) -> Self {
        Self {
            nav,
            flash: None,
            error: None,
            title,
            action,
            submit_label,
            name: form.name.clone(),
            url: form.url.clone(),
            api_key: form.api_key.clone(),
            api_secret: form.api_secret.clone(),
            platform_options: platform_options(&form.platform),
        }
    }

    fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_owned());
        self
    }
}

/// Platform select entries with `selected` marked.
fn platform_options(selected: &str) -> Vec<SelectOption> {
    EcPlatform::ALL
        .iter()
        .map(|platform| SelectOption {
            value: platform.as_str(),
            label: platform.label(),
            selected: platform.as_str() == selected,
        })
        .collect()
}

fn parse_id(id: &str) -> Result<EcSiteId> {
    id.parse()
        .map_err(|_| AppError::NotFound(format!("EC site {id}")))
}

fn nav(user: &crate::models::CurrentUser) -> NavView {
    NavView::new(user, NavSection::EcSites)
}

// =============================================================================
// Routes
// =============================================================================

/// Display the user's sites, newest first.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> EcSitesTemplate {
    let (sites, flash) = match state.ec_sites().list(&user.id).await {
        Ok(sites) => (sites, query.flash()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load EC sites");
            (Vec::new(), Flash::error("site_load"))
        }
    };

    EcSitesTemplate {
        nav: nav(&user),
        flash,
        sites: sites.iter().map(EcSiteCardView::from).collect(),
    }
}

/// Display the empty add form.
pub async fn new_page(RequireAuth(user): RequireAuth) -> EcSiteFormTemplate {
    EcSiteFormTemplate::create(nav(&user), &EcSiteForm::default())
}

/// Handle the add form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<EcSiteForm>,
) -> Response {
    let Some(input) = form.validate() else {
        return EcSiteFormTemplate::create(nav(&user), &form)
            .with_error(REQUIRED_FIELDS)
            .into_response();
    };

    match state.ec_sites().create(&user.id, input).await {
        Ok(site) => {
            add_breadcrumb("ec_sites", "Site created", Some(&[("site_id", site.id.as_str())]));
            Redirect::to("/settings/ec-sites?success=site_created").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create EC site");
            Redirect::to("/settings/ec-sites?error=site_save").into_response()
        }
    }
}

/// Display the edit form for one site.
#[instrument(skip(state, user))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<EcSiteFormTemplate> {
    let id = parse_id(&id)?;
    let site = state.ec_sites().get(&user.id, &id).await?;
    Ok(EcSiteFormTemplate::edit(
        nav(&user),
        &id,
        &EcSiteForm::from(&site),
    ))
}

/// Handle the edit form.
#[instrument(skip_all, fields(user_id = %user.id, site_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Form(form): Form<EcSiteForm>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    let Some(input) = form.validate() else {
        return Ok(EcSiteFormTemplate::edit(nav(&user), &id, &form)
            .with_error(REQUIRED_FIELDS)
            .into_response());
    };

    match state.ec_sites().update(&user.id, &id, input).await {
        Ok(_) => Ok(Redirect::to("/settings/ec-sites?success=site_updated").into_response()),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("EC site {id}"))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update EC site");
            Ok(Redirect::to("/settings/ec-sites?error=site_save").into_response())
        }
    }
}

/// Delete one site. The confirmation prompt runs in the browser.
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = parse_id(&id)?;

    match state.ec_sites().delete(&user.id, &id).await {
        Ok(()) => {
            add_breadcrumb("ec_sites", "Site deleted", Some(&[("site_id", id.as_str())]));
            Ok(Redirect::to("/settings/ec-sites?success=site_deleted"))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("EC site {id}"))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete EC site");
            Ok(Redirect::to("/settings/ec-sites?error=site_delete"))
        }
    }
}

/// Flip one site's active flag.
#[instrument(skip(state, user))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = parse_id(&id)?;

    match state.ec_sites().toggle_active(&user.id, &id).await {
        Ok(site) if site.is_active => Ok(Redirect::to("/settings/ec-sites?success=site_enabled")),
        Ok(_) => Ok(Redirect::to("/settings/ec-sites?success=site_disabled")),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("EC site {id}"))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to toggle EC site");
            Ok(Redirect::to("/settings/ec-sites?error=site_toggle"))
        }
    }
}
