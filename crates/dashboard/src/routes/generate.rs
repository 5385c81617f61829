//! Content generation form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State, multipart::Field},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use keizok_core::{ContentType, InputMethod};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::routes::views::{Flash, MessageQuery, NavSection, NavView};
use crate::services::GenerationForm;
use crate::services::generation::UploadedImage;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Generation page template.
#[derive(Template, WebTemplate)]
#[template(path = "generate.html")]
pub struct GenerateTemplate {
    pub nav: NavView,
    pub flash: Option<Flash>,
    pub error: Option<String>,
    pub product_name: String,
    pub product_description: String,
    pub image_url: String,
    pub url_selected: bool,
    pub video_selected: bool,
}

impl GenerateTemplate {
    fn new(nav: NavView, form: &GenerationForm) -> Self {
        Self {
            nav,
            flash: None,
            error: None,
            product_name: form.product_name.clone(),
            product_description: form.product_description.clone(),
            image_url: form.image_url.clone(),
            url_selected: form.input_method == InputMethod::Url,
            video_selected: form.content_type == ContentType::Video,
        }
    }

    fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_owned());
        self
    }
}

// =============================================================================
// Form Parsing
// =============================================================================

async fn field_text(field: Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Read the multipart generation form.
///
/// Unknown fields are ignored; an empty file input counts as no upload.
async fn read_form(mut multipart: Multipart) -> Result<GenerationForm> {
    let mut form = GenerationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "product_name" => form.product_name = field_text(field).await?,
            "product_description" => form.product_description = field_text(field).await?,
            "image_url" => form.image_url = field_text(field).await?,
            "content_type" => {
                form.content_type = field_text(field)
                    .await?
                    .parse()
                    .map_err(|e: keizok_core::UnknownVariant| AppError::BadRequest(e.to_string()))?;
            }
            "input_method" => {
                form.input_method = field_text(field)
                    .await?
                    .parse()
                    .map_err(|e: keizok_core::UnknownVariant| AppError::BadRequest(e.to_string()))?;
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    form.upload = Some(UploadedImage {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

// =============================================================================
// Routes
// =============================================================================

/// Display the empty generation form.
pub async fn show(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> GenerateTemplate {
    GenerateTemplate {
        flash: query.flash(),
        ..GenerateTemplate::new(
            NavView::new(&user, NavSection::Generate),
            &GenerationForm::default(),
        )
    }
}

/// Handle a generation submission.
///
/// Validation and generation failures re-render the form with the
/// text fields kept; success returns to the list.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn generate(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let page = GenerateTemplate::new(NavView::new(&user, NavSection::Generate), &form);

    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => return Ok(page.with_error(e.user_message()).into_response()),
    };

    match state.generation().generate(&user.id, request).await {
        Ok(record) => {
            add_breadcrumb(
                "generate",
                "Content generated",
                Some(&[("content_id", record.id.as_str())]),
            );
            Ok(Redirect::to("/home?success=generated").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            Ok(page.with_error(e.user_message()).into_response())
        }
    }
}
