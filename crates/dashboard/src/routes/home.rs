//! Generated content list.
//!
//! Users who have not generated anything yet see the sample posts, so the
//! page is never empty on first visit.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use keizok_core::{ContentId, ContentType};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, GeneratedContent};
use crate::routes::views::{Flash, MessageQuery, NavSection, NavView, SelectOption, format_date};
use crate::samples::sample_contents;
use crate::search::{ContentTypeFilter, filter_contents};
use crate::services::assets::{attachment_disposition, fetch_asset};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Search and filter parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// One post card.
#[derive(Debug, Clone)]
pub struct ContentCardView {
    pub id: String,
    pub product_name: String,
    pub image_url: String,
    pub is_video: bool,
    pub platform_label: &'static str,
    pub content_type_label: &'static str,
    pub date: String,
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl From<&GeneratedContent> for ContentCardView {
    fn from(item: &GeneratedContent) -> Self {
        Self {
            id: item.id.to_string(),
            product_name: item.product_name.clone(),
            image_url: item.generated_url.clone(),
            is_video: item.content_type == ContentType::Video,
            platform_label: item.platform.label(),
            content_type_label: item.content_type.label(),
            date: format_date(&item.created_at),
            caption: item.generated_caption.clone().unwrap_or_default(),
            hashtags: item.hashtags().into_iter().map(String::from).collect(),
        }
    }
}

/// Message shown when no card matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub body: &'static str,
    pub show_generate_link: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub flash: Option<Flash>,
    pub query: String,
    pub filter_options: Vec<SelectOption>,
    pub count_text: String,
    pub total_text: Option<String>,
    pub cards: Vec<ContentCardView>,
    pub empty: Option<EmptyState>,
}

// =============================================================================
// Helpers
// =============================================================================

/// The records the list is built from: the user's stored content, or the
/// samples when there is none or it cannot be read.
async fn visible_contents(state: &AppState, user: &CurrentUser) -> Vec<GeneratedContent> {
    match state.contents().list(&user.id).await {
        Ok(contents) if !contents.is_empty() => contents,
        Ok(_) => sample_contents(&user.id, Utc::now()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load contents, showing samples");
            sample_contents(&user.id, Utc::now())
        }
    }
}

async fn find_visible(state: &AppState, user: &CurrentUser, id: &str) -> Result<GeneratedContent> {
    let id: ContentId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("content {id}")))?;
    visible_contents(state, user)
        .await
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| AppError::NotFound(format!("content {id}")))
}

fn empty_state(total: usize, shown: usize) -> Option<EmptyState> {
    match (total, shown) {
        (0, _) => Some(EmptyState {
            title: "投稿がまだありません",
            body: "最初のInstagram投稿を生成してみましょう",
            show_generate_link: true,
        }),
        (_, 0) => Some(EmptyState {
            title: "該当する投稿が見つかりません",
            body: "検索条件を変更してみてください",
            show_generate_link: false,
        }),
        _ => None,
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the content list with search and type filter applied.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HomeQuery>,
) -> HomeTemplate {
    let contents = visible_contents(&state, &user).await;
    let search = query.q.unwrap_or_default();
    let filter = ContentTypeFilter::parse(query.content_type.as_deref());
    let shown = filter_contents(&contents, &search, filter);

    let filter_options = ContentTypeFilter::OPTIONS
        .iter()
        .map(|(option, label)| SelectOption {
            value: option.as_str(),
            label: *label,
            selected: *option == filter,
        })
        .collect();

    let flash = MessageQuery {
        error: query.error,
        success: query.success,
    }
    .flash();

    HomeTemplate {
        nav: NavView::new(&user, NavSection::Home),
        flash,
        filter_options,
        count_text: format!("{}件の投稿", shown.len()),
        total_text: (shown.len() != contents.len()).then(|| format!("（全{}件中）", contents.len())),
        empty: empty_state(contents.len(), shown.len()),
        cards: shown.into_iter().map(ContentCardView::from).collect(),
        query: search,
    }
}

/// Caption and hashtags as plain text, for the copy button.
#[instrument(skip(state, user))]
pub async fn copy_text(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response> {
    let item = find_visible(&state, &user, &id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        item.copy_text(),
    )
        .into_response())
}

/// Download the generated asset as `{product_name}.jpg`.
///
/// When the asset host cannot be reached the browser is sent to the asset
/// URL instead.
#[instrument(skip(state, user))]
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response> {
    let item = find_visible(&state, &user, &id).await?;

    match fetch_asset(state.http(), &item.generated_url).await {
        Ok(asset) => {
            let content_type = HeaderValue::from_str(&asset.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
            let disposition = HeaderValue::from_str(&attachment_disposition(
                &item.download_filename(),
            ))
            .map_err(|e| AppError::Internal(e.to_string()))?;

            Ok((
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                asset.bytes,
            )
                .into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, content_id = %item.id, "Asset download failed, redirecting");
            Ok(Redirect::to(&item.generated_url).into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_states() {
        assert_eq!(empty_state(0, 0).unwrap().title, "投稿がまだありません");
        assert!(empty_state(0, 0).unwrap().show_generate_link);
        assert_eq!(empty_state(5, 0).unwrap().title, "該当する投稿が見つかりません");
        assert!(!empty_state(5, 0).unwrap().show_generate_link);
        assert_eq!(empty_state(5, 2), None);
    }

    #[test]
    fn test_card_view() {
        let samples = sample_contents(&keizok_core::UserId::new("u"), Utc::now());
        let video = samples
            .iter()
            .find(|s| s.content_type == ContentType::Video)
            .unwrap();
        let card = ContentCardView::from(video);
        assert!(card.is_video);
        assert_eq!(card.content_type_label, "動画");
        assert_eq!(card.platform_label, "Instagram");
        assert!(card.hashtags.iter().all(|t| t.starts_with('#')));
    }
}
