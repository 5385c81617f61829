//! Generated social-media content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keizok_core::{ContentId, ContentType, EcSiteId, SocialPlatform, UserId};

/// A single generated post: the asset reference plus its caption and hashtags.
///
/// Created by the generation form and never updated afterwards. Optional
/// fields default when missing so older stored arrays still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: ContentId,
    pub user_id: UserId,
    /// Modeled for a future association; no flow sets it.
    #[serde(default)]
    pub ec_site_id: Option<EcSiteId>,
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_image_url: Option<String>,
    pub platform: SocialPlatform,
    pub content_type: ContentType,
    pub generated_url: String,
    #[serde(default)]
    pub generated_caption: Option<String>,
    #[serde(default)]
    pub generated_hashtags: Option<String>,
    #[serde(default)]
    pub prompt_used: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl GeneratedContent {
    /// Caption and hashtags joined by a blank line, as pasted into a post.
    #[must_use]
    pub fn copy_text(&self) -> String {
        format!(
            "{}\n\n{}",
            self.generated_caption.as_deref().unwrap_or_default(),
            self.generated_hashtags.as_deref().unwrap_or_default()
        )
    }

    /// Individual hashtags, split on spaces.
    #[must_use]
    pub fn hashtags(&self) -> Vec<&str> {
        self.generated_hashtags
            .as_deref()
            .map(|tags| tags.split(' ').filter(|t| !t.is_empty()).collect())
            .unwrap_or_default()
    }

    /// File name offered when the asset is downloaded.
    #[must_use]
    pub fn download_filename(&self) -> String {
        format!("{}.jpg", self.product_name)
    }
}
