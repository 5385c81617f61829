//! Content generation service.
//!
//! Validates the generation form, asks a [`ContentGenerator`] for an asset
//! and stores the resulting [`GeneratedContent`] record.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use thiserror::Error;

use keizok_core::{ContentId, ContentType, InputMethod, SocialPlatform, UserId};

use crate::db::{ContentRepository, RepositoryError};
use crate::models::GeneratedContent;
use crate::services::latency::{MockLatency, pause};

/// Base URL of the placeholder images returned by [`MockContentGenerator`].
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/1080x1080/4299e1/ffffff";

/// Errors that can occur while generating content.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Product name was left empty.
    #[error("product name is required")]
    MissingProductName,

    /// Upload mode was chosen but no file was sent.
    #[error("an image upload is required")]
    MissingUpload,

    /// URL mode was chosen but no URL was given.
    #[error("an image URL is required")]
    MissingImageUrl,

    /// The generator failed.
    #[error("generator error: {0}")]
    Generator(String),

    /// Storing the record failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl GenerationError {
    /// Message shown above the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingProductName => "商品名を入力してください",
            Self::MissingUpload => "画像をアップロードしてください",
            Self::MissingImageUrl => "画像URLを入力してください",
            Self::Generator(_) | Self::Repository(_) => "生成に失敗しました",
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// An uploaded product image.
#[derive(Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where the product image came from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Upload(UploadedImage),
    Url(String),
}

impl ImageSource {
    /// How the image was supplied.
    #[must_use]
    pub const fn input_method(&self) -> InputMethod {
        match self {
            Self::Upload(_) => InputMethod::Upload,
            Self::Url(_) => InputMethod::Url,
        }
    }

    /// URL stored as `product_image_url`: the given URL, or a `data:` URL
    /// embedding the upload.
    #[must_use]
    pub fn preview_url(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Upload(image) => format!(
                "data:{};base64,{}",
                image.content_type,
                BASE64.encode(&image.bytes)
            ),
        }
    }
}

/// Raw generation form as submitted.
#[derive(Debug, Clone, Default)]
pub struct GenerationForm {
    pub product_name: String,
    pub product_description: String,
    pub content_type: ContentType,
    pub input_method: InputMethod,
    pub image_url: String,
    pub upload: Option<UploadedImage>,
}

impl GenerationForm {
    /// Check required fields in the order the form presents them.
    ///
    /// # Errors
    ///
    /// Returns the first missing field as a [`GenerationError`].
    pub fn validate(self) -> Result<GenerationRequest, GenerationError> {
        if self.product_name.is_empty() {
            return Err(GenerationError::MissingProductName);
        }

        let image = match self.input_method {
            InputMethod::Upload => ImageSource::Upload(
                self.upload
                    .filter(|u| !u.bytes.is_empty())
                    .ok_or(GenerationError::MissingUpload)?,
            ),
            InputMethod::Url => {
                if self.image_url.is_empty() {
                    return Err(GenerationError::MissingImageUrl);
                }
                ImageSource::Url(self.image_url)
            }
        };

        Ok(GenerationRequest {
            product_name: self.product_name,
            product_description: Some(self.product_description).filter(|d| !d.is_empty()),
            content_type: self.content_type,
            image,
        })
    }
}

/// A validated generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub product_name: String,
    pub product_description: Option<String>,
    pub content_type: ContentType,
    pub image: ImageSource,
}

/// What a generator produces for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub url: String,
    pub caption: String,
    pub hashtags: String,
}

// =============================================================================
// Generators
// =============================================================================

/// Generative media backend.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce an asset for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedAsset, GenerationError>;
}

/// Generator returning a placeholder image labelled with the product name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockContentGenerator {
    latency: MockLatency,
}

impl MockContentGenerator {
    /// Create a generator with the given delays.
    #[must_use]
    pub const fn new(latency: MockLatency) -> Self {
        Self { latency }
    }
}

/// Placeholder image URL for a product.
#[must_use]
pub fn placeholder_url(product_name: &str) -> String {
    format!(
        "{PLACEHOLDER_IMAGE_BASE}?text={}",
        urlencoding::encode(product_name)
    )
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedAsset, GenerationError> {
        pause(self.latency.generate).await;

        let caption = match &request.product_description {
            Some(description) => format!("{}✨\n\n{description}", request.product_name),
            None => format!("{}✨", request.product_name),
        };
        let tag: String = request
            .product_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        Ok(GeneratedAsset {
            url: placeholder_url(&request.product_name),
            caption,
            hashtags: format!("#{tag}"),
        })
    }
}

// =============================================================================
// Service
// =============================================================================

/// Turns validated requests into stored content records.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn ContentGenerator>,
    contents: Arc<dyn ContentRepository>,
}

impl GenerationService {
    /// Create a new generation service.
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>, contents: Arc<dyn ContentRepository>) -> Self {
        Self {
            generator,
            contents,
        }
    }

    /// Generate and store content for `user`.
    ///
    /// # Errors
    ///
    /// Returns the generator or repository failure.
    #[tracing::instrument(skip(self, request), fields(product = %request.product_name))]
    pub async fn generate(
        &self,
        user: &UserId,
        request: GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let asset = self.generator.generate(&request).await?;
        let input_method = request.image.input_method();

        let record = GeneratedContent {
            id: ContentId::generate(),
            user_id: user.clone(),
            ec_site_id: None,
            product_image_url: Some(request.image.preview_url()),
            product_name: request.product_name,
            product_description: request.product_description,
            platform: SocialPlatform::Instagram,
            content_type: request.content_type,
            generated_url: asset.url,
            generated_caption: Some(asset.caption),
            generated_hashtags: Some(asset.hashtags),
            prompt_used: Some(format!(
                "Generate {} for {}",
                request.content_type,
                SocialPlatform::Instagram.label()
            )),
            metadata: serde_json::json!({ "input_method": input_method }),
            created_at: Utc::now(),
        };

        Ok(self.contents.create(record).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{KvContentRepository, MemoryKvStore};

    fn url_form(name: &str) -> GenerationForm {
        GenerationForm {
            product_name: name.to_owned(),
            input_method: InputMethod::Url,
            image_url: "https://example.com/shirt.jpg".to_owned(),
            ..GenerationForm::default()
        }
    }

    fn service() -> (GenerationService, Arc<KvContentRepository>) {
        let contents = Arc::new(KvContentRepository::new(
            Arc::new(MemoryKvStore::new()),
            MockLatency::none(),
        ));
        let service = GenerationService::new(
            Arc::new(MockContentGenerator::new(MockLatency::none())),
            contents.clone(),
        );
        (service, contents)
    }

    #[test]
    fn test_validate_order() {
        let form = GenerationForm {
            input_method: InputMethod::Upload,
            ..GenerationForm::default()
        };
        assert!(matches!(
            form.validate(),
            Err(GenerationError::MissingProductName)
        ));

        let form = GenerationForm {
            product_name: "Tee".to_owned(),
            input_method: InputMethod::Upload,
            ..GenerationForm::default()
        };
        assert!(matches!(form.validate(), Err(GenerationError::MissingUpload)));

        let form = GenerationForm {
            product_name: "Tee".to_owned(),
            input_method: InputMethod::Url,
            ..GenerationForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.user_message(), "画像URLを入力してください");
    }

    #[test]
    fn test_empty_upload_counts_as_missing() {
        let form = GenerationForm {
            product_name: "Tee".to_owned(),
            input_method: InputMethod::Upload,
            upload: Some(UploadedImage {
                file_name: String::new(),
                content_type: "application/octet-stream".to_owned(),
                bytes: Vec::new(),
            }),
            ..GenerationForm::default()
        };
        assert!(matches!(form.validate(), Err(GenerationError::MissingUpload)));
    }

    #[test]
    fn test_upload_preview_is_data_url() {
        let source = ImageSource::Upload(UploadedImage {
            file_name: "a.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        });
        assert_eq!(source.preview_url(), "data:image/png;base64,AQID");
        assert_eq!(source.input_method(), InputMethod::Upload);
    }

    #[test]
    fn test_placeholder_url_encodes_name() {
        assert_eq!(
            placeholder_url("Cotton Tee"),
            "https://placehold.co/1080x1080/4299e1/ffffff?text=Cotton%20Tee"
        );
    }

    #[tokio::test]
    async fn test_generate_stores_record_first() {
        let (service, contents) = service();
        let user = UserId::new("mock-user-123");

        service
            .generate(&user, url_form("Older").validate().unwrap())
            .await
            .unwrap();
        let record = service
            .generate(&user, url_form("Cotton Tee").validate().unwrap())
            .await
            .unwrap();

        assert_eq!(record.generated_url, placeholder_url("Cotton Tee"));
        assert_eq!(record.prompt_used.as_deref(), Some("Generate image for Instagram"));
        assert_eq!(record.metadata["input_method"], "url");
        assert_eq!(
            record.product_image_url.as_deref(),
            Some("https://example.com/shirt.jpg")
        );
        assert!(record.ec_site_id.is_none());
        assert!(record.product_description.is_none());

        let stored = contents.list(&user).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], record);
    }

    #[tokio::test]
    async fn test_video_request_is_stored() {
        let (service, contents) = service();
        let user = UserId::new("mock-user-123");
        let form = GenerationForm {
            content_type: ContentType::Video,
            ..url_form("Earbuds")
        };

        let record = service
            .generate(&user, form.validate().unwrap())
            .await
            .unwrap();
        assert_eq!(record.content_type, ContentType::Video);
        assert_eq!(record.prompt_used.as_deref(), Some("Generate video for Instagram"));
        assert_eq!(record.generated_url, placeholder_url("Earbuds"));

        let stored = contents.list(&user).await.unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn test_mock_generator_caption() {
        let generator = MockContentGenerator::new(MockLatency::none());
        let mut request = url_form("ヨガ マット").validate().unwrap();
        request.product_description = Some("滑り止め加工".to_owned());

        let asset = generator.generate(&request).await.unwrap();
        assert_eq!(asset.caption, "ヨガ マット✨\n\n滑り止め加工");
        assert_eq!(asset.hashtags, "#ヨガマット");
    }
}
