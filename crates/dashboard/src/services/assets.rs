//! Downloading generated assets.
//!
//! The download button streams the generated image back to the browser as an
//! attachment. Placeholder hosts may refuse or time out; callers fall back to
//! sending the browser to the asset URL instead.

use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The stored URL is not an absolute http(s) URL.
    #[error("unsupported asset url: {0}")]
    UnsupportedUrl(String),

    /// The request failed or returned a non-success status.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// A fetched asset ready to be sent as an attachment.
#[derive(Debug)]
pub struct DownloadedAsset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fetch the asset at `url`.
///
/// # Errors
///
/// Returns `AssetError::UnsupportedUrl` for anything but http(s) URLs and
/// `AssetError::Fetch` when the request fails or the host answers with an
/// error status.
#[tracing::instrument(skip(client))]
pub async fn fetch_asset(client: &reqwest::Client, url: &str) -> Result<DownloadedAsset, AssetError> {
    let parsed = Url::parse(url).map_err(|_| AssetError::UnsupportedUrl(url.to_owned()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AssetError::UnsupportedUrl(url.to_owned()));
    }

    let response = client.get(parsed).send().await?.error_for_status()?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned();
    let bytes = response.bytes().await?.to_vec();

    tracing::debug!(len = bytes.len(), %content_type, "Asset fetched");
    Ok(DownloadedAsset {
        content_type,
        bytes,
    })
}

/// `Content-Disposition` value for an attachment named `filename`.
///
/// Non-ASCII names are sent through `filename*` with an ASCII fallback so
/// older clients still get a usable name.
#[must_use]
pub fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}
