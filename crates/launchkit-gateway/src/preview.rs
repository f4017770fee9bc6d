//! Image previews for image descriptions.

use async_trait::async_trait;
use launchkit_config::Config;
use launchkit_utils::error::{GatewayError, PreviewError};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

use crate::http_client::HttpClient;

const SERVICE_NAME: &str = "preview-service";

/// A rendered preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// URL the image was fetched from.
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    async fn generate_preview(&self, description: &str) -> Result<PreviewImage, PreviewError>;
}

/// Fetches `GET {base}/{percent-encoded description}`.
#[derive(Clone)]
pub struct HttpPreviewRenderer {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
}

impl HttpPreviewRenderer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Self::with_client(base_url, timeout, HttpClient::new()?)
    }

    pub fn with_client(
        base_url: &str,
        timeout: Duration,
        http: HttpClient,
    ) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            GatewayError::Misconfiguration(format!("invalid preview URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(GatewayError::Misconfiguration(format!(
                "preview URL must be an http(s) base URL: {base_url}"
            )));
        }
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(config.preview_url(), config.preview_timeout())
    }

    fn image_url(&self, description: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(description);
        }
        url
    }
}

fn from_gateway(err: GatewayError) -> PreviewError {
    match err {
        GatewayError::Timeout { duration } => PreviewError::Timeout { duration },
        other => PreviewError::Transport(other.to_string()),
    }
}

#[async_trait]
impl PreviewRenderer for HttpPreviewRenderer {
    async fn generate_preview(&self, description: &str) -> Result<PreviewImage, PreviewError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(PreviewError::BlankDescription);
        }

        let url = self.image_url(description);
        debug!(service = SERVICE_NAME, url = %url, "Requesting preview");

        let request = self.http.inner().get(url.clone());
        let response = self
            .http
            .execute_with_retry(request, self.timeout, SERVICE_NAME)
            .await
            .map_err(from_gateway)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                PreviewError::Timeout {
                    duration: self.timeout,
                }
            } else {
                PreviewError::Transport(format!("failed to read preview body: {e}"))
            }
        })?;
        if bytes.is_empty() {
            return Err(PreviewError::EmptyImage);
        }

        Ok(PreviewImage {
            url: url.to_string(),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
