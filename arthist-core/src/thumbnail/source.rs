use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Why a lookup produced no image. Subscribers only ever see
/// `ThumbnailState::Error`; the variants exist for logging.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("summary endpoint returned status {0}")]
    Status(u16),
    #[error("page has no thumbnail or original image")]
    MissingImage,
}

/// Resolves a page title to an image URL.
#[async_trait]
pub trait ThumbnailSource: Send + Sync {
    async fn fetch_image_url(&self, page_title: &str) -> Result<String, ThumbnailError>;
}

// -- Page summary response --

#[derive(Debug, Default, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub originalimage: Option<ImageRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub source: Option<String>,
}

impl PageSummary {
    /// The thumbnail URL, falling back to the original image. Empty sources
    /// count as missing.
    pub fn image_url(self) -> Option<String> {
        self.thumbnail
            .and_then(|t| t.source)
            .filter(|url| !url.is_empty())
            .or_else(|| {
                self.originalimage
                    .and_then(|o| o.source)
                    .filter(|url| !url.is_empty())
            })
    }
}

/// Client for the Wikipedia REST `page/summary` endpoint.
pub struct WikipediaClient {
    base_url: String,
    http: reqwest::Client,
}

impl WikipediaClient {
    /// `base_url` must end with `/`; titles are appended to it.
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ThumbnailError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::new(config.summary_base_url.clone(), http))
    }

    /// Full request URL for a page title, encoded as one path segment.
    pub fn summary_url(&self, page_title: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(page_title))
    }
}

#[async_trait]
impl ThumbnailSource for WikipediaClient {
    async fn fetch_image_url(&self, page_title: &str) -> Result<String, ThumbnailError> {
        let url = self.summary_url(page_title);
        debug!("Page summary request: {}", url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ThumbnailError::Status(response.status().as_u16()));
        }

        let summary: PageSummary = response.json().await?;
        summary.image_url().ok_or(ThumbnailError::MissingImage)
    }
}
