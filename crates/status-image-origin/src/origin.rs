//! Origin fetching

use crate::error::{OriginError, Result};
use async_trait::async_trait;
use file_image_store::StatusKey;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Public status-code image service
pub const DEFAULT_ORIGIN_URL: &str = "http://http.cat";

/// Source of truth for images missing from the cache
#[async_trait]
pub trait ImageOrigin: Send + Sync + 'static {
    /// Raw image bytes for `key`. Every failure is reported the same way;
    /// there are no retries.
    async fn fetch(&self, key: &StatusKey) -> Result<Vec<u8>>;
}

/// Origin reached over HTTP at `<base_url>/<key>`
pub struct HttpOrigin {
    client: Client,
    base_url: String,
}

impl HttpOrigin {
    /// Create an origin client for `base_url`, e.g. `http://http.cat`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(OriginError::InvalidBaseUrl(format!(
                "{} is not an http(s) base URL",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the image for `key` is fetched from
    pub fn image_url(&self, key: &StatusKey) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl ImageOrigin for HttpOrigin {
    async fn fetch(&self, key: &StatusKey) -> Result<Vec<u8>> {
        let url = self.image_url(key);
        debug!(url = %url, "Fetching image from origin");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "Origin returned error status");
            return Err(OriginError::Status(response.status().as_u16()));
        }

        let data = response.bytes().await?.to_vec();
        debug!(url = %url, size = data.len(), "Fetched image from origin");

        Ok(data)
    }
}
