use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use film_diary_config::SiteConfig;
use reqwest::Client;
use tracing::debug;

use crate::traits::{FetchedPage, PageFetcher};

/// Reqwest-backed transport for the diary site.
///
/// Follows redirects (reqwest default policy) and never treats HTTP error
/// statuses as Rust errors; only transport failures propagate.
pub struct LetterboxdClient {
    client: Client,
    base_url: String,
}

impl LetterboxdClient {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&site.user_agent)
            .timeout(Duration::from_secs(site.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: site.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PageFetcher for LetterboxdClient {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        debug!(url = %url, "fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))?;

        Ok(FetchedPage {
            status: status.as_u16(),
            ok: status.is_success(),
            body,
            final_url,
        })
    }
}
