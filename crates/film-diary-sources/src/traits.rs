use anyhow::Result;
use async_trait::async_trait;

/// One fetched page, after redirects were followed.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    /// True for a 2xx final status. HTTP-level failures are data, not errors.
    pub ok: bool,
    pub body: String,
    /// URL the response actually came from, after redirects.
    pub final_url: String,
}

/// The transport seam between the pagination loop and the network.
///
/// Implementations return `Err` only for transport failures (DNS, connect,
/// timeout); HTTP error statuses come back as a `FetchedPage` with
/// `ok == false`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage>;
}
