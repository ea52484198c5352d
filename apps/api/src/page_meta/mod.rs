//! Page Metadata Extractor: one GET, then title, meta description and `<h1>` text.
//!
//! No JavaScript execution, no retry. Redirects follow the HTTP client's default policy.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Upper bound on a single page fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[name='description']")
        .expect("Failed to parse meta description selector - this is a bug")
});

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("Failed to parse h1 selector - this is a bug"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// SEO-relevant metadata of one page. Missing tags come back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub h1: Vec<String>,
}

/// The web-fetch boundary.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// Unauthenticated GET over a shared reqwest client.
#[derive(Clone, Default)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches `url` and extracts its metadata. A failed fetch is returned as-is.
pub async fn extract_page_metadata(
    fetcher: &dyn PageFetcher,
    url: &str,
) -> Result<PageMetadata, FetchError> {
    let html = fetcher.fetch_html(url, FETCH_TIMEOUT).await?;
    debug!("Fetched {} bytes from {url}", html.len());
    Ok(parse_page_metadata(&html))
}

/// Pure extraction over an HTML document.
pub fn parse_page_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let h1 = document
        .select(&H1_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();

    PageMetadata {
        title,
        description,
        h1,
    }
}
