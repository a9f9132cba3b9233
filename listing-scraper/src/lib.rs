//! HTTP + HTML implementation of the listing audit collaborators.
//!
//! [`ListingScraper`] implements both [`ListingExtractor`] and
//! [`ReviewPageFetcher`] by dispatching to the marketplace or storefront
//! client. Parsing is pure and lives next to each client.

mod errors;
mod html;
pub mod marketplace;
pub mod storefront;

use std::time::Duration;

use async_trait::async_trait;
use listing_audit::{
    ExtractionError, ItemId, ListingExtractor, ListingRecord, ListingTarget, ReviewPageFetcher,
};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, redirect};
use tracing::{debug, warn};
use url::Url;

pub use errors::{ScrapeError, ScrapeResult};
pub use marketplace::{DEFAULT_MARKETPLACE_BASE, MarketplaceClient};
pub use storefront::StorefrontClient;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 5;

/// Scraper settings, normally filled from the environment by the API layer.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Marketplace origin, e.g. `https://www.amazon.com`.
    pub marketplace_base: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            marketplace_base: DEFAULT_MARKETPLACE_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Shared-client scraper for both listing sources.
#[derive(Debug, Clone)]
pub struct ListingScraper {
    marketplace: MarketplaceClient,
    storefront: StorefrontClient,
}

impl ListingScraper {
    /// Builds the HTTP client and both source clients from `cfg`.
    pub fn from_config(cfg: ScraperConfig) -> ScrapeResult<Self> {
        let base = Url::parse(cfg.marketplace_base.trim())?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let http = Client::builder()
            .user_agent(cfg.user_agent)
            .default_headers(headers)
            .timeout(cfg.timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;

        Ok(Self {
            marketplace: MarketplaceClient::new(http.clone(), base)?,
            storefront: StorefrontClient::new(http),
        })
    }

    pub fn marketplace(&self) -> &MarketplaceClient {
        &self.marketplace
    }

    pub fn storefront(&self) -> &StorefrontClient {
        &self.storefront
    }
}

#[async_trait]
impl ListingExtractor for ListingScraper {
    async fn extract(&self, target: &ListingTarget) -> Result<ListingRecord, ExtractionError> {
        let record = match target {
            ListingTarget::Item(item) => self.marketplace.fetch_listing(item).await?,
            ListingTarget::Storefront(url) => self.storefront.fetch_listing(url).await?,
        };
        Ok(record)
    }
}

#[async_trait]
impl ReviewPageFetcher for ListingScraper {
    async fn fetch_page(&self, item: &ItemId, page: u32) -> Result<Vec<String>, ExtractionError> {
        Ok(self.marketplace.fetch_review_page(item, page).await?)
    }
}

/// GETs `url` and returns the body; any non-2xx status is an error.
pub(crate) async fn fetch_html(http: &Client, url: Url) -> ScrapeResult<String> {
    debug!(url = %url, "GET page");
    let resp = http.get(url.clone()).send().await?;

    let status = resp.status();
    if !status.is_success() {
        warn!(url = %url, status = status.as_u16(), "page request rejected");
        return Err(ScrapeError::HttpStatus(status.as_u16()));
    }

    Ok(resp.text().await?)
}
