//! Marketplace product and review pages, addressed by item code.
//!
//! Pages used:
//!   * GET {base}/dp/{item}
//!   * GET {base}/product-reviews/{item}/?pageNumber={n}&reviewerType=all_reviews

use listing_audit::{ItemId, ListingRecord};
use reqwest::Client;
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::errors::{ScrapeError, ScrapeResult};
use crate::fetch_html;
use crate::html::{all_texts, first_text, jpeg_images};

pub const DEFAULT_MARKETPLACE_BASE: &str = "https://www.amazon.com";

const TITLE: &str = "#productTitle";
const BULLETS: &str = "#feature-bullets ul li span";
const DESCRIPTION: &str = "#productDescription";
const REVIEW_TEXT: &str = "span.review-text-content span";

/// Marketplace HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    http: Client,
    base_url: Url,
}

impl MarketplaceClient {
    /// Constructs a client; `base_url` must be an http(s) origin.
    pub fn new(http: Client, mut base_url: Url) -> ScrapeResult<Self> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl(format!(
                "marketplace base must be http(s): {base_url}"
            )));
        }
        // Keep `join` from replacing the last path segment of the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        debug!("Creating MarketplaceClient with base_url={}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn listing_url(&self, item: &ItemId) -> ScrapeResult<Url> {
        let path = format!("dp/{}", urlencoding::encode(item.as_str()));
        Ok(self.base_url.join(&path)?)
    }

    pub fn reviews_url(&self, item: &ItemId, page: u32) -> ScrapeResult<Url> {
        let path = format!("product-reviews/{}/", urlencoding::encode(item.as_str()));
        let mut url = self.base_url.join(&path)?;
        url.query_pairs_mut()
            .append_pair("pageNumber", &page.to_string())
            .append_pair("reviewerType", "all_reviews");
        Ok(url)
    }

    /// Fetches and parses the product page of `item`.
    pub async fn fetch_listing(&self, item: &ItemId) -> ScrapeResult<ListingRecord> {
        let url = self.listing_url(item)?;
        let html = fetch_html(&self.http, url).await?;
        let record = parse_listing(&html);
        debug!(
            item = %item,
            bullets = record.bullets.len(),
            images = record.images.len(),
            "marketplace listing parsed"
        );
        Ok(record)
    }

    /// Fetches one page of review texts. Page numbers start at 1.
    pub async fn fetch_review_page(&self, item: &ItemId, page: u32) -> ScrapeResult<Vec<String>> {
        let url = self.reviews_url(item, page)?;
        let html = fetch_html(&self.http, url).await?;
        Ok(parse_reviews(&html))
    }
}

/// Extracts the listing fields from a product page.
pub fn parse_listing(html: &str) -> ListingRecord {
    let doc = Html::parse_document(html);
    ListingRecord::new(
        first_text(&doc, TITLE),
        all_texts(&doc, BULLETS),
        first_text(&doc, DESCRIPTION),
        jpeg_images(&doc, &["src"], None),
    )
}

/// Extracts review texts from a review page.
pub fn parse_reviews(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    all_texts(&doc, REVIEW_TEXT)
}
