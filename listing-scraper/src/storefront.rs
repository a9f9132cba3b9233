//! Merchant-hosted product pages.
//!
//! Storefront themes vary a lot, so extraction is deliberately loose: the
//! first heading, the meta description (or the visible description block) and
//! any JPEG images on the page.

use listing_audit::ListingRecord;
use reqwest::Client;
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::errors::{ScrapeError, ScrapeResult};
use crate::fetch_html;
use crate::html::{all_texts, first_attr, first_text, jpeg_images};

const TITLE: &str = "h1";
const META_DESCRIPTION: &str = r#"meta[name="description"]"#;
const DESCRIPTION_BLOCK: &str = "div.product-description";
const FIRST_PARAGRAPH: &str = "p";
const DESCRIPTION_BULLETS: &str = "div.product-description li";
const IMAGE_ATTRS: [&str; 2] = ["src", "data-src"];

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
}

impl StorefrontClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Fetches and parses the product page at `page_url`.
    pub async fn fetch_listing(&self, page_url: &str) -> ScrapeResult<ListingRecord> {
        let url = page_url_of(page_url)?;
        let html = fetch_html(&self.http, url.clone()).await?;
        let record = parse_listing(&html, &url);
        debug!(
            url = %url,
            bullets = record.bullets.len(),
            images = record.images.len(),
            "storefront listing parsed"
        );
        Ok(record)
    }
}

/// Parses `raw` as an absolute http(s) URL.
pub fn page_url_of(raw: &str) -> ScrapeResult<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{other}' in {raw}"
        ))),
    }
}

/// Extracts the listing fields from a storefront page. Image sources are
/// resolved against `page_url`.
pub fn parse_listing(html: &str, page_url: &Url) -> ListingRecord {
    let doc = Html::parse_document(html);

    let mut description = first_attr(&doc, META_DESCRIPTION, "content");
    if description.is_empty() {
        description = first_text(&doc, DESCRIPTION_BLOCK);
    }
    if description.is_empty() {
        description = first_text(&doc, FIRST_PARAGRAPH);
    }

    ListingRecord::new(
        first_text(&doc, TITLE),
        all_texts(&doc, DESCRIPTION_BULLETS),
        description,
        jpeg_images(&doc, &IMAGE_ATTRS, Some(page_url)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://shop.example.com/products/bottle").unwrap()
    }

    #[test]
    fn prefers_meta_description() {
        let html = r#"
            <html><head>
              <meta name="description" content="  Keeps drinks cold all day.  ">
            </head><body>
              <h1> Steel Bottle </h1>
              <div class="product-description">
                <p>Long form copy.</p>
                <ul><li>Leakproof</li><li>BPA free</li></ul>
              </div>
              <img src="//cdn.example.com/files/bottle.jpg?v=2">
              <img data-src="/files/side.jpg">
              <img src="/files/icon.svg">
            </body></html>
        "#;
        let record = parse_listing(html, &page());

        assert_eq!(record.title, "Steel Bottle");
        assert_eq!(record.description, "Keeps drinks cold all day.");
        assert_eq!(record.bullets, vec!["Leakproof", "BPA free"]);
        assert_eq!(
            record.images,
            vec![
                "https://cdn.example.com/files/bottle.jpg?v=2",
                "https://shop.example.com/files/side.jpg",
            ]
        );
    }

    #[test]
    fn falls_back_to_description_block_then_paragraph() {
        let block = r#"<h1>T</h1><p>Intro</p><div class="product-description">Hand made.</div>"#;
        assert_eq!(parse_listing(block, &page()).description, "Hand made.");

        let paragraph = r#"<h1>T</h1><p>Only paragraph.</p>"#;
        assert_eq!(parse_listing(paragraph, &page()).description, "Only paragraph.");
    }

    #[test]
    fn empty_page_gives_empty_record() {
        assert_eq!(
            parse_listing("<html><body></body></html>", &page()),
            ListingRecord::default()
        );
    }

    #[test]
    fn only_http_urls_are_fetchable() {
        assert!(page_url_of("https://shop.example.com/products/x").is_ok());
        assert!(page_url_of(" HTTP://shop.example.com/products/x ").is_ok());
        assert!(matches!(
            page_url_of("ftp://shop.example.com/x"),
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(page_url_of("not a url"), Err(ScrapeError::InvalidUrl(_))));
    }
}
