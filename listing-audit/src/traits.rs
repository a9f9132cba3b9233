//! Capabilities the pipeline depends on but does not implement.
//!
//! Implementations live in other crates (HTTP scraping) or in tests (stubs).
//! All of them are shared across concurrent audits, hence `Send + Sync`.

use async_trait::async_trait;

use crate::errors::ExtractionError;
use crate::types::{ItemId, ListingRecord, ListingTarget};

/// Turns a target into a normalized [`ListingRecord`].
#[async_trait]
pub trait ListingExtractor: Send + Sync {
    async fn extract(&self, target: &ListingTarget) -> Result<ListingRecord, ExtractionError>;
}

/// Fetches one page of review texts for a marketplace item.
///
/// Pages are 1-based. An empty page and an error both mean "no more reviews"
/// to the collector.
#[async_trait]
pub trait ReviewPageFetcher: Send + Sync {
    async fn fetch_page(&self, item: &ItemId, page: u32) -> Result<Vec<String>, ExtractionError>;
}

/// Scores a single text: sign is polarity, magnitude is strength, in `[-1, 1]`.
pub trait PolarityAnalyzer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}
