//! Per-request audit pipeline.
//!
//! `Received -> Classified -> Extracted -> (ReviewsCollected) -> Scored`.
//! Any stage may fail the request; a panic anywhere below [`ListingAuditor::audit`]
//! is caught and reported as [`AuditError::Internal`] instead of unwinding
//! into the server.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info, instrument};

use crate::classifier::classify;
use crate::errors::{AuditError, AuditResult};
use crate::reviews::{self, ReviewPolicy};
use crate::scoring;
use crate::sentiment;
use crate::traits::{ListingExtractor, PolarityAnalyzer, ReviewPageFetcher};
use crate::types::{AuditReport, ListingTarget};

/// Runs audits against injected collaborators.
///
/// Holds no per-request state, so one instance serves any number of
/// concurrent audits.
#[derive(Clone)]
pub struct ListingAuditor {
    extractor: Arc<dyn ListingExtractor>,
    review_pages: Arc<dyn ReviewPageFetcher>,
    analyzer: Arc<dyn PolarityAnalyzer>,
    policy: ReviewPolicy,
}

impl ListingAuditor {
    pub fn new(
        extractor: Arc<dyn ListingExtractor>,
        review_pages: Arc<dyn ReviewPageFetcher>,
        analyzer: Arc<dyn PolarityAnalyzer>,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            extractor,
            review_pages,
            analyzer,
            policy,
        }
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    /// Audits one caller-supplied item code or storefront URL.
    #[instrument(name = "listing_audit", skip(self, input), fields(input = %input.trim()))]
    pub async fn audit(&self, input: &str) -> AuditResult<AuditReport> {
        match AssertUnwindSafe(self.run(input)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(%message, "audit pipeline panicked");
                Err(AuditError::Internal(message))
            }
        }
    }

    async fn run(&self, input: &str) -> AuditResult<AuditReport> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AuditError::InvalidInput);
        }

        let target = classify(trimmed)
            .into_target()
            .ok_or_else(|| AuditError::InvalidFormat(trimmed.to_string()))?;
        debug!(source = target.source_name(), "input classified");

        let listing = self
            .extractor
            .extract(&target)
            .await
            .map_err(|source| AuditError::ExtractionFailed {
                target: target.clone(),
                source,
            })?;
        debug!(
            title_chars = listing.title.chars().count(),
            bullets = listing.bullets.len(),
            images = listing.images.len(),
            "listing extracted"
        );

        let sentiment = match &target {
            ListingTarget::Item(item) => {
                let reviews =
                    reviews::collect(self.review_pages.as_ref(), item, &self.policy).await;
                let score = sentiment::score(self.analyzer.as_ref(), &reviews);
                debug!(reviews = reviews.len(), average = score.value(), "reviews scored");
                Some(score)
            }
            ListingTarget::Storefront(_) => None,
        };

        let report = scoring::audit(&listing, sentiment);
        info!(
            source = target.source_name(),
            score = report.listing_score,
            recommendations = report.recommendations.len(),
            "audit completed"
        );
        Ok(report)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::ExtractionError;
    use crate::sentiment::{LexiconAnalyzer, SentimentLabel};
    use crate::types::{ItemId, ListingRecord};

    #[derive(Default)]
    struct StubExtractor {
        listing: ListingRecord,
        fail_with: Option<ExtractionError>,
        seen: Mutex<Vec<ListingTarget>>,
    }

    #[async_trait]
    impl ListingExtractor for StubExtractor {
        async fn extract(&self, target: &ListingTarget) -> Result<ListingRecord, ExtractionError> {
            self.seen.lock().unwrap().push(target.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(self.listing.clone()),
            }
        }
    }

    struct PanickingExtractor;

    #[async_trait]
    impl ListingExtractor for PanickingExtractor {
        async fn extract(&self, _target: &ListingTarget) -> Result<ListingRecord, ExtractionError> {
            panic!("selector table corrupted");
        }
    }

    /// One page of fixed reviews, then nothing.
    struct OnePage {
        reviews: Vec<String>,
        calls: Mutex<u32>,
    }

    impl OnePage {
        fn new(reviews: &[&str]) -> Self {
            Self {
                reviews: reviews.iter().map(|r| r.to_string()).collect(),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewPageFetcher for OnePage {
        async fn fetch_page(&self, _item: &ItemId, page: u32) -> Result<Vec<String>, ExtractionError> {
            *self.calls.lock().unwrap() += 1;
            Ok(if page == 1 { self.reviews.clone() } else { Vec::new() })
        }
    }

    fn strong_listing() -> ListingRecord {
        ListingRecord::new(
            "Insulated Stainless Steel Water Bottle with Leakproof Lid, 32 oz",
            (0..5).map(|i| format!("Feature number {i} keeps your drinks cold for hours")),
            "A".repeat(200),
            (0..4).map(|i| format!("https://img.example.com/{i}.jpg")),
        )
    }

    fn auditor(extractor: Arc<dyn ListingExtractor>, pages: Arc<OnePage>) -> ListingAuditor {
        ListingAuditor::new(
            extractor,
            pages,
            Arc::new(LexiconAnalyzer::new()),
            ReviewPolicy::immediate(),
        )
    }

    #[tokio::test]
    async fn empty_input_is_invalid_input() {
        let pages = Arc::new(OnePage::new(&[]));
        let auditor = auditor(Arc::new(StubExtractor::default()), pages);

        assert!(matches!(auditor.audit("   ").await, Err(AuditError::InvalidInput)));
    }

    #[tokio::test]
    async fn unclassifiable_input_is_invalid_format() {
        let extractor = Arc::new(StubExtractor::default());
        let pages = Arc::new(OnePage::new(&[]));
        let auditor = auditor(extractor.clone(), pages);

        let result = auditor.audit("hello world").await;
        assert!(matches!(result, Err(AuditError::InvalidFormat(ref s)) if s == "hello world"));
        assert!(extractor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn identifier_path_collects_reviews_and_labels_sentiment() {
        let extractor = Arc::new(StubExtractor {
            listing: strong_listing(),
            ..Default::default()
        });
        let pages = Arc::new(OnePage::new(&[
            "Great bottle, I love it",
            "Excellent quality and perfect size",
        ]));
        let auditor = auditor(extractor.clone(), pages.clone());

        let report = auditor.audit(" B0C3D4E5F6 ").await.unwrap();

        assert_eq!(report.listing_score, 100);
        assert_eq!(report.sentiment_summary, Some(SentimentLabel::Positive));
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(*pages.calls.lock().unwrap(), 2);
        assert_eq!(
            extractor.seen.lock().unwrap()[0],
            ListingTarget::Item(ItemId::parse("B0C3D4E5F6").unwrap())
        );
    }

    #[tokio::test]
    async fn identifier_without_reviews_is_neutral_not_a_failure() {
        let extractor = Arc::new(StubExtractor {
            listing: strong_listing(),
            ..Default::default()
        });
        let auditor = auditor(extractor, Arc::new(OnePage::new(&[])));

        let report = auditor.audit("B0C3D4E5F6").await.unwrap();

        assert_eq!(report.sentiment_summary, Some(SentimentLabel::Neutral));
        assert_eq!(report.listing_score, 95);
    }

    #[tokio::test]
    async fn storefront_path_skips_reviews() {
        let extractor = Arc::new(StubExtractor {
            listing: strong_listing(),
            ..Default::default()
        });
        let pages = Arc::new(OnePage::new(&["terrible"]));
        let auditor = auditor(extractor, pages.clone());

        let report = auditor
            .audit("https://shop.example.com/products/x")
            .await
            .unwrap();

        assert_eq!(report.sentiment_summary, None);
        assert_eq!(report.listing_score, 100);
        assert_eq!(*pages.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn extractor_failure_is_extraction_failed() {
        let extractor = Arc::new(StubExtractor {
            fail_with: Some(ExtractionError::Status(503)),
            ..Default::default()
        });
        let auditor = auditor(extractor, Arc::new(OnePage::new(&[])));

        match auditor.audit("https://shop.example.com/products/x").await {
            Err(AuditError::ExtractionFailed { target, source }) => {
                assert_eq!(target.source_name(), "storefront");
                assert_eq!(source, ExtractionError::Status(503));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn panic_becomes_internal_error() {
        let auditor = auditor(Arc::new(PanickingExtractor), Arc::new(OnePage::new(&[])));

        match auditor.audit("B0C3D4E5F6").await {
            Err(AuditError::Internal(message)) => {
                assert_eq!(message, "selector table corrupted")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
