//! Listing audit pipeline.
//!
//! Classifies caller input, extracts the listing through an injected
//! [`ListingExtractor`], collects and scores reviews for marketplace items,
//! and applies the deterministic deduction model in [`scoring`].

pub mod classifier;
mod errors;
pub mod orchestrator;
pub mod reviews;
pub mod scoring;
pub mod sentiment;
pub mod telemetry;
mod traits;
mod types;

pub use classifier::{InputKind, classify};
pub use errors::{AuditError, AuditResult, ExtractionError};
pub use orchestrator::ListingAuditor;
pub use reviews::ReviewPolicy;
pub use sentiment::{LexiconAnalyzer, SentimentLabel, SentimentScore};
pub use traits::{ListingExtractor, PolarityAnalyzer, ReviewPageFetcher};
pub use types::{AuditReport, ItemId, ListingRecord, ListingTarget, MAX_REVIEWS, ReviewSet};
