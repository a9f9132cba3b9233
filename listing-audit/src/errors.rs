//! Crate-wide error hierarchy for listing-audit.

use thiserror::Error;

use crate::types::ListingTarget;

/// Convenient alias for crate-wide results.
pub type AuditResult<T> = Result<T, AuditError>;

/// Terminal failure of a single audit request.
///
/// None of these are retried by the pipeline. Running out of review pages is
/// not represented here: the collector degrades to a smaller review set.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Input was empty after trimming.
    #[error("no input provided")]
    InvalidInput,

    /// Input is neither a marketplace item id nor a storefront URL.
    #[error("invalid input format: {0:?}")]
    InvalidFormat(String),

    /// The listing extractor could not fetch or parse the listing.
    #[error("failed to extract listing {target}: {source}")]
    ExtractionFailed {
        target: ListingTarget,
        #[source]
        source: ExtractionError,
    },

    /// Any other fault inside the pipeline (including a caught panic).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a listing extractor or review page fetcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// Upstream answered with a non-success HTTP status.
    #[error("http status {0}")]
    Status(u16),

    /// Transport-level timeout.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// The target could not be turned into a request (bad URL, etc.).
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The response body could not be read or parsed.
    #[error("unreadable response: {0}")]
    Body(String),
}
