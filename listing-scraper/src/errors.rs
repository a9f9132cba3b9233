//! Error type for the HTTP/HTML layer.

use listing_audit::ExtractionError;
use thiserror::Error;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page answered with a non-2xx status.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// The page URL could not be parsed or is not http(s).
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The body could not be read as text.
    #[error("unreadable body: {0}")]
    Body(String),

    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ScrapeError::Timeout;
        }
        if let Some(status) = e.status() {
            return ScrapeError::HttpStatus(status.as_u16());
        }
        if e.is_body() || e.is_decode() {
            return ScrapeError::Body(e.to_string());
        }
        ScrapeError::Network(e.to_string())
    }
}

impl From<url::ParseError> for ScrapeError {
    fn from(e: url::ParseError) -> Self {
        ScrapeError::InvalidUrl(e.to_string())
    }
}

impl From<ScrapeError> for ExtractionError {
    fn from(e: ScrapeError) -> Self {
        match e {
            ScrapeError::HttpStatus(code) => ExtractionError::Status(code),
            ScrapeError::Timeout => ExtractionError::Timeout,
            ScrapeError::Network(msg) | ScrapeError::Client(msg) => ExtractionError::Network(msg),
            ScrapeError::InvalidUrl(msg) => ExtractionError::InvalidTarget(msg),
            ScrapeError::Body(msg) => ExtractionError::Body(msg),
        }
    }
}
