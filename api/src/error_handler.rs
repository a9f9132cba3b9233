use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use listing_audit::{AuditError, ListingTarget};
use thiserror::Error;
use tracing::error;

use crate::core::{app_state::ConfigError, http::response_envelope::ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up scraper: {0}")]
    Scraper(#[from] listing_scraper::ScrapeError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    /// Body is not valid JSON for the endpoint; treated like a missing input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Per-client allowance is used up.
    #[error("audit limit exceeded")]
    QuotaExceeded,

    /// Terminal failure of the audit pipeline.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Audit(AuditError::InvalidInput | AuditError::InvalidFormat(_)) => {
                StatusCode::BAD_REQUEST
            }

            // 5xx
            AppError::Audit(AuditError::ExtractionFailed { .. } | AuditError::Internal(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Config(_) | AppError::Scraper(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Scraper(_) => "SCRAPER_SETUP_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "INVALID_INPUT",
            AppError::QuotaExceeded => "AUDIT_LIMIT_EXCEEDED",
            AppError::Audit(AuditError::InvalidInput) => "INVALID_INPUT",
            AppError::Audit(AuditError::InvalidFormat(_)) => "INVALID_FORMAT",
            AppError::Audit(AuditError::ExtractionFailed { .. }) => "EXTRACTION_FAILED",
            AppError::Audit(AuditError::Internal(_)) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the caller.
    fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(_) | AppError::Audit(AuditError::InvalidInput) => {
                "No input provided.".into()
            }
            AppError::Audit(AuditError::InvalidFormat(_)) => {
                "Invalid input format. Use a valid marketplace item ID or storefront product URL."
                    .into()
            }
            AppError::Audit(AuditError::ExtractionFailed { target, .. }) => match target {
                ListingTarget::Item(_) => {
                    "Failed to fetch product details from the marketplace.".into()
                }
                ListingTarget::Storefront(_) => "Failed to fetch storefront page.".into(),
            },
            AppError::QuotaExceeded => {
                "Free audit limit exceeded. Please contact us for additional audits.".into()
            }
            AppError::Audit(AuditError::Internal(description)) => description.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, code = self.error_code(), "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.public_message())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert JSON body rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
