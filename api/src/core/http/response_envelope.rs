use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Flat response envelope shared by success and error responses.
///
/// Payload fields sit next to `success` rather than under a nested key, so a
/// successful audit reads `{ "success": true, "listing_score": 90, ... }` and
/// a failure reads `{ "success": false, "message": "...", "code": "..." }`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    /// Flattened; `None` adds no fields.
    #[serde(flatten)]
    pub data: Option<T>,

    /// Human-friendly error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Stable, machine-readable error code (e.g. "INVALID_FORMAT").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Build a success envelope.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    /// Build an error envelope.
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: Some(code),
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
